//! Derived view data handed to presentational code.

use shared::domain::{Offer, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub point: Point,
    pub active: bool,
}

pub fn offer_points(offers: &[Offer]) -> Vec<Point> {
    offers.iter().map(Point::from).collect()
}

/// A marker is active when its title matches the selected point's title.
pub fn map_markers(points: &[Point], selected: Option<&Point>) -> Vec<MapMarker> {
    points
        .iter()
        .map(|point| MapMarker {
            point: point.clone(),
            active: selected.is_some_and(|selected| selected.title == point.title),
        })
        .collect()
}

/// `"1 Bedroom"`, `"3 Bedrooms"`; empty for zero.
pub fn pluralize(count: u32, singular: &str, plural: &str) -> String {
    match count {
        0 => String::new(),
        1 => format!("1 {singular}"),
        n => format!("{n} {plural}"),
    }
}

pub fn rating_width_percent(rating: f64) -> f64 {
    (rating * 20.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(title: &str) -> Point {
        Point {
            title: title.into(),
            lat: 1.0,
            long: 2.0,
        }
    }

    #[test]
    fn pluralizes_counts() {
        assert_eq!(pluralize(1, "Bedroom", "Bedrooms"), "1 Bedroom");
        assert_eq!(pluralize(4, "adult", "adults"), "4 adults");
        assert_eq!(pluralize(0, "adult", "adults"), "");
    }

    #[test]
    fn rating_width_is_clamped() {
        assert_eq!(rating_width_percent(4.0), 80.0);
        assert_eq!(rating_width_percent(7.0), 100.0);
        assert_eq!(rating_width_percent(-1.0), 0.0);
    }

    #[test]
    fn marks_selected_marker_by_title() {
        let points = [point("a"), point("b")];
        let markers = map_markers(&points, Some(&point("b")));
        assert_eq!(
            markers.iter().map(|m| m.active).collect::<Vec<_>>(),
            [false, true]
        );
        assert!(map_markers(&points, None).iter().all(|m| !m.active));
    }
}
