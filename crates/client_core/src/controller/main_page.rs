use std::sync::Arc;

use shared::domain::{City, CityName, Offer, OfferId, Point, CITIES};

use crate::{
    coordinator::{Coordinator, FetchOutcome},
    store::selectors,
    view::{map_markers, offer_points, MapMarker},
};

#[derive(Debug, Clone, PartialEq)]
pub struct MainPageView {
    pub cities: Vec<CityName>,
    pub active_city: CityName,
    pub loading: bool,
    pub error: Option<String>,
    pub offers: Vec<Offer>,
    pub map_center: City,
    pub points: Vec<Point>,
    pub selected_point: Option<Point>,
    pub markers: Vec<MapMarker>,
    pub summary: String,
}

/// City listing page: owns the active city and the hovered card.
pub struct MainPageController {
    coordinator: Arc<Coordinator>,
    active_city: CityName,
    hovered_offer: Option<OfferId>,
}

impl MainPageController {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self {
            coordinator,
            active_city: CITIES[0],
            hovered_offer: None,
        }
    }

    pub fn active_city(&self) -> CityName {
        self.active_city
    }

    pub async fn mount(&mut self) -> FetchOutcome {
        self.select_city(self.active_city).await
    }

    pub async fn select_city(&mut self, city: CityName) -> FetchOutcome {
        self.active_city = city;
        self.hovered_offer = None;
        self.coordinator
            .fetch_offers_by_city(City::default_for(city))
            .await
    }

    pub fn hover_offer(&mut self, offer_id: Option<OfferId>) {
        self.hovered_offer = offer_id;
    }

    pub async fn toggle_favorite(&self, offer_id: &OfferId, is_favorite: bool) -> Option<Offer> {
        self.coordinator.toggle_favorite(offer_id, is_favorite).await
    }

    pub fn view(&self) -> MainPageView {
        let offers_state = self.coordinator.store().select(selectors::offers);
        let offers = offers_state.items;
        let points = offer_points(&offers);
        let selected_point = self.hovered_offer.as_ref().and_then(|hovered| {
            offers
                .iter()
                .find(|offer| &offer.id == hovered)
                .map(Point::from)
        });
        let markers = map_markers(&points, selected_point.as_ref());
        let map_center = offers_state
            .city
            .filter(|city| city.name == self.active_city)
            .unwrap_or_else(|| City::default_for(self.active_city));
        let summary = places_summary(offers.len(), self.active_city);

        MainPageView {
            cities: CITIES.to_vec(),
            active_city: self.active_city,
            loading: offers_state.loading,
            error: offers_state.error,
            offers,
            map_center,
            points,
            selected_point,
            markers,
            summary,
        }
    }
}

fn places_summary(count: usize, city: CityName) -> String {
    let noun = if count == 1 { "place" } else { "places" };
    format!("{count} {noun} to stay in {city}")
}

#[cfg(test)]
#[path = "../tests/main_page_tests.rs"]
mod tests;
