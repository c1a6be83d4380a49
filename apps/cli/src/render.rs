//! Plain-text rendering of page views.

use std::fmt::Write;

use client_core::{FavoritesView, LoginOutcome, MainPageView, OfferPageView};
use shared::domain::Offer;

pub fn login_status(outcome: LoginOutcome) -> &'static str {
    match outcome {
        LoginOutcome::Authorized => "Signed in.",
        LoginOutcome::Unauthorized => "Not signed in.",
        LoginOutcome::Failed => "Could not reach the login endpoint.",
    }
}

fn offer_line(out: &mut String, offer: &Offer, active: bool) {
    let marker = if active { '*' } else { ' ' };
    let premium = if offer.is_premium { " [Premium]" } else { "" };
    let favorite = if offer.is_favorite { " (favorite)" } else { "" };
    let _ = writeln!(
        out,
        "{marker} {id}  {title}{premium}{favorite}  EUR {price:.0}/night  rating {rating:.1}  {kind}",
        id = offer.id,
        title = offer.title,
        price = offer.price,
        rating = offer.rating,
        kind = offer.kind,
    );
}

pub fn main_page(view: &MainPageView) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = view
        .cities
        .iter()
        .map(|city| {
            if *city == view.active_city {
                format!("[{city}]")
            } else {
                city.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));

    if let Some(error) = &view.error {
        let _ = writeln!(out, "{error}");
    }
    if view.offers.is_empty() {
        let _ = writeln!(
            out,
            "No places to stay available in {}.",
            view.active_city
        );
        return out;
    }

    let _ = writeln!(out, "{}", view.summary);
    for offer in &view.offers {
        let active = view
            .selected_point
            .as_ref()
            .is_some_and(|point| point.title == offer.title);
        offer_line(&mut out, offer, active);
    }
    let _ = writeln!(
        out,
        "map: {:.4},{:.4} zoom {} ({} markers)",
        view.map_center.location.latitude,
        view.map_center.location.longitude,
        view.map_center.location.zoom,
        view.markers.len()
    );
    out
}

pub fn offer_page(view: &OfferPageView) -> String {
    let mut out = String::new();
    let details = match view {
        OfferPageView::Loading => return "Loading...\n".into(),
        OfferPageView::Redirect(route) => return format!("-> {}\n", route.path()),
        OfferPageView::Ready(details) => details,
    };

    let offer = &details.offer;
    let _ = writeln!(out, "{} ({})", offer.title, offer.city.name);
    if offer.is_premium {
        let _ = writeln!(out, "Premium");
    }
    let _ = writeln!(
        out,
        "EUR {:.0}/night  rating {:.1} ({:.0}%)  {}",
        offer.price, offer.rating, details.rating_width, offer.kind
    );
    let facts: Vec<&str> = [details.bedrooms_text.as_str(), details.adults_text.as_str()]
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect();
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(", "));
    }
    if !offer.goods.is_empty() {
        let _ = writeln!(out, "Goods: {}", offer.goods.join(", "));
    }
    if let Some(host) = &offer.host {
        let pro = if host.is_pro { " (Pro)" } else { "" };
        let _ = writeln!(out, "Host: {}{pro}", host.name);
    }
    if !offer.description.is_empty() {
        let _ = writeln!(out, "{}", offer.description);
    }

    let _ = writeln!(out, "\nReviews · {}", details.comments.len());
    for comment in &details.comments {
        let _ = writeln!(
            out,
            "  {} ({}/5, {}): {}",
            comment.user.name,
            comment.rating,
            comment.date.format("%B %Y"),
            comment.comment
        );
    }
    if let Some(error) = &details.comment_error {
        let _ = writeln!(out, "  review not sent: {error}");
    }

    if !details.nearby.is_empty() {
        let _ = writeln!(out, "\nOther places in the neighbourhood");
        for nearby in &details.nearby {
            offer_line(&mut out, nearby, false);
        }
    }
    out
}

pub fn favorites(view: &FavoritesView) -> String {
    let mut out = String::new();
    match view {
        FavoritesView::Loading => out.push_str("Loading...\n"),
        FavoritesView::Redirect(route) => {
            let _ = writeln!(out, "Sign in to see saved places. -> {}", route.path());
        }
        FavoritesView::Error(message) => {
            let _ = writeln!(out, "{message}");
        }
        FavoritesView::Empty => out.push_str("Nothing yet saved.\n"),
        FavoritesView::Groups(groups) => {
            for group in groups {
                let _ = writeln!(out, "{}", group.city);
                for offer in &group.offers {
                    offer_line(&mut out, offer, false);
                }
            }
        }
    }
    out
}
