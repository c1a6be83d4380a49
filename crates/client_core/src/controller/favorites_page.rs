use std::sync::Arc;

use shared::domain::{CityName, Offer, OfferId, CITIES};
use tracing::warn;

use crate::{controller::AppRoute, coordinator::Coordinator, store::selectors};

pub const FAVORITES_FETCH_FAILED: &str = "Failed to fetch favorites.";

#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesGroup {
    pub city: CityName,
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesView {
    Loading,
    Redirect(AppRoute),
    Error(String),
    Empty,
    Groups(Vec<FavoritesGroup>),
}

#[derive(Default)]
struct FavoritesState {
    loading: bool,
    loaded: bool,
    error: Option<String>,
    offers: Vec<Offer>,
}

pub struct FavoritesPageController {
    coordinator: Arc<Coordinator>,
    state: FavoritesState,
}

impl FavoritesPageController {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self {
            coordinator,
            state: FavoritesState::default(),
        }
    }

    fn is_authorized(&self) -> bool {
        self.coordinator
            .store()
            .select(selectors::authorization_status)
            .is_authorized()
    }

    pub async fn mount(&mut self) {
        if !self.is_authorized() {
            return;
        }
        self.state.loading = true;
        self.state.error = None;
        match self.coordinator.api().fetch_favorites().await {
            Ok(offers) => {
                self.state.offers = offers.into_iter().filter(|o| o.is_favorite).collect();
                self.state.loaded = true;
            }
            Err(error) => {
                warn!(%error, "failed to fetch favorites");
                self.state.error = Some(FAVORITES_FETCH_FAILED.to_string());
            }
        }
        self.state.loading = false;
    }

    /// Un-favoriting removes the card once the server confirms it.
    pub async fn remove(&mut self, offer_id: &OfferId) -> bool {
        match self.coordinator.toggle_favorite(offer_id, false).await {
            Some(updated) if !updated.is_favorite => {
                self.state.offers.retain(|offer| &offer.id != offer_id);
                true
            }
            _ => false,
        }
    }

    pub fn view(&self) -> FavoritesView {
        if !self.is_authorized() {
            return FavoritesView::Redirect(AppRoute::Login);
        }
        if let Some(error) = &self.state.error {
            return FavoritesView::Error(error.clone());
        }
        if self.state.loading || !self.state.loaded {
            return FavoritesView::Loading;
        }
        let groups = group_by_city(&self.state.offers);
        if groups.is_empty() {
            FavoritesView::Empty
        } else {
            FavoritesView::Groups(groups)
        }
    }
}

/// Groups in the canonical city order; cities without favorites are skipped.
pub fn group_by_city(offers: &[Offer]) -> Vec<FavoritesGroup> {
    CITIES
        .into_iter()
        .filter_map(|city| {
            let offers: Vec<Offer> = offers
                .iter()
                .filter(|offer| offer.city.name == city)
                .cloned()
                .collect();
            (!offers.is_empty()).then_some(FavoritesGroup { city, offers })
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/favorites_page_tests.rs"]
mod tests;
