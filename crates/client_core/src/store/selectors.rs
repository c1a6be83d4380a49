//! Named reads over [`AppState`], for use with [`super::Store::select`].

use shared::domain::{AuthorizationStatus, City, Offer};

use super::reducer::{AppState, AuthState, OffersState};

pub fn offers(state: &AppState) -> OffersState {
    state.offers.clone()
}

pub fn offer_items(state: &AppState) -> Vec<Offer> {
    state.offers.items.clone()
}

pub fn is_loading(state: &AppState) -> bool {
    state.offers.loading
}

pub fn error(state: &AppState) -> Option<String> {
    state.offers.error.clone()
}

pub fn city(state: &AppState) -> Option<City> {
    state.offers.city.clone()
}

pub fn auth(state: &AppState) -> AuthState {
    state.auth.clone()
}

pub fn authorization_status(state: &AppState) -> AuthorizationStatus {
    state.auth.authorization_status
}
