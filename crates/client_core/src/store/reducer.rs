//! Pure state transitions, one reducer per subtree.

use shared::domain::{AuthorizationStatus, City, Offer};

use super::action::Action;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffersState {
    pub items: Vec<Offer>,
    pub loading: bool,
    pub error: Option<String>,
    pub city: Option<City>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub authorization_status: AuthorizationStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub offers: OffersState,
    pub auth: AuthState,
}

pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        offers: offers_reducer(state.offers, action),
        auth: auth_reducer(state.auth, action),
    }
}

pub fn offers_reducer(mut state: OffersState, action: &Action) -> OffersState {
    match action {
        Action::SetLoading(loading) => state.loading = *loading,
        Action::SetOffers(items) => state.items = items.clone(),
        Action::SetError(error) => state.error = error.clone(),
        Action::SetCity(city) => state.city = Some(city.clone()),
        Action::SetFavorite {
            offer_id,
            is_favorite,
        } => {
            for offer in state.items.iter_mut().filter(|offer| &offer.id == offer_id) {
                offer.is_favorite = *is_favorite;
            }
        }
        Action::SetAuthorizationStatus(_) => {}
    }
    state
}

pub fn auth_reducer(mut state: AuthState, action: &Action) -> AuthState {
    if let Action::SetAuthorizationStatus(authorized) = action {
        state.authorization_status = AuthorizationStatus::from(*authorized);
    }
    state
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
