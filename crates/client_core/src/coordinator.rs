//! Async coordinators: one API call followed by a bounded run of dispatches.
//!
//! Coordinators never return errors. Failures become `offers/setError` (or an
//! authorization update) and the caller gets an outcome value instead.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::{City, Offer, OfferId};
use tracing::{debug, info, warn};

use crate::{
    api::RentalApi,
    store::{Action, Store},
};

pub const FETCH_OFFERS_FAILED: &str = "Failed to fetch offers.";
pub const LOGIN_FAILED: &str = "Failed to login.";
pub const FAVORITE_FAILED: &str = "Failed to update favorites.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch started before this one finished; nothing was dispatched.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authorized,
    Unauthorized,
    Failed,
}

pub struct Coordinator {
    store: Arc<Store>,
    api: Arc<dyn RentalApi>,
    latest_offers_ticket: AtomicU64,
}

/// Resets `loading` when dropped, unless a newer fetch owns the flag by then.
struct LoadingReset<'a> {
    store: &'a Store,
    latest: &'a AtomicU64,
    ticket: u64,
}

impl LoadingReset<'_> {
    fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.ticket
    }
}

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        if self.is_current() {
            self.store.dispatch(Action::SetLoading(false));
        }
    }
}

impl Coordinator {
    pub fn new(store: Arc<Store>, api: Arc<dyn RentalApi>) -> Self {
        Self {
            store,
            api,
            latest_offers_ticket: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn api(&self) -> &Arc<dyn RentalApi> {
        &self.api
    }

    /// Loads every offer, keeps those in `city` and replaces the list.
    ///
    /// Only the most recently started call applies its result. On failure the
    /// previous items stay in place.
    pub async fn fetch_offers_by_city(&self, city: City) -> FetchOutcome {
        let ticket = self.latest_offers_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.dispatch(Action::SetLoading(true));
        let reset = LoadingReset {
            store: &self.store,
            latest: &self.latest_offers_ticket,
            ticket,
        };

        let result = self.api.fetch_offers().await;
        if !reset.is_current() {
            debug!(city = %city.name, ticket, "dropping superseded offers response");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(all_offers) => {
                let filtered: Vec<Offer> = all_offers
                    .into_iter()
                    .filter(|offer| offer.city.name == city.name)
                    .collect();
                info!(city = %city.name, count = filtered.len(), "offers loaded");
                self.store.dispatch(Action::SetOffers(filtered));
                self.store.dispatch(Action::SetCity(city));
                self.store.dispatch(Action::SetError(None));
                FetchOutcome::Applied
            }
            Err(error) => {
                warn!(city = %city.name, %error, "failed to fetch offers");
                self.store
                    .dispatch(Action::SetError(Some(FETCH_OFFERS_FAILED.to_string())));
                FetchOutcome::Failed
            }
        }
    }

    pub async fn login(&self) -> LoginOutcome {
        match self.api.check_login().await {
            Ok(user) => {
                match user {
                    Some(user) => info!(email = %user.email, "session is authorized"),
                    None => info!("session is authorized"),
                }
                self.store.dispatch(Action::SetAuthorizationStatus(true));
                LoginOutcome::Authorized
            }
            Err(error) if error.is_unauthorized() => {
                info!("session is not authorized");
                self.store.dispatch(Action::SetAuthorizationStatus(false));
                LoginOutcome::Unauthorized
            }
            Err(error) => {
                warn!(%error, "login check failed");
                self.store
                    .dispatch(Action::SetError(Some(LOGIN_FAILED.to_string())));
                LoginOutcome::Failed
            }
        }
    }

    /// Returns the server-confirmed offer, or `None` when the update failed.
    pub async fn toggle_favorite(&self, offer_id: &OfferId, is_favorite: bool) -> Option<Offer> {
        match self.api.set_favorite(offer_id, is_favorite).await {
            Ok(offer) => {
                self.store.dispatch(Action::SetFavorite {
                    offer_id: offer.id.clone(),
                    is_favorite: offer.is_favorite,
                });
                Some(offer)
            }
            Err(error) if error.is_unauthorized() => {
                warn!(%offer_id, "favorite update requires authorization");
                self.store.dispatch(Action::SetAuthorizationStatus(false));
                None
            }
            Err(error) => {
                warn!(%offer_id, %error, "failed to update favorite");
                self.store
                    .dispatch(Action::SetError(Some(FAVORITE_FAILED.to_string())));
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
