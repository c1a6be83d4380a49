//! Headless client for the rental listing backend: typed REST access, a
//! reducer-driven store, async coordinators and per-page controllers.

pub mod api;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod store;
pub mod view;

pub use api::{HttpApiBuildError, HttpRentalApi, RentalApi};
pub use controller::{
    comment_form::{CommentDraft, CommentForm},
    favorites_page::{FavoritesPageController, FavoritesView},
    main_page::{MainPageController, MainPageView},
    offer_page::{OfferDetails, OfferPageController, OfferPagePhase, OfferPageView},
    AppRoute,
};
pub use coordinator::{Coordinator, FetchOutcome, LoginOutcome};
pub use error::ClientError;
pub use store::{Action, AppState, Store};

#[cfg(test)]
#[path = "tests/support.rs"]
mod tests_support;
