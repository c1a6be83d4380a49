//! Offer detail page.
//!
//! Phases: `Idle -> Loading -> {Ready | NotFound}`. Only a different offer id
//! re-enters `Loading`. The offer, its comments and its neighbours are fetched
//! concurrently and each result is applied as soon as it arrives; results for
//! an id the page has since moved away from are dropped.

use std::sync::{Arc, Mutex, PoisonError};

use shared::domain::{Comment, Offer, OfferId, Point};
use tracing::{info, warn};

use crate::{
    controller::{comment_form::CommentDraft, AppRoute},
    coordinator::Coordinator,
    error::ClientError,
    store::selectors,
    view::{map_markers, pluralize, rating_width_percent, MapMarker},
};

pub const OFFER_FETCH_FAILED: &str = "Could not fetch the offer-page details.";
pub const MAX_NEARBY_OFFERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferPagePhase {
    #[default]
    Idle,
    Loading,
    Ready,
    NotFound,
}

#[derive(Default)]
struct OfferPageState {
    generation: u64,
    offer_id: Option<OfferId>,
    phase: OfferPagePhase,
    offer: Option<Offer>,
    error: Option<String>,
    comments: Vec<Comment>,
    nearby: Vec<Offer>,
    subject_point: Option<Point>,
    nearby_points: Vec<Point>,
    comment_error: Option<String>,
}

impl OfferPageState {
    fn points(&self) -> Vec<Point> {
        self.subject_point
            .iter()
            .chain(self.nearby_points.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferDetails {
    pub offer: Offer,
    pub comments: Vec<Comment>,
    pub nearby: Vec<Offer>,
    pub points: Vec<Point>,
    pub selected_point: Point,
    pub markers: Vec<MapMarker>,
    pub bedrooms_text: String,
    pub adults_text: String,
    pub rating_width: f64,
    pub can_comment: bool,
    pub comment_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OfferPageView {
    Loading,
    Redirect(AppRoute),
    Ready(Box<OfferDetails>),
}

pub struct OfferPageController {
    coordinator: Arc<Coordinator>,
    state: Mutex<OfferPageState>,
}

impl OfferPageController {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self {
            coordinator,
            state: Mutex::new(OfferPageState::default()),
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut OfferPageState) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Runs `f` only while the page still shows the load `generation` started.
    fn apply(&self, generation: u64, f: impl FnOnce(&mut OfferPageState)) -> bool {
        self.with_state(|state| {
            if state.generation != generation {
                return false;
            }
            f(state);
            true
        })
    }

    pub fn phase(&self) -> OfferPagePhase {
        self.with_state(|state| state.phase)
    }

    pub fn offer_id(&self) -> Option<OfferId> {
        self.with_state(|state| state.offer_id.clone())
    }

    pub fn offer(&self) -> Option<Offer> {
        self.with_state(|state| state.offer.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.with_state(|state| state.error.clone())
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.with_state(|state| state.comments.clone())
    }

    pub fn nearby_offers(&self) -> Vec<Offer> {
        self.with_state(|state| state.nearby.clone())
    }

    pub fn points(&self) -> Vec<Point> {
        self.with_state(|state| state.points())
    }

    pub fn can_comment(&self) -> bool {
        self.coordinator
            .store()
            .select(selectors::authorization_status)
            .is_authorized()
    }

    /// Loads `offer_id` unless the page already shows it.
    pub async fn mount(&self, offer_id: OfferId) {
        let generation = self.with_state(|state| {
            if state.offer_id.as_ref() == Some(&offer_id) && state.phase != OfferPagePhase::Idle
            {
                return None;
            }
            let generation = state.generation + 1;
            *state = OfferPageState {
                generation,
                offer_id: Some(offer_id.clone()),
                phase: OfferPagePhase::Loading,
                ..OfferPageState::default()
            };
            Some(generation)
        });
        let Some(generation) = generation else {
            return;
        };

        info!(%offer_id, "loading offer page");
        let api = self.coordinator.api();

        let offer_task = async {
            let result = api.fetch_offer(&offer_id).await;
            self.apply(generation, |state| match result {
                Ok(offer) => {
                    state.subject_point = Some(Point::from(&offer));
                    state.offer = Some(offer);
                    state.phase = OfferPagePhase::Ready;
                }
                Err(error) => {
                    warn!(%offer_id, %error, "failed to fetch offer");
                    state.error = Some(OFFER_FETCH_FAILED.to_string());
                    state.phase = OfferPagePhase::NotFound;
                }
            });
        };

        let comments_task = async {
            let result = api.fetch_comments(&offer_id).await;
            self.apply(generation, |state| match result {
                Ok(comments) => state.comments = comments,
                Err(error) => warn!(%offer_id, %error, "failed to fetch comments"),
            });
        };

        let nearby_task = async {
            let result = api.fetch_nearby_offers(&offer_id).await;
            self.apply(generation, |state| match result {
                Ok(mut nearby) => {
                    nearby.truncate(MAX_NEARBY_OFFERS);
                    state.nearby_points.extend(nearby.iter().map(Point::from));
                    state.nearby = nearby;
                }
                Err(error) => warn!(%offer_id, %error, "failed to fetch nearby offers"),
            });
        };

        futures::join!(offer_task, comments_task, nearby_task);
    }

    /// Posts a review for `offer_id` and appends the server's copy on success.
    pub async fn submit_comment(
        &self,
        offer_id: &OfferId,
        draft: CommentDraft,
    ) -> Result<Comment, ClientError> {
        if !self.can_comment() {
            return Err(ClientError::NotAuthorized);
        }
        draft.validate()?;

        match self
            .coordinator
            .api()
            .post_comment(offer_id, &draft.to_post())
            .await
        {
            Ok(comment) => {
                self.with_state(|state| {
                    if state.offer_id.as_ref() == Some(offer_id) {
                        state.comments.push(comment.clone());
                        state.comment_error = None;
                    }
                });
                Ok(comment)
            }
            Err(error) => {
                warn!(%offer_id, %error, "failed to post comment");
                self.with_state(|state| {
                    if state.offer_id.as_ref() == Some(offer_id) {
                        state.comment_error = Some(error.to_string());
                    }
                });
                Err(error)
            }
        }
    }

    /// Returns whether the server confirmed the change.
    pub async fn toggle_favorite(&self, is_favorite: bool) -> bool {
        let Some(offer_id) = self.with_state(|state| state.offer.as_ref().map(|o| o.id.clone()))
        else {
            return false;
        };

        let Some(updated) = self
            .coordinator
            .toggle_favorite(&offer_id, is_favorite)
            .await
        else {
            return false;
        };

        self.with_state(|state| {
            if let Some(offer) = state.offer.as_mut().filter(|offer| offer.id == updated.id) {
                offer.is_favorite = updated.is_favorite;
            }
            for nearby in state.nearby.iter_mut().filter(|o| o.id == updated.id) {
                nearby.is_favorite = updated.is_favorite;
            }
        });
        true
    }

    pub fn view(&self) -> OfferPageView {
        let can_comment = self.can_comment();
        self.with_state(|state| match (state.phase, &state.offer) {
            (OfferPagePhase::Idle | OfferPagePhase::Loading, _) => OfferPageView::Loading,
            (OfferPagePhase::NotFound, _) | (OfferPagePhase::Ready, None) => {
                OfferPageView::Redirect(AppRoute::NotFound)
            }
            (OfferPagePhase::Ready, Some(offer)) => {
                let points = state.points();
                let selected_point = Point::from(offer);
                let markers = map_markers(&points, Some(&selected_point));
                OfferPageView::Ready(Box::new(OfferDetails {
                    offer: offer.clone(),
                    comments: state.comments.clone(),
                    nearby: state.nearby.clone(),
                    points,
                    selected_point,
                    markers,
                    bedrooms_text: pluralize(offer.bedrooms, "Bedroom", "Bedrooms"),
                    adults_text: pluralize(offer.max_adults, "adult", "adults"),
                    rating_width: rating_width_percent(offer.rating),
                    can_comment,
                    comment_error: state.comment_error.clone(),
                }))
            }
        })
    }
}

#[cfg(test)]
#[path = "../tests/offer_page_tests.rs"]
mod tests;
