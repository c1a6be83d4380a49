//! Fixtures and a scripted `RentalApi` shared by the unit tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use shared::{
    domain::{City, CityName, Comment, CommentAuthor, CommentId, Location, Offer, OfferId},
    protocol::{CommentPost, LoginResponse},
};
use tokio::sync::oneshot;

use crate::{api::RentalApi, error::ClientError};

pub fn offer(id: &str, city: CityName) -> Offer {
    let city = City::default_for(city);
    Offer {
        id: OfferId::new(id),
        title: format!("Offer {id}"),
        kind: "apartment".into(),
        price: 120.0,
        rating: 4.0,
        is_premium: false,
        is_favorite: false,
        location: Location {
            latitude: city.location.latitude + 0.001,
            longitude: city.location.longitude + 0.001,
            zoom: 16,
        },
        city,
        preview_image: None,
        bedrooms: 2,
        max_adults: 3,
        goods: vec!["Wi-Fi".into()],
        images: vec!["img/1.jpg".into()],
        description: "Quiet place".into(),
        host: None,
    }
}

pub fn comment(id: &str, text: &str, rating: u8) -> Comment {
    Comment {
        id: CommentId::new(id),
        date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        user: CommentAuthor {
            name: "Oliver".into(),
            avatar_url: String::new(),
            is_pro: false,
        },
        comment: text.into(),
        rating,
    }
}

pub fn http_error(status: StatusCode) -> ClientError {
    ClientError::Http {
        status,
        message: status.to_string(),
    }
}

pub fn long_text() -> String {
    "A calm flat with a great view over the river and friendly hosts.".to_string()
}

type Reply<T> = Result<T, ClientError>;

/// Queued reply, optionally held until the test releases its gate.
pub struct Scripted<T> {
    reply: Reply<T>,
    gate: Option<oneshot::Receiver<()>>,
}

impl<T> Scripted<T> {
    pub fn now(reply: Reply<T>) -> Self {
        Self { reply, gate: None }
    }

    pub fn gated(reply: Reply<T>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                reply,
                gate: Some(rx),
            },
            tx,
        )
    }

    async fn resolve(self) -> Reply<T> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.reply
    }
}

#[derive(Default)]
pub struct StubApi {
    pub offers: Mutex<VecDeque<Scripted<Vec<Offer>>>>,
    pub offer: Mutex<VecDeque<Scripted<Offer>>>,
    pub nearby: Mutex<VecDeque<Scripted<Vec<Offer>>>>,
    pub comments: Mutex<VecDeque<Scripted<Vec<Comment>>>>,
    pub posted: Mutex<VecDeque<Scripted<Comment>>>,
    pub login: Mutex<VecDeque<Scripted<Option<LoginResponse>>>>,
    pub favorites: Mutex<VecDeque<Scripted<Vec<Offer>>>>,
    pub favorite_updates: Mutex<VecDeque<Scripted<Offer>>>,
    pub calls: Mutex<HashMap<&'static str, usize>>,
    pub comment_posts: Mutex<Vec<(OfferId, CommentPost)>>,
}

fn pop<T>(queue: &Mutex<VecDeque<Scripted<T>>>, name: &str) -> Scripted<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("no scripted reply left for {name}"))
}

impl StubApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push<T>(queue: &Mutex<VecDeque<Scripted<T>>>, scripted: Scripted<T>) {
        queue.lock().unwrap().push_back(scripted);
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    fn record(&self, name: &'static str) {
        *self.calls.lock().unwrap().entry(name).or_default() += 1;
    }
}

pub fn login_body() -> LoginResponse {
    LoginResponse {
        name: "Oliver".into(),
        email: "oliver@example.test".into(),
        avatar_url: String::new(),
        is_pro: false,
    }
}

#[async_trait]
impl RentalApi for StubApi {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, ClientError> {
        self.record("fetch_offers");
        let next = pop(&self.offers, "fetch_offers");
        next.resolve().await
    }

    async fn fetch_offer(&self, _offer_id: &OfferId) -> Result<Offer, ClientError> {
        self.record("fetch_offer");
        let next = pop(&self.offer, "fetch_offer");
        next.resolve().await
    }

    async fn fetch_nearby_offers(&self, _offer_id: &OfferId) -> Result<Vec<Offer>, ClientError> {
        self.record("fetch_nearby_offers");
        let next = pop(&self.nearby, "fetch_nearby_offers");
        next.resolve().await
    }

    async fn fetch_comments(&self, _offer_id: &OfferId) -> Result<Vec<Comment>, ClientError> {
        self.record("fetch_comments");
        let next = pop(&self.comments, "fetch_comments");
        next.resolve().await
    }

    async fn post_comment(
        &self,
        offer_id: &OfferId,
        post: &CommentPost,
    ) -> Result<Comment, ClientError> {
        self.record("post_comment");
        self.comment_posts
            .lock()
            .unwrap()
            .push((offer_id.clone(), post.clone()));
        let next = pop(&self.posted, "post_comment");
        next.resolve().await
    }

    async fn check_login(&self) -> Result<Option<LoginResponse>, ClientError> {
        self.record("check_login");
        let next = pop(&self.login, "check_login");
        next.resolve().await
    }

    async fn fetch_favorites(&self) -> Result<Vec<Offer>, ClientError> {
        self.record("fetch_favorites");
        let next = pop(&self.favorites, "fetch_favorites");
        next.resolve().await
    }

    async fn set_favorite(
        &self,
        _offer_id: &OfferId,
        _is_favorite: bool,
    ) -> Result<Offer, ClientError> {
        self.record("set_favorite");
        let next = pop(&self.favorite_updates, "set_favorite");
        next.resolve().await
    }
}
