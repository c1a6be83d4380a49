use serde::{Deserialize, Serialize};

use crate::domain::OfferId;

pub const MIN_COMMENT_CHARS: usize = 50;

/// Header carrying the session token on every request.
pub const AUTH_TOKEN_HEADER: &str = "X-Token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPost {
    pub comment: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

pub fn offers_route() -> &'static str {
    "/offers"
}

pub fn offer_route(offer_id: &OfferId) -> String {
    format!("/offers/{offer_id}")
}

pub fn neighbours_route(offer_id: &OfferId) -> String {
    format!("/offers/{offer_id}/neighbours")
}

pub fn comments_route(offer_id: &OfferId) -> String {
    format!("/comments/{offer_id}")
}

pub fn login_route() -> &'static str {
    "/login"
}

pub fn favorites_route() -> &'static str {
    "/favorite"
}

/// `status` is encoded as `1` (add) or `0` (remove).
pub fn favorite_status_route(offer_id: &OfferId, is_favorite: bool) -> String {
    format!("/favorite/{offer_id}/{}", u8::from(is_favorite))
}
