use std::{collections::HashMap, path::Path};

use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use shared::{
    domain::{Comment, CommentAuthor, CommentId, Offer, OfferId},
    error::{ApiError, ErrorCode, ValidationError},
    protocol::CommentPost,
    schema::Validate,
};
use uuid::Uuid;

/// Longest review the backend stores. Clients only enforce the lower bound.
pub const MAX_STORED_COMMENT_CHARS: usize = 300;

#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub comments: HashMap<OfferId, Vec<Comment>>,
}

/// In-memory listing data served by the fixture backend.
#[derive(Debug, Default)]
pub struct Catalog {
    offers: Vec<Offer>,
    comments: HashMap<OfferId, Vec<Comment>>,
}

impl Catalog {
    pub fn new(fixture: Fixture) -> anyhow::Result<Self> {
        fixture
            .offers
            .validate()
            .context("fixture contains an invalid offer")?;
        Ok(Self {
            offers: fixture.offers,
            comments: fixture.comments,
        })
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read fixture '{}'", path.display()))?;
        let fixture: Fixture = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse fixture '{}'", path.display()))?;
        Self::new(fixture)
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn offer(&self, offer_id: &OfferId) -> Result<&Offer, ApiError> {
        self.offers
            .iter()
            .find(|offer| &offer.id == offer_id)
            .ok_or_else(|| not_found(offer_id))
    }

    /// Other offers in the same city, in catalogue order.
    pub fn neighbours(&self, offer_id: &OfferId) -> Result<Vec<Offer>, ApiError> {
        let subject = self.offer(offer_id)?;
        Ok(self
            .offers
            .iter()
            .filter(|offer| offer.city.name == subject.city.name && offer.id != subject.id)
            .cloned()
            .collect())
    }

    pub fn comments(&self, offer_id: &OfferId) -> Result<Vec<Comment>, ApiError> {
        self.offer(offer_id)?;
        Ok(self.comments.get(offer_id).cloned().unwrap_or_default())
    }

    pub fn add_comment(
        &mut self,
        offer_id: &OfferId,
        post: CommentPost,
        author: CommentAuthor,
    ) -> Result<Comment, ApiError> {
        self.offer(offer_id)?;
        post.validate()
            .map_err(|err| ApiError::new(ErrorCode::Validation, err.to_string()))?;
        let chars = post.comment.chars().count();
        if chars > MAX_STORED_COMMENT_CHARS {
            let err = ValidationError::CommentTooLong {
                max: MAX_STORED_COMMENT_CHARS,
                actual: chars,
            };
            return Err(ApiError::new(ErrorCode::Validation, err.to_string()));
        }

        let comment = Comment {
            id: CommentId::new(Uuid::new_v4().to_string()),
            date: Utc::now(),
            user: author,
            comment: post.comment,
            rating: post.rating,
        };
        self.comments
            .entry(offer_id.clone())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    pub fn favorites(&self) -> Vec<Offer> {
        self.offers
            .iter()
            .filter(|offer| offer.is_favorite)
            .cloned()
            .collect()
    }

    pub fn set_favorite(&mut self, offer_id: &OfferId, status: u8) -> Result<Offer, ApiError> {
        let is_favorite = match status {
            0 => false,
            1 => true,
            other => {
                return Err(ApiError::new(
                    ErrorCode::Validation,
                    format!("favorite status must be 0 or 1, got {other}"),
                ))
            }
        };
        let offer = self
            .offers
            .iter_mut()
            .find(|offer| &offer.id == offer_id)
            .ok_or_else(|| not_found(offer_id))?;
        offer.is_favorite = is_favorite;
        Ok(offer.clone())
    }
}

fn not_found(offer_id: &OfferId) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("offer {offer_id} not found"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
