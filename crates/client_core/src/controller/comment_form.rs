//! Review form state and its submit rule.

use shared::{
    error::ValidationError,
    protocol::{CommentPost, MIN_COMMENT_CHARS},
    schema::Validate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub comment: String,
    pub rating: u8,
}

impl CommentDraft {
    pub fn new(comment: impl Into<String>, rating: u8) -> Self {
        Self {
            comment: comment.into(),
            rating,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_post().validate()
    }

    pub fn to_post(&self) -> CommentPost {
        CommentPost {
            comment: self.comment.clone(),
            rating: self.rating,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    comment: String,
    rating: u8,
    is_submitting: bool,
}

impl CommentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Ratings outside 1..=5 reset the selection.
    pub fn set_rating(&mut self, rating: u8) {
        self.rating = if (1..=5).contains(&rating) { rating } else { 0 };
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn can_submit(&self) -> bool {
        let chars = self.comment.chars().count();
        !self.is_submitting && chars >= MIN_COMMENT_CHARS && self.rating != 0
    }

    /// Hands out the draft and clears the form, or `None` when submit is disabled.
    pub fn take_draft(&mut self) -> Option<CommentDraft> {
        if !self.can_submit() {
            return None;
        }
        self.is_submitting = true;
        let draft = CommentDraft {
            comment: std::mem::take(&mut self.comment),
            rating: std::mem::take(&mut self.rating),
        };
        self.is_submitting = false;
        Some(draft)
    }
}
