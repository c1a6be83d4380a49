//! Boundary checks applied to every decoded payload before it reaches state.

use crate::{
    domain::{Comment, Location, Offer},
    error::ValidationError,
    protocol::{CommentPost, LoginResponse, MIN_COMMENT_CHARS},
};

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

fn check_location(entity: &'static str, location: &Location) -> Result<(), ValidationError> {
    if !location.latitude.is_finite() || !(-90.0..=90.0).contains(&location.latitude) {
        return Err(ValidationError::OutOfRange {
            entity,
            field: "latitude",
            value: location.latitude.to_string(),
        });
    }
    if !location.longitude.is_finite() || !(-180.0..=180.0).contains(&location.longitude) {
        return Err(ValidationError::OutOfRange {
            entity,
            field: "longitude",
            value: location.longitude.to_string(),
        });
    }
    Ok(())
}

impl Validate for Offer {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ValidationError::Empty {
                entity: "offer",
                field: "id",
            });
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ValidationError::OutOfRange {
                entity: "offer",
                field: "price",
                value: self.price.to_string(),
            });
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                entity: "offer",
                field: "rating",
                value: self.rating.to_string(),
            });
        }
        check_location("offer", &self.location)?;
        check_location("city", &self.city.location)
    }
}

impl Validate for Comment {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.comment.trim().is_empty() {
            return Err(ValidationError::Empty {
                entity: "comment",
                field: "comment",
            });
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                entity: "comment",
                field: "rating",
                value: self.rating.to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for CommentPost {
    fn validate(&self) -> Result<(), ValidationError> {
        let chars = self.comment.chars().count();
        if chars < MIN_COMMENT_CHARS {
            return Err(ValidationError::CommentTooShort {
                min: MIN_COMMENT_CHARS,
                actual: chars,
            });
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingUnset(self.rating));
        }
        Ok(())
    }
}

impl Validate for LoginResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Empty {
                entity: "login",
                field: "email",
            });
        }
        Ok(())
    }
}
