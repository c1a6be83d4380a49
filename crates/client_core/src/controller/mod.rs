//! Controller layer: per-route orchestration over the store and coordinators.

pub mod comment_form;
pub mod favorites_page;
pub mod main_page;
pub mod offer_page;

use shared::domain::OfferId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Root,
    Login,
    Favorites,
    Offer(OfferId),
    NotFound,
}

impl AppRoute {
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match trimmed {
            "" | "/" => Self::Root,
            "/login" => Self::Login,
            "/favorites" => Self::Favorites,
            other => match other.strip_prefix("/offer/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Offer(OfferId::new(id)),
                _ => Self::NotFound,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".into(),
            Self::Login => "/login".into(),
            Self::Favorites => "/favorites".into(),
            Self::Offer(id) => format!("/offer/{id}"),
            Self::NotFound => "/404".into(),
        }
    }
}
