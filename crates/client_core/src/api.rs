//! REST client for the listing backend.
//!
//! Every response body is decoded into typed payloads and checked with
//! [`Validate`] before it is handed to callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Comment, Offer, OfferId},
    error::ApiError,
    protocol::{
        comments_route, favorite_status_route, favorites_route, login_route, neighbours_route,
        offer_route, offers_route, CommentPost, LoginResponse, AUTH_TOKEN_HEADER,
    },
    schema::Validate,
};
use tracing::debug;

use crate::{
    config::{normalize_base_url, Settings, SettingsError},
    error::ClientError,
};

#[async_trait]
pub trait RentalApi: Send + Sync {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, ClientError>;
    async fn fetch_offer(&self, offer_id: &OfferId) -> Result<Offer, ClientError>;
    async fn fetch_nearby_offers(&self, offer_id: &OfferId) -> Result<Vec<Offer>, ClientError>;
    async fn fetch_comments(&self, offer_id: &OfferId) -> Result<Vec<Comment>, ClientError>;
    async fn post_comment(
        &self,
        offer_id: &OfferId,
        post: &CommentPost,
    ) -> Result<Comment, ClientError>;
    /// Any 2xx means the session is authorized; the user body is optional.
    /// A 401 surfaces as `ClientError::Http`.
    async fn check_login(&self) -> Result<Option<LoginResponse>, ClientError>;
    async fn fetch_favorites(&self) -> Result<Vec<Offer>, ClientError>;
    async fn set_favorite(&self, offer_id: &OfferId, is_favorite: bool)
        -> Result<Offer, ClientError>;
}

pub struct HttpRentalApi {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpRentalApi {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> Result<Self, HttpApiBuildError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpApiBuildError::Client)?;
        Ok(Self {
            http,
            base_url,
            auth_token,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, HttpApiBuildError> {
        Self::new(
            &settings.api_base_url,
            settings.request_timeout(),
            settings.auth_token.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.header(AUTH_TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn get_json<T>(&self, route: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let response = self
            .authorized(self.http.get(self.url(route)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(route, response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpApiBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ApiError>(&body)
        .map(|api_error| api_error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
    Err(ClientError::Http { status, message })
}

async fn decode<T>(route: &str, response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned + Validate,
{
    let response = ensure_success(response).await?;
    let body = response.bytes().await.map_err(ClientError::Network)?;
    let payload: T =
        serde_json::from_slice(&body).map_err(|err| ClientError::InvalidResponse {
            route: route.to_string(),
            reason: err.to_string(),
        })?;
    payload
        .validate()
        .map_err(|err| ClientError::InvalidResponse {
            route: route.to_string(),
            reason: err.to_string(),
        })?;
    debug!(route, bytes = body.len(), "decoded response");
    Ok(payload)
}

#[async_trait]
impl RentalApi for HttpRentalApi {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, ClientError> {
        self.get_json(offers_route()).await
    }

    async fn fetch_offer(&self, offer_id: &OfferId) -> Result<Offer, ClientError> {
        self.get_json(&offer_route(offer_id)).await
    }

    async fn fetch_nearby_offers(&self, offer_id: &OfferId) -> Result<Vec<Offer>, ClientError> {
        self.get_json(&neighbours_route(offer_id)).await
    }

    async fn fetch_comments(&self, offer_id: &OfferId) -> Result<Vec<Comment>, ClientError> {
        self.get_json(&comments_route(offer_id)).await
    }

    async fn post_comment(
        &self,
        offer_id: &OfferId,
        post: &CommentPost,
    ) -> Result<Comment, ClientError> {
        let route = comments_route(offer_id);
        let response = self
            .authorized(self.http.post(self.url(&route)))
            .json(post)
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(&route, response).await
    }

    async fn check_login(&self) -> Result<Option<LoginResponse>, ClientError> {
        let route = login_route();
        let response = self
            .authorized(self.http.get(self.url(route)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(ClientError::Network)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let user = serde_json::from_slice::<LoginResponse>(&body)
            .map_err(|err| err.to_string())
            .and_then(|user| user.validate().map(|()| user).map_err(|err| err.to_string()));
        match user {
            Ok(user) => Ok(Some(user)),
            Err(reason) => {
                debug!(route, %reason, "ignoring unreadable login body");
                Ok(None)
            }
        }
    }

    async fn fetch_favorites(&self) -> Result<Vec<Offer>, ClientError> {
        self.get_json(favorites_route()).await
    }

    async fn set_favorite(
        &self,
        offer_id: &OfferId,
        is_favorite: bool,
    ) -> Result<Offer, ClientError> {
        let route = favorite_status_route(offer_id, is_favorite);
        let response = self
            .authorized(self.http.post(self.url(&route)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(&route, response).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
