use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::{Comment, CommentAuthor, Offer, OfferId},
    error::{ApiError, ErrorCode},
    protocol::{CommentPost, LoginResponse, AUTH_TOKEN_HEADER},
};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

mod api;
mod app_state;
mod config;

use api::Catalog;
use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let catalog = Catalog::load(&settings.fixtures_path)
        .await
        .map_err(|error| {
            error!(
                path = %settings.fixtures_path.display(),
                %error,
                "failed to load fixture catalogue"
            );
            error
        })?;
    info!(offers = catalog.offers().len(), "fixture catalogue loaded");

    let state = AppState {
        catalog: RwLock::new(catalog),
        auth_token: settings.auth_token,
        user: default_user(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, "fixture backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn default_user() -> LoginResponse {
    LoginResponse {
        name: "Oliver".into(),
        email: "oliver.conner@gmail.com".into(),
        avatar_url: "img/avatar-max.jpg".into(),
        is_pro: false,
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/offers", get(list_offers))
        .route("/offers/:offer_id", get(get_offer))
        .route("/offers/:offer_id/neighbours", get(list_neighbours))
        .route(
            "/comments/:offer_id",
            get(list_comments).post(create_comment),
        )
        .route("/login", get(login))
        .route("/favorite", get(list_favorites))
        .route(
            "/favorite/:offer_id/:status",
            get(set_favorite).post(set_favorite),
        )
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

fn require_auth(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<ApiError>)> {
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if token == Some(state.auth_token.as_str()) {
        return Ok(());
    }
    warn!("request without a valid session token");
    Err(reject(ApiError::new(
        ErrorCode::Unauthorized,
        "a valid session token is required",
    )))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_offers(State(state): State<Arc<AppState>>) -> Json<Vec<Offer>> {
    Json(state.catalog.read().await.offers().to_vec())
}

async fn get_offer(
    State(state): State<Arc<AppState>>,
    Path(offer_id): Path<OfferId>,
) -> ApiResult<Offer> {
    let catalog = state.catalog.read().await;
    catalog.offer(&offer_id).cloned().map(Json).map_err(reject)
}

async fn list_neighbours(
    State(state): State<Arc<AppState>>,
    Path(offer_id): Path<OfferId>,
) -> ApiResult<Vec<Offer>> {
    let catalog = state.catalog.read().await;
    catalog.neighbours(&offer_id).map(Json).map_err(reject)
}

async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(offer_id): Path<OfferId>,
) -> ApiResult<Vec<Comment>> {
    let catalog = state.catalog.read().await;
    catalog.comments(&offer_id).map(Json).map_err(reject)
}

async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(offer_id): Path<OfferId>,
    headers: HeaderMap,
    Json(post): Json<CommentPost>,
) -> ApiResult<Comment> {
    require_auth(&state, &headers)?;
    let author = CommentAuthor {
        name: state.user.name.clone(),
        avatar_url: state.user.avatar_url.clone(),
        is_pro: state.user.is_pro,
    };
    let comment = state
        .catalog
        .write()
        .await
        .add_comment(&offer_id, post, author)
        .map_err(reject)?;
    info!(%offer_id, comment_id = %comment.id, "comment stored");
    Ok(Json(comment))
}

async fn login(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<LoginResponse> {
    require_auth(&state, &headers)?;
    Ok(Json(state.user.clone()))
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Vec<Offer>> {
    require_auth(&state, &headers)?;
    Ok(Json(state.catalog.read().await.favorites()))
}

async fn set_favorite(
    State(state): State<Arc<AppState>>,
    Path((offer_id, status)): Path<(OfferId, u8)>,
    headers: HeaderMap,
) -> ApiResult<Offer> {
    require_auth(&state, &headers)?;
    let offer = state
        .catalog
        .write()
        .await
        .set_favorite(&offer_id, status)
        .map_err(reject)?;
    info!(%offer_id, is_favorite = offer.is_favorite, "favorite updated");
    Ok(Json(offer))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
