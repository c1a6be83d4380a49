use super::*;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use crate::{
    coordinator::{Coordinator, LoginOutcome},
    store::{selectors, Store},
    tests_support::offer,
};
use shared::{
    domain::{AuthorizationStatus, CityName},
    error::ErrorCode,
};
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

const TOKEN: &str = "test-token";

#[derive(Clone)]
struct ServerState {
    seen_token: Arc<Mutex<Option<String>>>,
    posted: Arc<Mutex<Option<oneshot::Sender<CommentPost>>>>,
}

async fn list_offers(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Json<Vec<Offer>> {
    *state.seen_token.lock().await = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Json(vec![
        offer("p1", CityName::Paris),
        offer("h1", CityName::Hamburg),
    ])
}

async fn missing_offer(Path(id): Path<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, format!("offer {id} not found"))),
    )
}

async fn reject_login() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError::new(ErrorCode::Unauthorized, "missing token")),
    )
}

async fn malformed_neighbours() -> Json<serde_json::Value> {
    let mut bad = serde_json::to_value(offer("n1", CityName::Paris)).expect("json");
    bad["price"] = serde_json::json!(0);
    Json(serde_json::json!([bad]))
}

async fn create_comment(
    State(state): State<ServerState>,
    Path(_id): Path<String>,
    Json(post): Json<CommentPost>,
) -> Json<serde_json::Value> {
    let echo = post.clone();
    if let Some(tx) = state.posted.lock().await.take() {
        let _ = tx.send(post);
    }
    Json(serde_json::json!({
        "id": "c-new",
        "date": "2024-05-01T12:00:00Z",
        "user": { "name": "Oliver", "avatarUrl": "", "isPro": false },
        "comment": echo.comment,
        "rating": echo.rating,
    }))
}

async fn spawn_api_server() -> (String, ServerState, oneshot::Receiver<CommentPost>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        seen_token: Arc::new(Mutex::new(None)),
        posted: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/offers", get(list_offers))
        .route("/offers/:id", get(missing_offer))
        .route("/offers/:id/neighbours", get(malformed_neighbours))
        .route("/comments/:id", post(create_comment))
        .route("/login", get(reject_login))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/"), state, rx)
}

fn client(base_url: &str) -> HttpRentalApi {
    HttpRentalApi::new(base_url, Duration::from_secs(5), Some(TOKEN.to_string())).expect("client")
}

#[tokio::test]
async fn fetch_offers_decodes_list_and_sends_token() {
    let (base_url, state, _rx) = spawn_api_server().await;
    let api = client(&base_url);

    let offers = api.fetch_offers().await.expect("offers");

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[1].city.name, CityName::Hamburg);
    assert_eq!(state.seen_token.lock().await.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn base_url_trailing_slash_is_normalized() {
    let (base_url, _state, _rx) = spawn_api_server().await;
    let api = client(&base_url);
    assert!(!api.base_url().ends_with('/'));
}

#[tokio::test]
async fn non_success_status_carries_server_message() {
    let (base_url, _state, _rx) = spawn_api_server().await;
    let api = client(&base_url);

    let err = api
        .fetch_offer(&OfferId::new("404"))
        .await
        .expect_err("missing");

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("offer 404 not found"), "{err}");
}

#[tokio::test]
async fn login_401_is_reported_as_unauthorized() {
    let (base_url, _state, _rx) = spawn_api_server().await;
    let err = client(&base_url).check_login().await.expect_err("401");
    assert!(err.is_unauthorized());
}

async fn spawn_login_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn login_200_without_body_authorizes_session() {
    let base_url =
        spawn_login_server(Router::new().route("/login", get(|| async { StatusCode::OK }))).await;
    let api = Arc::new(client(&base_url));

    assert!(api.check_login().await.expect("login").is_none());

    let store = Arc::new(Store::new());
    let coordinator = Coordinator::new(store.clone(), api);
    assert_eq!(coordinator.login().await, LoginOutcome::Authorized);
    assert_eq!(
        store.select(selectors::authorization_status),
        AuthorizationStatus::Auth
    );
}

#[tokio::test]
async fn login_200_with_user_body_returns_user() {
    let base_url = spawn_login_server(Router::new().route(
        "/login",
        get(|| async {
            Json(serde_json::json!({
                "name": "Oliver",
                "email": "oliver@example.test",
                "avatarUrl": "",
                "isPro": false,
            }))
        }),
    ))
    .await;

    let user = client(&base_url).check_login().await.expect("login");
    assert_eq!(user.map(|user| user.email).as_deref(), Some("oliver@example.test"));
}

#[tokio::test]
async fn schema_violation_is_invalid_response() {
    let (base_url, _state, _rx) = spawn_api_server().await;
    let err = client(&base_url)
        .fetch_nearby_offers(&OfferId::new("p1"))
        .await
        .expect_err("invalid");
    match err {
        ClientError::InvalidResponse { route, reason } => {
            assert_eq!(route, "/offers/p1/neighbours");
            assert!(reason.contains("price"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn post_comment_sends_body_and_decodes_created_comment() {
    let (base_url, _state, rx) = spawn_api_server().await;
    let post = CommentPost {
        comment: "x".repeat(60),
        rating: 4,
    };

    let created = client(&base_url)
        .post_comment(&OfferId::new("p1"), &post)
        .await
        .expect("created");

    assert_eq!(rx.await.expect("posted"), post);
    assert_eq!(created.comment, post.comment);
    assert_eq!(created.rating, 4);
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .fetch_offers()
        .await
        .expect_err("refused");
    assert!(matches!(err, ClientError::Network(_)));
}

#[test]
fn rejects_invalid_base_url() {
    assert!(matches!(
        HttpRentalApi::new("not a url", Duration::from_secs(1), None),
        Err(HttpApiBuildError::Settings(_))
    ));
}
