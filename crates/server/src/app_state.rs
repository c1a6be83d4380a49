use crate::api::Catalog;
use shared::protocol::LoginResponse;
use tokio::sync::RwLock;

pub(crate) struct AppState {
    pub(crate) catalog: RwLock<Catalog>,
    pub(crate) auth_token: String,
    pub(crate) user: LoginResponse,
}
