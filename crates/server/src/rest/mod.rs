pub mod password;

use axum::{
    routing::{get, post},
    Router,
};
use shared_types::CHANGE_PASSWORD_PATH;

use crate::health;

/// Build the REST router: the password endpoint plus `/health`.
pub fn rest_router() -> Router {
    Router::new()
        .route(CHANGE_PASSWORD_PATH, post(password::change_password))
        .route("/health", get(health::health_check))
}
