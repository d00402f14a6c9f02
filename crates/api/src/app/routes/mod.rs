use axum::{routing::get, Router};

pub mod ai;
pub mod common;
pub mod inventory;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/inventory", inventory::router())
        .nest("/ai", ai::router())
}
