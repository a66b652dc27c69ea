pub mod stores;
pub mod submissions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/stores", get(stores::list))
        .route("/api/submissions", post(submissions::submit))
}
