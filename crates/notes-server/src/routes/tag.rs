//! Placeholder for the `/tag` resource.

use axum::{Router, routing::any};

use crate::error::ApiError;
use crate::state::AppState;

/// Any method on /tag - not implemented yet.
async fn tag_placeholder() -> ApiError {
    ApiError::NotImplemented("the /tag resource has no operations yet".to_string())
}

/// Build tag routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tag", any(tag_placeholder))
}
