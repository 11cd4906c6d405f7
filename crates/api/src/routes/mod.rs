pub mod health;
pub mod media;

use axum::Router;

use crate::state::AppState;

/// Build the `/exmage/v1` route tree.
///
/// ```text
/// /listen     attach featured image (POST)
/// /gallery    append gallery image (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(media::router())
}
