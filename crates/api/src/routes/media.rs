//! Route definitions for the media attachment endpoints.
//!
//! All endpoints require application-token authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/exmage/v1`.
///
/// ```text
/// POST   /listen      -> attach_featured
/// POST   /gallery     -> append_gallery
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listen", post(media::attach_featured))
        .route("/gallery", post(media::append_gallery))
}
