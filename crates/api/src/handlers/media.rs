//! Handlers for the `/exmage/v1` media attachment endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use exmage_core::gallery;
use exmage_core::image_key::derive_image_key;
use exmage_core::types::DbId;
use exmage_registry::ExternalImage;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AppTokenAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response schemas
// ---------------------------------------------------------------------------

/// Request body shared by both attachment endpoints.
#[derive(Debug, Deserialize)]
pub struct AttachImageRequest {
    pub post_id: Option<DbId>,
    pub url: Option<String>,
}

impl AttachImageRequest {
    /// Reject absent or falsy parameters (zero post id, empty url).
    fn into_parts(self) -> Result<(DbId, String), AppError> {
        match (self.post_id, self.url) {
            (Some(post_id), Some(url)) if post_id != 0 && !url.is_empty() => Ok((post_id, url)),
            _ => Err(AppError::MissingParameter),
        }
    }
}

/// Outcome of a featured-image assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentStatus {
    Success,
    Failed,
}

/// Response for `POST /exmage/v1/listen`.
///
/// `media` reports only that the handler completed; whether the image
/// actually became the featured image is the `attached` field.
#[derive(Debug, Serialize)]
pub struct AttachResponse {
    pub media: &'static str,
    pub attached: AttachmentStatus,
    pub product: DbId,
    pub external_image: ExternalImage,
}

/// Response for `POST /exmage/v1/gallery`.
///
/// `attached` is the post's full deduplicated gallery id list after the
/// append.
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub media: &'static str,
    pub attached: Vec<String>,
    pub product: DbId,
    pub external_image: ExternalImage,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /exmage/v1/listen
///
/// Register `url` with the image-link registry and set the resulting
/// record as the post's featured image. On success the record is
/// annotated with the owning post under a `product` field.
pub async fn attach_featured(
    _auth: AppTokenAuth,
    State(state): State<AppState>,
    Json(request): Json<AttachImageRequest>,
) -> AppResult<impl IntoResponse> {
    let (post_id, url) = request.into_parts()?;
    let image_key = derive_image_key(&url)?;

    // Registration is scoped to the owning post on this endpoint.
    let mut external_image = state
        .registry
        .add_image(&url, &image_key, Some(post_id))
        .await?;

    let attached = if state
        .store
        .set_featured_image(post_id, external_image.id)
        .await?
    {
        external_image.set_product(post_id);
        AttachmentStatus::Success
    } else {
        AttachmentStatus::Failed
    };

    tracing::info!(
        post_id,
        image_id = external_image.id,
        ?attached,
        "Featured image attachment"
    );

    Ok(Json(AttachResponse {
        media: "success",
        attached,
        product: post_id,
        external_image,
    }))
}

/// POST /exmage/v1/gallery
///
/// Register `url` with the image-link registry and append the record's id
/// to the post's gallery metadata list, deduplicated.
pub async fn append_gallery(
    _auth: AppTokenAuth,
    State(state): State<AppState>,
    Json(request): Json<AttachImageRequest>,
) -> AppResult<impl IntoResponse> {
    let (post_id, url) = request.into_parts()?;
    let image_key = derive_image_key(&url)?;

    // Unlike /listen, gallery registrations carry no owning post.
    let external_image = state.registry.add_image(&url, &image_key, None).await?;

    let existing = state
        .store
        .get_meta(post_id, gallery::PRODUCT_IMAGE_GALLERY_KEY)
        .await?;
    let images = gallery::append_image(
        gallery::split_gallery(existing.as_deref()),
        external_image.id,
    );
    state
        .store
        .update_meta(
            post_id,
            gallery::PRODUCT_IMAGE_GALLERY_KEY,
            &gallery::join_gallery(&images),
        )
        .await?;

    tracing::info!(
        post_id,
        image_id = external_image.id,
        gallery_len = images.len(),
        "Gallery image appended"
    );

    Ok(Json(GalleryResponse {
        media: "success",
        attached: images,
        product: post_id,
        external_image,
    }))
}
