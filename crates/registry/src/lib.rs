//! Client library for the external image-link registry.
//!
//! The registry tracks remote images by URL without downloading them,
//! handing back a record for each registered image. This crate defines the
//! [`ImageLinkRegistry`] trait that API handlers depend on, the
//! [`ExternalImage`] record they receive, and an HTTP implementation
//! backed by [`reqwest`].

pub mod client;
pub mod record;

pub use client::{HttpImageLinkRegistry, RegistryError};
pub use record::ExternalImage;

use async_trait::async_trait;
use exmage_core::types::DbId;

/// Registers remote images and returns their tracked records.
#[async_trait]
pub trait ImageLinkRegistry: Send + Sync {
    /// Register the image at `url`, or fetch its record if already tracked.
    ///
    /// `image_key` is the registry's dedup key (host + path of the URL);
    /// `owner` optionally scopes the registration to a post.
    async fn add_image(
        &self,
        url: &str,
        image_key: &str,
        owner: Option<DbId>,
    ) -> Result<ExternalImage, RegistryError>;
}
