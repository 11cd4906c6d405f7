//! REST client for the image-link registry HTTP endpoints.
//!
//! Wraps the registry's `POST /images` endpoint using [`reqwest`].

use async_trait::async_trait;
use exmage_core::types::DbId;
use serde::Serialize;

use crate::record::ExternalImage;
use crate::ImageLinkRegistry;

/// HTTP client for a single registry instance.
pub struct HttpImageLinkRegistry {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the registry REST layer.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry returned a non-2xx status code.
    #[error("registry API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

#[derive(Debug, Serialize)]
struct AddImageBody<'a> {
    url: &'a str,
    image_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_id: Option<DbId>,
}

impl HttpImageLinkRegistry {
    /// Create a new client for a registry instance.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:9000`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl ImageLinkRegistry for HttpImageLinkRegistry {
    async fn add_image(
        &self,
        url: &str,
        image_key: &str,
        owner: Option<DbId>,
    ) -> Result<ExternalImage, RegistryError> {
        let response = self
            .client
            .post(format!("{}/images", self.api_url))
            .json(&AddImageBody {
                url,
                image_key,
                post_id: owner,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Api { status, body });
        }

        let image = response.json::<ExternalImage>().await?;

        tracing::debug!(
            image_id = image.id,
            image_key,
            owner = ?owner,
            "Registered external image"
        );

        Ok(image)
    }
}
