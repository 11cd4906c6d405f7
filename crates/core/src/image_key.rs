//! Image-key derivation from remote URLs.
//!
//! The image-link registry identifies a remote image by `host + path` with
//! no separator, scheme and query stripped: `https://example.com/img.jpg?v=2`
//! becomes `example.com/img.jpg`. The key is a dedup handle for the
//! registry; this layer derives it and passes it along without further
//! validation.

use url::Url;

use crate::error::CoreError;

/// Derive the registry dedup key for a remote image URL.
///
/// Fails when the value is not an absolute URL or has no host component.
pub fn derive_image_key(raw_url: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(raw_url)
        .map_err(|e| CoreError::Validation(format!("url is not a valid URL: {e}")))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| CoreError::Validation("url has no host component".to_string()))?;

    Ok(format!("{host}{}", parsed.path()))
}
