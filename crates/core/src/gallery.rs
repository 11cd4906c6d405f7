//! Gallery metadata list manipulation.
//!
//! A post's gallery is stored as a single comma-separated string of image
//! ids under the [`PRODUCT_IMAGE_GALLERY_KEY`] meta key. Appends preserve
//! existing order and collapse duplicates to their first occurrence.

use std::collections::HashSet;

use crate::types::DbId;

/// Meta key under which a post's gallery image list is stored.
///
/// Existing installations already hold data under this exact key in this
/// exact comma-separated encoding, so neither may change.
pub const PRODUCT_IMAGE_GALLERY_KEY: &str = "_product_image_gallery";

/// Split a stored gallery value into its image ids.
///
/// An absent or empty value is an empty gallery.
pub fn split_gallery(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(value) if !value.is_empty() => value.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Append an image id to a gallery, collapsing duplicates while keeping
/// first-occurrence order.
pub fn append_image(mut gallery: Vec<String>, image_id: DbId) -> Vec<String> {
    gallery.push(image_id.to_string());

    let mut seen = HashSet::new();
    gallery.retain(|id| seen.insert(id.clone()));
    gallery
}

/// Join image ids back into the stored comma-separated form.
pub fn join_gallery(ids: &[String]) -> String {
    ids.join(",")
}
