use exmage_core::types::DbId;
use serde::{Deserialize, Serialize};

/// A remote image tracked by the image-link registry.
///
/// Only `id` is meaningful to this service. Every other field the registry
/// returns is carried through the response untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalImage {
    /// Registry-assigned attachment id.
    pub id: DbId,

    /// Registry-defined fields, passed through verbatim.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ExternalImage {
    /// Annotate the record with the post it was attached to.
    pub fn set_product(&mut self, post_id: DbId) {
        self.fields
            .insert("product".to_string(), serde_json::Value::from(post_id));
    }
}
