use std::sync::Arc;

use exmage_db::MetadataStore;
use exmage_registry::ImageLinkRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the collaborators live behind `Arc` and are trait
/// objects so tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (accessed by the permission gate).
    pub config: Arc<ServerConfig>,
    /// Post metadata store.
    pub store: Arc<dyn MetadataStore>,
    /// External image-link registry.
    pub registry: Arc<dyn ImageLinkRegistry>,
}
