//! Shared test harness: in-memory collaborator doubles, router assembly
//! mirroring `main.rs`, and request helpers.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use exmage_api::config::ServerConfig;
use exmage_api::middleware::auth::token_fingerprint;
use exmage_api::routes;
use exmage_api::state::AppState;
use exmage_core::types::DbId;
use exmage_db::{MetadataStore, StoreError, THUMBNAIL_ID_KEY};
use exmage_registry::{ExternalImage, ImageLinkRegistry, RegistryError};

/// Application token accepted by [`test_config`].
pub const TEST_TOKEN: &str = "test-app-token";

/// Build a test `ServerConfig` with safe defaults and one accepted token.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        registry_url: "http://localhost:9000".to_string(),
        app_token_fingerprints: vec![token_fingerprint(TEST_TOKEN)],
    }
}

// ---------------------------------------------------------------------------
// Collaborator doubles
// ---------------------------------------------------------------------------

/// In-memory [`MetadataStore`] double.
#[derive(Default)]
pub struct MemoryMetadataStore {
    posts: Mutex<HashSet<DbId>>,
    meta: Mutex<HashMap<(DbId, String), String>>,
}

impl MemoryMetadataStore {
    /// A store where the given posts exist.
    pub fn with_posts(posts: impl IntoIterator<Item = DbId>) -> Self {
        Self {
            posts: Mutex::new(posts.into_iter().collect()),
            meta: Mutex::default(),
        }
    }

    /// Read a metadata value directly, bypassing the trait.
    pub fn meta_value(&self, post_id: DbId, key: &str) -> Option<String> {
        self.meta
            .lock()
            .unwrap()
            .get(&(post_id, key.to_string()))
            .cloned()
    }

    /// Seed a metadata value directly, bypassing the trait.
    pub fn seed_meta(&self, post_id: DbId, key: &str, value: &str) {
        self.meta
            .lock()
            .unwrap()
            .insert((post_id, key.to_string()), value.to_string());
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get_meta(&self, post_id: DbId, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.meta_value(post_id, key))
    }

    async fn update_meta(&self, post_id: DbId, key: &str, value: &str) -> Result<(), StoreError> {
        self.seed_meta(post_id, key, value);
        Ok(())
    }

    async fn set_featured_image(&self, post_id: DbId, image_id: DbId) -> Result<bool, StoreError> {
        if !self.posts.lock().unwrap().contains(&post_id) {
            return Ok(false);
        }
        self.seed_meta(post_id, THUMBNAIL_ID_KEY, &image_id.to_string());
        Ok(true)
    }
}

/// Arguments of one recorded `add_image` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub image_key: String,
    pub owner: Option<DbId>,
}

/// Scripted [`ImageLinkRegistry`] double.
///
/// Returns queued responses in order and records every call for
/// inspection.
#[derive(Default)]
pub struct StubRegistry {
    responses: Mutex<VecDeque<Result<ExternalImage, RegistryError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubRegistry {
    /// A registry that returns records with the given ids, in order.
    pub fn with_ids(ids: impl IntoIterator<Item = DbId>) -> Self {
        Self {
            responses: Mutex::new(ids.into_iter().map(|id| Ok(test_image(id))).collect()),
            calls: Mutex::default(),
        }
    }

    /// A registry whose next call fails with a registry-side error.
    pub fn failing() -> Self {
        let mut responses = VecDeque::new();
        responses.push_back(Err(RegistryError::Api {
            status: 500,
            body: "link failure detail".to_string(),
        }));
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::default(),
        }
    }

    /// Every `add_image` call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Build a registry record like the real service would return.
pub fn test_image(id: DbId) -> ExternalImage {
    serde_json::from_value(serde_json::json!({ "id": id, "status": "linked" })).unwrap()
}

#[async_trait]
impl ImageLinkRegistry for StubRegistry {
    async fn add_image(
        &self,
        url: &str,
        image_key: &str,
        owner: Option<DbId>,
    ) -> Result<ExternalImage, RegistryError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            image_key: image_key.to_string(),
            owner,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("StubRegistry ran out of scripted responses")
    }
}

// ---------------------------------------------------------------------------
// App assembly
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: Arc<MemoryMetadataStore>, registry: Arc<StubRegistry>) -> Router {
    let state = AppState {
        config: Arc::new(test_config()),
        store,
        registry,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/exmage/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET a path with no authentication.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with no `Authorization` header.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_json_with_auth(app, uri, body, None).await
}

/// POST a JSON body with the test application token.
pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let auth = format!("Bearer {TEST_TOKEN}");
    post_json_with_auth(app, uri, body, Some(&auth)).await
}

/// POST a JSON body with an arbitrary `Authorization` header value.
pub async fn post_json_with_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    auth: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
