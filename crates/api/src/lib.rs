//! Axum HTTP API for the Exmage media service.
//!
//! Two authenticated endpoints under `/exmage/v1` accept a post id and a
//! remote image URL, register the URL with the external image-link
//! registry, and attach the resulting record to the post as its featured
//! image (`/listen`) or as a gallery entry (`/gallery`).

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
