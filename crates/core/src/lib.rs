//! Domain types and pure logic for the Exmage media API.
//!
//! Everything here is synchronous and side-effect free: error definitions,
//! identifier types, image-key derivation, and gallery list manipulation.
//! Network and database concerns live in the `exmage-registry` and
//! `exmage-db` crates.

pub mod error;
pub mod gallery;
pub mod image_key;
pub mod types;
