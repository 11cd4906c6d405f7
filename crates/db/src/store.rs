//! Generic key-value post-metadata store.
//!
//! Mirrors the host platform's metadata model: string values keyed by
//! (post id, meta key), with no referential integrity between metadata
//! rows and posts. Featured-image assignment is the one operation that
//! does check the post row, since designating a thumbnail for a missing
//! post must fail.

use async_trait::async_trait;
use exmage_core::types::DbId;
use sqlx::PgPool;

/// Meta key under which a post's featured image id is stored.
pub const THUMBNAIL_ID_KEY: &str = "_thumbnail_id";

/// Errors from the metadata store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Generic string-valued metadata store keyed by (post id, meta key).
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Read a single metadata value, `None` when the key is unset.
    async fn get_meta(&self, post_id: DbId, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace a metadata value.
    async fn update_meta(&self, post_id: DbId, key: &str, value: &str) -> Result<(), StoreError>;

    /// Designate `image_id` as the post's featured image.
    ///
    /// Returns `false` without writing when the post does not exist.
    async fn set_featured_image(&self, post_id: DbId, image_id: DbId) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed [`MetadataStore`].
pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn get_meta(&self, post_id: DbId, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT meta_value FROM post_meta WHERE post_id = $1 AND meta_key = $2",
        )
        .bind(post_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn update_meta(&self, post_id: DbId, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO post_meta (post_id, meta_key, meta_value) VALUES ($1, $2, $3) \
             ON CONFLICT (post_id, meta_key) DO UPDATE SET meta_value = EXCLUDED.meta_value",
        )
        .bind(post_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_featured_image(&self, post_id: DbId, image_id: DbId) -> Result<bool, StoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Ok(false);
        }

        self.update_meta(post_id, THUMBNAIL_ID_KEY, &image_id.to_string())
            .await?;
        Ok(true)
    }
}
