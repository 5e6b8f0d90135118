//! Kit record repository implementation.
//!
//! One row per brand kit; the document lives whole in a JSONB column.
//! Writes replace the entire document value; there is no partial-field
//! update primitive and no compare-and-swap on the document's advisory
//! version counter (see `KitRepository` docs).

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use brandforge_core::{KitRecord, KitRepository, Result};

/// PostgreSQL implementation of [`KitRepository`].
pub struct PgKitRepository {
    pool: PgPool,
}

impl PgKitRepository {
    /// Create a new PgKitRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn record_from_row(row: &sqlx::postgres::PgRow) -> KitRecord {
        KitRecord {
            id: row.get("id"),
            owner_id: row.get("owner_id"),
            mode: row.get("mode"),
            business: row.get("business"),
            vibe: row.get("vibe"),
            created_at: row.get("created_at"),
            kit_json: row.get("kit_json"),
        }
    }
}

#[async_trait]
impl KitRepository for PgKitRepository {
    async fn create(&self, record: &KitRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO brand_kit (id, owner_id, mode, business, vibe, kit_json, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(&record.owner_id)
        .bind(&record.mode)
        .bind(&record.business)
        .bind(&record.vibe)
        .bind(&record.kit_json)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "kits",
            op = "create",
            kit_id = %record.id,
            "Inserted kit record"
        );
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<KitRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, mode, business, vibe, kit_json, created_at
            FROM brand_kit
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::record_from_row))
    }

    async fn get_for_owner(&self, id: Uuid, owner_id: &str) -> Result<Option<KitRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, mode, business, vibe, kit_json, created_at
            FROM brand_kit
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::record_from_row))
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<KitRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, mode, business, vibe, kit_json, created_at
            FROM brand_kit
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::record_from_row).collect())
    }

    async fn replace_document(&self, id: Uuid, document: &JsonValue) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE brand_kit SET kit_json = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(document)
        .execute(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "kits",
            op = "replace_document",
            kit_id = %id,
            "Replaced kit document"
        );
        Ok(())
    }

    async fn delete_for_owner(&self, id: Uuid, owner_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM brand_kit WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
