//! # brandforge-db
//!
//! PostgreSQL persistence layer for brandforge.
//!
//! This crate provides:
//! - Connection pool management
//! - The kit-record repository (whole-JSONB-document storage)
//! - An always-compiled in-memory repository for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use brandforge_db::{create_pool, PgKitRepository};
//! use brandforge_core::KitRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool("postgres://localhost/brandforge").await?;
//!     let kits = PgKitRepository::new(pool);
//!     let record = kits.get_for_owner(id, "user_123").await?;
//!     Ok(())
//! }
//! ```

pub mod kits;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so dependent crates' tests can use MemoryKitRepository
pub mod test_fixtures;

// Re-export core types
pub use brandforge_core::*;

pub use kits::PgKitRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use test_fixtures::MemoryKitRepository;

/// Run embedded schema migrations (behind the `migrations` feature).
#[cfg(feature = "migrations")]
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
    Ok(())
}
