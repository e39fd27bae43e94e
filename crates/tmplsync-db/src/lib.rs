//! # tmplsync-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides two implementations of every repository trait defined
//! in `tmplsync-core`:
//!
//! - PostgreSQL repositories (`Pg*Repository`) with connection pool management,
//!   runtime migrations, `FromRow` models and entity <-> model mappers
//! - [`MemoryStore`], a lock-protected in-memory store used by tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use tmplsync_db::{create_pool, run_migrations, PgTranslationRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     run_migrations(&pool, Path::new(tmplsync_db::DEFAULT_MIGRATIONS_DIR)).await?;
//!     let translations = PgTranslationRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig, DEFAULT_MIGRATIONS_DIR};
pub use repositories::{
    PgChannelRepository, PgHttpLogRepository, PgIncidentRepository, PgOrganizationRepository,
    PgTemplateRepository, PgTranslationRepository,
};
