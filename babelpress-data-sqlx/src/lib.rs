//! # babelpress-data-sqlx — Postgres backend for the Babelpress data layer
//!
//! This crate provides the [SQLx](https://github.com/launchbadge/sqlx)-specific
//! half of the data layer. It depends on [`babelpress_data`] for the pure
//! types (query building, pagination, errors) and adds the repository that
//! actually talks to Postgres, plus pool configuration and error bridging.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PgRepository`] | Generic per-entity repository owning a `PgPool` |
//! | [`DbConfig`] | Explicit connection/pool configuration with env-var defaults |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `DataError` |
//! | [`SqlxResult<T>`] | Type alias for `Result<T, DataError>` |
//!
//! # Quick start
//!
//! ```ignore
//! use babelpress_data_sqlx::{DbConfig, PgRepository};
//!
//! let pool = DbConfig::from_env().create_pool().await?;
//! let posts = PgRepository::<Post>::new(pool.clone());
//! let latest = posts
//!     .find_many(&Filter::new().eq("project_id", 1), &SortSpec::new().desc("created_at"), Some(5), None)
//!     .await?;
//! ```
//!
//! # Error classification
//!
//! Driver failures are folded into the three `DataError` kinds by
//! [`SqlxErrorExt`]: zero-row fetches become `NotFound`, everything else
//! becomes `Database` with a message that keeps constraint names visible.
//! Call `.into_data_error()` wherever a raw `sqlx` call leaves this crate:
//!
//! ```ignore
//! use babelpress_data_sqlx::SqlxErrorExt;
//!
//! let row = sqlx::query_as("SELECT ...")
//!     .fetch_one(&pool)
//!     .await
//!     .map_err(|e| e.into_data_error())?;
//! ```

pub mod bind;
pub mod config;
pub mod error;
pub mod repository;

pub use config::DbConfig;
pub use error::{SqlxErrorExt, SqlxResult};
pub use repository::PgRepository;

/// Re-exports of the most commonly used types from both `babelpress-data`
/// and this crate.
pub mod prelude {
    pub use crate::{DbConfig, PgRepository, SqlxErrorExt, SqlxResult};
    pub use babelpress_data::prelude::*;
}
