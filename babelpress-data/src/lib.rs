//! # babelpress-data — data access core
//!
//! Pure types for the Babelpress data layer: no I/O happens in this crate.
//! The SQLx-backed repository lives in `babelpress-data-sqlx`; domain
//! entities (posts, projects) live in `babelpress-blog`.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Entity`] | Trait tying an entity type to its table and column allow-list |
//! | [`Filter`] | Ordered column→value equality predicate (NULL entries ignored) |
//! | [`Values`] | Ordered column→value set for INSERT / UPDATE |
//! | [`SortSpec`] | Ordered (column, direction) pairs for ORDER BY |
//! | [`QueryBuilder`] | Parameterized SQL assembly, always `(sql, bind_values)` |
//! | [`Pageable`] / [`Page`] / [`PageMeta`] | 1-indexed pagination with derived metadata |
//! | [`DataError`] | Uniform error kind for the whole data layer |

pub mod entity;
pub mod error;
pub mod filter;
pub mod page;
pub mod query;

pub use entity::Entity;
pub use error::DataError;
pub use filter::{Filter, SortDirection, SortSpec, Values};
pub use page::{Page, PageMeta, Pageable};
pub use query::{QueryBuilder, QueryError};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{DataError, Entity, Filter, Page, PageMeta, Pageable, QueryBuilder, SortSpec, Values};
}
