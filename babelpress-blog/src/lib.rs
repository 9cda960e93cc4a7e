//! # babelpress-blog — domain layer
//!
//! The blog-facing half of Babelpress: the `posts` and `projects` tables,
//! their repositories, and the per-tenant page-size policy the serving
//! layer applies before listing posts.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Post`] / [`Project`] | Row types with their column allow-lists |
//! | [`PostRepository`] | Tenant-scoped, newest-first paginated post listing |
//! | [`ProjectRepository`] | Thin lookups the routing layer needs |
//! | [`PageSizePolicy`] | Per-tenant default sizes and the featured-landing over-fetch |
//!
//! The rendering, SEO, and CMS-sync layers sit on top of this crate and
//! are deliberately not part of it.

pub mod policy;
pub mod post;
pub mod posts;
pub mod project;
pub mod projects;

pub use policy::{PageSizePolicy, ResolvedPageSize, TenantPaging};
pub use post::Post;
pub use posts::{PostPageQuery, PostRepository};
pub use project::Project;
pub use projects::ProjectRepository;
