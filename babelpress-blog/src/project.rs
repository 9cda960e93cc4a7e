use babelpress_data::Entity;
use serde::{Deserialize, Serialize};

/// A customer project: one tenant of the blog platform.
///
/// `prefix` is the URL path prefix the router matches on; `locales` are
/// the translation targets; the `ghost_*` fields point at the tenant's
/// CMS instance.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub prefix: String,
    pub name: String,
    pub locales: Vec<String>,
    pub ghost_api_key: Option<String>,
    pub ghost_admin_key: Option<String>,
    pub ghost_domain: Option<String>,
    pub rule: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Entity for Project {
    type Id = i64;

    fn table_name() -> &'static str {
        "projects"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "prefix",
            "name",
            "locales",
            "ghost_api_key",
            "ghost_admin_key",
            "ghost_domain",
            "rule",
            "created_at",
        ]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}
