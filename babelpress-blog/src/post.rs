use babelpress_data::Entity;
use serde::{Deserialize, Serialize};

/// One post as ingested from the CMS, plus its machine translations.
///
/// `i18n` holds the per-locale translated fields; `data` carries the raw
/// CMS payload the rendering layer occasionally reaches into.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub i18n: serde_json::Value,
    pub status: String,
    pub project_id: i64,
    pub data: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Entity for Post {
    type Id = i64;

    fn table_name() -> &'static str {
        "posts"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "title",
            "slug",
            "content",
            "i18n",
            "status",
            "project_id",
            "data",
            "created_at",
        ]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}
