use babelpress_data::{Filter, SortSpec};
use babelpress_data_sqlx::{PgRepository, SqlxResult};
use sqlx::PgPool;

use crate::project::Project;

/// Project lookups for the routing layer.
#[derive(Clone)]
pub struct ProjectRepository {
    repo: PgRepository<Project>,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: PgRepository::new(pool),
        }
    }

    pub fn inner(&self) -> &PgRepository<Project> {
        &self.repo
    }

    /// Resolve a URL prefix to its project, if any.
    pub async fn find_by_prefix(&self, prefix: &str) -> SqlxResult<Option<Project>> {
        self.repo.find_one(&Filter::new().eq("prefix", prefix)).await
    }

    pub async fn find_by_id(&self, id: i64) -> SqlxResult<Option<Project>> {
        self.repo.find_one(&Filter::new().eq("id", id)).await
    }

    /// All projects, stable order for sitemap generation.
    pub async fn find_all(&self) -> SqlxResult<Vec<Project>> {
        self.repo
            .find_many(&Filter::new(), &SortSpec::new().asc("id"), None, None)
            .await
    }

    pub async fn close(&self) {
        self.repo.close().await;
    }
}
