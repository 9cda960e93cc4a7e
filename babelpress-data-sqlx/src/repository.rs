use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::PgPool;

use babelpress_data::{DataError, Entity, Filter, Page, PageMeta, Pageable, QueryBuilder, SortSpec, Values};

use crate::bind::BindValue;
use crate::error::{SqlxErrorExt, SqlxResult};

/// A generic Postgres repository for one entity type.
///
/// Owns a clone of the shared connection pool; callers never see
/// connections. Every operation issues exactly one SQL round trip with
/// no implicit transactions and no internal retries.
///
/// # Example
///
/// ```ignore
/// let posts = PgRepository::<Post>::new(pool.clone());
/// let one = posts.find_one(&Filter::new().eq("slug", "hello")).await?;
/// ```
pub struct PgRepository<T> {
    pool: PgPool,
    _marker: PhantomData<T>,
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PgRepository<T>
where
    T: Entity + for<'r> sqlx::FromRow<'r, PgRow>,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a `QueryBuilder` pre-configured for this entity's table.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(T::table_name())
    }

    /// Fetch the first entity matching `filter`, or `None`.
    ///
    /// Zero rows is a valid result, not an error.
    pub async fn find_one(&self, filter: &Filter) -> SqlxResult<Option<T>> {
        self.check_filter(filter)?;
        let (sql, params) = self.query().filter(filter.clone()).limit(1).build_select(&["*"])?;
        tracing::debug!(table = T::table_name(), sql = %sql, "find_one");
        sqlx::query_as::<_, T>(&sql)
            .bind_values(&params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_data_error())
    }

    /// Fetch all entities matching `filter`, in `sort` order.
    ///
    /// LIMIT and OFFSET are appended only when given; without them the
    /// full matching set comes back, so callers must bound large tables
    /// themselves.
    pub async fn find_many(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> SqlxResult<Vec<T>> {
        self.check_filter(filter)?;
        self.check_sort(sort)?;
        let mut builder = self.query().filter(filter.clone()).sort(sort.clone());
        if let Some(limit) = limit {
            builder = builder.limit(limit);
        }
        if let Some(offset) = offset {
            builder = builder.offset(offset);
        }
        let (sql, params) = builder.build_select(&["*"])?;
        tracing::debug!(table = T::table_name(), sql = %sql, "find_many");
        sqlx::query_as::<_, T>(&sql)
            .bind_values(&params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_data_error())
    }

    /// Count rows matching `filter`.
    pub async fn count(&self, filter: &Filter) -> SqlxResult<u64> {
        self.check_filter(filter)?;
        let (sql, params) = self.query().filter(filter.clone()).build_count()?;
        tracing::debug!(table = T::table_name(), sql = %sql, "count");
        let (total,): (i64,) = sqlx::query_as(&sql)
            .bind_values(&params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.into_data_error())?;
        Ok(total.max(0) as u64)
    }

    /// Insert a row and return it as stored, including generated columns.
    pub async fn create(&self, values: &Values) -> SqlxResult<T> {
        self.check_values(values)?;
        let (sql, params) = self.query().build_insert(values)?;
        tracing::debug!(table = T::table_name(), sql = %sql, "create");
        sqlx::query_as::<_, T>(&sql)
            .bind_values(&params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_data_error())?
            .ok_or_else(|| DataError::Database("INSERT returned no row".into()))
    }

    /// Update rows matching `filter` and return the updated entity.
    ///
    /// A non-empty filter is mandatory: an unfiltered update would touch
    /// every row, so it fails fast with a validation error before any I/O.
    /// Zero matched rows is `NotFound`. A non-unique filter updates every
    /// match but returns only the first row.
    pub async fn update(&self, filter: &Filter, values: &Values) -> SqlxResult<T> {
        if filter.is_empty() {
            return Err(DataError::validation(format!(
                "update on '{}' requires a non-empty filter",
                T::table_name()
            )));
        }
        self.check_filter(filter)?;
        self.check_values(values)?;
        let (sql, params) = self.query().filter(filter.clone()).build_update(values)?;
        tracing::debug!(table = T::table_name(), sql = %sql, "update");
        let mut rows: Vec<T> = sqlx::query_as::<_, T>(&sql)
            .bind_values(&params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_data_error())?;
        if rows.len() > 1 {
            tracing::warn!(
                table = T::table_name(),
                updated = rows.len(),
                "update filter matched multiple rows; returning the first"
            );
        }
        if rows.is_empty() {
            return Err(DataError::not_found(format!(
                "update on '{}' matched no rows",
                T::table_name()
            )));
        }
        Ok(rows.swap_remove(0))
    }

    /// Delete rows matching `filter`. Returns `true` when at least one
    /// row was removed. The filter is mandatory, as for `update`.
    pub async fn delete(&self, filter: &Filter) -> SqlxResult<bool> {
        if filter.is_empty() {
            return Err(DataError::validation(format!(
                "delete on '{}' requires a non-empty filter",
                T::table_name()
            )));
        }
        self.check_filter(filter)?;
        let (sql, params) = self.query().filter(filter.clone()).build_delete()?;
        tracing::debug!(table = T::table_name(), sql = %sql, "delete");
        let result = sqlx::query(&sql)
            .bind_values(&params)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_data_error())?;
        Ok(result.rows_affected() > 0)
    }

    /// Count-then-select pagination over `filter`.
    ///
    /// The COUNT runs first and uses the identical WHERE predicate as the
    /// data query, so `total_items` stays consistent with `data`. The two
    /// round trips are sequential, never concurrent.
    pub async fn find_page(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        pageable: &Pageable,
    ) -> SqlxResult<Page<T>> {
        let total = self.count(filter).await?;
        let data = self
            .find_many(filter, sort, Some(pageable.size()), Some(pageable.offset()))
            .await?;
        let meta = PageMeta::new(pageable.page(), pageable.size(), total);
        Ok(Page::new(data, meta))
    }

    /// Close the underlying pool. Idempotent; meant to be called once at
    /// process shutdown, not after each operation.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn check_filter(&self, filter: &Filter) -> SqlxResult<()> {
        for (column, _) in filter.entries() {
            self.check_column(column)?;
        }
        Ok(())
    }

    fn check_sort(&self, sort: &SortSpec) -> SqlxResult<()> {
        for (column, _) in sort.entries() {
            self.check_column(column)?;
        }
        Ok(())
    }

    fn check_values(&self, values: &Values) -> SqlxResult<()> {
        for (column, _) in values.entries() {
            self.check_column(column)?;
        }
        Ok(())
    }

    // Column names only ever come from the per-entity allow-list; anything
    // else is rejected before SQL is built.
    fn check_column(&self, column: &str) -> SqlxResult<()> {
        if !T::has_column(column) {
            return Err(DataError::validation(format!(
                "unknown column '{column}' for table '{}'",
                T::table_name()
            )));
        }
        Ok(())
    }
}
