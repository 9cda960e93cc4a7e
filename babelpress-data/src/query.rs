use crate::filter::{Filter, SortSpec, Values};
use serde_json::Value;

/// A builder for parameterized Postgres statements.
///
/// Every build method returns `(sql, bind_values)`; values never appear in
/// the SQL text, only `$n` placeholders assigned in the exact order values
/// are appended. There is no raw-interpolation path.
///
/// # Example
///
/// ```ignore
/// let (sql, params) = QueryBuilder::new("posts")
///     .filter(Filter::new().eq("project_id", 1))
///     .sort(SortSpec::new().desc("created_at"))
///     .limit(10)
///     .offset(20)
///     .build_select(&["*"])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    table: String,
    filter: Filter,
    sort: SortSpec,
    limit_val: Option<u64>,
    offset_val: Option<u64>,
}

impl QueryBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Replace the WHERE predicate.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the ORDER BY specification.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit_val = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset_val = Some(offset);
        self
    }

    /// Build a SELECT returning `(sql, bind_values)`.
    ///
    /// Clause order is fixed: WHERE, ORDER BY, LIMIT, OFFSET. LIMIT and
    /// OFFSET are appended only when requested.
    pub fn build_select(&self, columns: &[&str]) -> Result<(String, Vec<Value>), QueryError> {
        let table = checked_identifier(&self.table, false, "table")?;
        let columns = checked_column_list(columns)?;

        let mut sql = format!("SELECT {columns} FROM {table}");
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx)?;
        self.append_order(&mut sql)?;
        self.append_limit_offset(&mut sql);
        Ok((sql, params))
    }

    /// Build a `SELECT COUNT(*)` with the same WHERE predicate as
    /// [`build_select`](Self::build_select).
    pub fn build_count(&self) -> Result<(String, Vec<Value>), QueryError> {
        let table = checked_identifier(&self.table, false, "table")?;
        let mut sql = format!("SELECT COUNT(*) FROM {table}");
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx)?;
        Ok((sql, params))
    }

    /// Build an `INSERT ... RETURNING *` from the given values.
    pub fn build_insert(&self, values: &Values) -> Result<(String, Vec<Value>), QueryError> {
        if values.is_empty() {
            return Err(QueryError::EmptyValues { statement: "INSERT" });
        }
        let table = checked_identifier(&self.table, false, "table")?;

        let mut columns = Vec::with_capacity(values.len());
        let mut placeholders = Vec::with_capacity(values.len());
        let mut params = Vec::with_capacity(values.len());
        for (idx, (column, value)) in values.entries().enumerate() {
            columns.push(checked_identifier(column, false, "column")?);
            placeholders.push(placeholder(idx + 1));
            params.push(value.clone());
        }
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({}) RETURNING *",
            columns.join(", "),
            placeholders.join(", ")
        );
        Ok((sql, params))
    }

    /// Build an `UPDATE ... SET ... WHERE ... RETURNING *`.
    ///
    /// SET and WHERE share one positional parameter sequence: the WHERE
    /// placeholders continue numbering after the last SET placeholder.
    /// An empty filter is rejected: an unfiltered UPDATE would touch
    /// every row in the table.
    pub fn build_update(&self, values: &Values) -> Result<(String, Vec<Value>), QueryError> {
        if values.is_empty() {
            return Err(QueryError::EmptyValues { statement: "UPDATE" });
        }
        if self.filter.is_empty() {
            return Err(QueryError::MissingPredicate { statement: "UPDATE" });
        }
        let table = checked_identifier(&self.table, false, "table")?;

        let mut params = Vec::with_capacity(values.len() + self.filter.len());
        let mut placeholder_idx = 1usize;
        let mut assignments = Vec::with_capacity(values.len());
        for (column, value) in values.entries() {
            let column = checked_identifier(column, false, "column")?;
            assignments.push(format!("{column} = {}", placeholder(placeholder_idx)));
            placeholder_idx += 1;
            params.push(value.clone());
        }

        let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
        self.append_where(&mut sql, &mut params, &mut placeholder_idx)?;
        sql.push_str(" RETURNING *");
        Ok((sql, params))
    }

    /// Build a `DELETE FROM ... WHERE ...`.
    ///
    /// An empty filter is rejected for the same reason as in
    /// [`build_update`](Self::build_update).
    pub fn build_delete(&self) -> Result<(String, Vec<Value>), QueryError> {
        if self.filter.is_empty() {
            return Err(QueryError::MissingPredicate { statement: "DELETE" });
        }
        let table = checked_identifier(&self.table, false, "table")?;
        let mut sql = format!("DELETE FROM {table}");
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx)?;
        Ok((sql, params))
    }

    fn append_where(
        &self,
        sql: &mut String,
        params: &mut Vec<Value>,
        placeholder_idx: &mut usize,
    ) -> Result<(), QueryError> {
        if self.filter.is_empty() {
            return Ok(());
        }
        sql.push_str(" WHERE ");
        let mut first = true;
        for (column, value) in self.filter.entries() {
            if !first {
                sql.push_str(" AND ");
            }
            first = false;
            let column = checked_identifier(column, false, "column")?;
            sql.push_str(&format!("{column} = {}", placeholder(*placeholder_idx)));
            *placeholder_idx += 1;
            params.push(value.clone());
        }
        Ok(())
    }

    fn append_order(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.sort.is_empty() {
            return Ok(());
        }
        sql.push_str(" ORDER BY ");
        let mut clauses = Vec::new();
        for (column, direction) in self.sort.entries() {
            let column = checked_identifier(column, false, "column")?;
            clauses.push(format!("{column} {}", direction.as_sql()));
        }
        sql.push_str(&clauses.join(", "));
        Ok(())
    }

    fn append_limit_offset(&self, sql: &mut String) {
        if let Some(limit) = self.limit_val {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset_val {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
    }
}

fn placeholder(index: usize) -> String {
    format!("${index}")
}

fn checked_identifier(
    ident: &str,
    allow_star: bool,
    kind: &'static str,
) -> Result<String, QueryError> {
    if !is_valid_identifier(ident, allow_star) {
        return Err(QueryError::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
        });
    }
    Ok(ident.to_string())
}

fn checked_column_list(columns: &[&str]) -> Result<String, QueryError> {
    let mut out = Vec::with_capacity(columns.len());
    for col in columns {
        out.push(checked_identifier(col, true, "column")?);
    }
    Ok(out.join(", "))
}

fn is_valid_identifier(ident: &str, allow_star: bool) -> bool {
    if allow_star && ident == "*" {
        return true;
    }
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone)]
pub enum QueryError {
    InvalidIdentifier { kind: &'static str, ident: String },
    MissingPredicate { statement: &'static str },
    EmptyValues { statement: &'static str },
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier { kind, ident } => {
                write!(f, "Invalid {kind} identifier: {ident}")
            }
            QueryError::MissingPredicate { statement } => {
                write!(f, "{statement} requires a non-empty filter")
            }
            QueryError::EmptyValues { statement } => {
                write!(f, "{statement} requires at least one column value")
            }
        }
    }
}

impl std::error::Error for QueryError {}
