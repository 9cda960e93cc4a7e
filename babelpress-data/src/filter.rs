use serde_json::Value;

/// An ordered column→value equality predicate.
///
/// Entries whose value is `Value::Null` are dropped at insertion: a null
/// filter value means "ignore this column", not "match NULL". An empty
/// filter produces no WHERE clause; "no filter" is distinct from
/// "match nothing".
///
/// # Example
///
/// ```ignore
/// let f = Filter::new()
///     .eq("project_id", 1)
///     .eq("status", "published");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    entries: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition. A `Value::Null` is silently ignored.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.entries.push((column.into(), value));
        }
        self
    }

    /// Add an equality condition only when `value` is `Some`.
    pub fn maybe_eq(self, column: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

/// An ordered column→value set for INSERT and UPDATE statements.
///
/// Unlike [`Filter`], `Value::Null` entries are kept and bound as SQL NULL.
#[derive(Debug, Clone, Default)]
pub struct Values {
    entries: Vec<(String, Value)>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }
}

/// Sort direction for one ORDER BY term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction string. Anything other than case-insensitive
    /// `"desc"` sorts ascending.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// An ordered sequence of (column, direction) pairs.
///
/// Pair order determines ORDER BY clause order. An empty spec yields no
/// clause; the database default order is unspecified and must not be
/// relied upon.
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    entries: Vec<(String, SortDirection)>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(self, column: impl Into<String>) -> Self {
        self.by(column, SortDirection::Asc)
    }

    pub fn desc(self, column: impl Into<String>) -> Self {
        self.by(column, SortDirection::Desc)
    }

    pub fn by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.entries.push((column.into(), direction));
        self
    }

    /// Add a pair with a free-form direction string (see [`SortDirection::parse`]).
    pub fn by_str(self, column: impl Into<String>, direction: &str) -> Self {
        self.by(column, SortDirection::parse(direction))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.entries.iter().map(|(c, d)| (c.as_str(), *d))
    }
}
