/// Trait representing a database entity with a table name, id column, and column list.
///
/// `columns()` doubles as the identifier allow-list: the repository rejects any
/// filter, sort, or value key that is not in this list before building SQL, so
/// column names never flow from untrusted input into query text.
///
/// # Example
///
/// ```ignore
/// impl Entity for Post {
///     type Id = i64;
///     fn table_name() -> &'static str { "posts" }
///     fn columns() -> &'static [&'static str] { &["id", "title", "slug", "created_at"] }
///     fn id(&self) -> &i64 { &self.id }
/// }
/// ```
pub trait Entity: Send + Sync + Unpin + 'static {
    type Id: Send + Sync + ToString + 'static;

    fn table_name() -> &'static str;

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str];

    fn id(&self) -> &Self::Id;

    /// Whether `name` is a known column of this entity's table.
    fn has_column(name: &str) -> bool {
        Self::columns().contains(&name)
    }
}
