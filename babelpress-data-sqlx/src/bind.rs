//! Positional binding of dynamic `serde_json::Value` parameters.
//!
//! The query builder hands back `(sql, Vec<Value>)`; this module attaches
//! each value to the statement with a typed bind. Values never reach the
//! SQL text itself.

use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

/// Bind one dynamic value onto a statement, choosing the Postgres type
/// from the JSON type: strings and booleans bind as themselves, numbers
/// as `BIGINT` (or `DOUBLE PRECISION` for non-integers), arrays and
/// objects as `jsonb`, and `null` as SQL NULL.
pub trait BindValue: Sized {
    fn bind_value(self, value: &Value) -> Self;

    fn bind_values(mut self, values: &[Value]) -> Self {
        for value in values {
            self = self.bind_value(value);
        }
        self
    }
}

impl<'q> BindValue for Query<'q, Postgres, PgArguments> {
    fn bind_value(self, value: &Value) -> Self {
        match value {
            Value::Null => self.bind(None::<String>),
            Value::Bool(b) => self.bind(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => self.bind(i),
                None => self.bind(n.as_f64()),
            },
            Value::String(s) => self.bind(s.clone()),
            other => self.bind(other.clone()),
        }
    }
}

impl<'q, O> BindValue for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_value(self, value: &Value) -> Self {
        match value {
            Value::Null => self.bind(None::<String>),
            Value::Bool(b) => self.bind(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => self.bind(i),
                None => self.bind(n.as_f64()),
            },
            Value::String(s) => self.bind(s.clone()),
            other => self.bind(other.clone()),
        }
    }
}
