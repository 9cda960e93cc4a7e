use babelpress_data::DataError;

/// Classifies driver failures into the data layer's error kinds.
///
/// `DataError` and `sqlx::Error` are both foreign to each other's crates,
/// so a `From` impl is off the table; the repository calls
/// `.into_data_error()` at each await point instead.
///
/// The mapping is deliberately coarse: the spec treats everything the
/// store throws as one uniform kind, and only the message varies. A
/// violated constraint keeps its constraint name in the message, since
/// that is what a caller debugging a rejected insert actually needs.
pub trait SqlxErrorExt {
    fn into_data_error(self) -> DataError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_data_error(self) -> DataError {
        match self {
            sqlx::Error::RowNotFound => DataError::not_found("no matching row"),
            sqlx::Error::Database(db) => {
                let message = match db.constraint() {
                    Some(constraint) => format!("constraint '{constraint}' violated: {db}"),
                    None => db.to_string(),
                };
                DataError::Database(message.into())
            }
            sqlx::Error::PoolTimedOut => {
                DataError::Database("timed out waiting for a pooled connection".into())
            }
            other => DataError::database(other),
        }
    }
}

/// Convenience alias for data-layer results using `DataError`.
pub type SqlxResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_the_not_found_kind() {
        let err = sqlx::Error::RowNotFound.into_data_error();
        assert!(matches!(err, DataError::NotFound(_)), "got {err}");
    }

    #[test]
    fn pool_timeout_keeps_a_diagnosable_message() {
        let err = sqlx::Error::PoolTimedOut.into_data_error();
        match err {
            DataError::Database(inner) => {
                assert!(inner.to_string().contains("pooled connection"))
            }
            other => panic!("expected Database, got {other}"),
        }
    }

    #[test]
    fn other_driver_errors_become_the_database_kind() {
        let err = sqlx::Error::Protocol("unexpected message".into()).into_data_error();
        match err {
            DataError::Database(inner) => {
                assert!(inner.to_string().contains("unexpected message"))
            }
            other => panic!("expected Database, got {other}"),
        }
    }
}
