use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("A database constraint was violated: {0}")]
    ConstraintViolation(String),

    #[error("The submitted value does not fit its column: {0}")]
    InvalidInput(String),

    #[error("The requested data was not found in the database.")]
    NotFound,

    #[error("Database query failed: {0}")]
    QueryError(#[source] sqlx::Error),
}

/// Classifies driver errors so callers can tell a client mistake (duplicate key,
/// dangling foreign key, oversized value) from an infrastructure failure.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return DbError::NotFound;
        }
        if let Some(db_err) = err.as_database_error() {
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return DbError::ConstraintViolation(db_err.message().to_string());
            }
            if is_data_exception(db_err.code().as_deref()) {
                return DbError::InvalidInput(db_err.message().to_string());
            }
        }
        DbError::QueryError(err)
    }
}

/// SQLSTATE class 22: string too long, numeric out of range, bad datetime, ...
fn is_data_exception(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.starts_with("22"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound
        ));
    }

    #[test]
    fn pool_errors_stay_query_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::QueryError(_)
        ));
    }

    #[test]
    fn data_exceptions_are_sqlstate_class_22() {
        assert!(is_data_exception(Some("22001")));
        assert!(is_data_exception(Some("22003")));
        assert!(!is_data_exception(Some("23505")));
        assert!(!is_data_exception(None));
    }
}
