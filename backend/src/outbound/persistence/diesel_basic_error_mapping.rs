//! Shared Diesel error mapping for the exam repositories.
//!
//! Every repository maps pool failures to its `Connection` variant and Diesel
//! failures to `Query`, except closed connections. The user repository also
//! needs unique violations, which [`map_diesel_error_with_conflict`] routes
//! to a caller-supplied constructor.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// Map Diesel errors into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Like [`map_basic_diesel_error`], but unique violations go to `conflict`.
pub fn map_diesel_error_with_conflict<E, Q, C, K>(
    error: DieselError,
    query: Q,
    connection: C,
    conflict: K,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    K: FnOnce() -> E,
{
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        log_diesel_error(&error);
        return conflict();
    }
    map_basic_diesel_error(error, query, connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
        Conflict,
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("detail".to_owned()))
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        Mapped::Connection("database connection error".to_owned())
    )]
    #[case(
        database_error(DatabaseErrorKind::UniqueViolation),
        Mapped::Query("database error")
    )]
    fn basic_mapping(#[case] error: DieselError, #[case] expected: Mapped) {
        let mapped = map_basic_diesel_error(error, Mapped::Query, |message| {
            Mapped::Connection(message.to_owned())
        });
        assert_eq!(mapped, expected);
    }

    #[rstest]
    fn unique_violation_routes_to_conflict() {
        let mapped = map_diesel_error_with_conflict(
            database_error(DatabaseErrorKind::UniqueViolation),
            Mapped::Query,
            |message| Mapped::Connection(message.to_owned()),
            || Mapped::Conflict,
        );
        assert_eq!(mapped, Mapped::Conflict);
    }

    #[rstest]
    fn other_errors_skip_conflict() {
        let mapped = map_diesel_error_with_conflict(
            database_error(DatabaseErrorKind::ForeignKeyViolation),
            Mapped::Query,
            |message| Mapped::Connection(message.to_owned()),
            || Mapped::Conflict,
        );
        assert_eq!(mapped, Mapped::Query("database error"));
    }
}
