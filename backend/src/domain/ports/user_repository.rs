//! Driven port for user persistence.
use async_trait::async_trait;

use crate::domain::{Email, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds this email.
        DuplicateEmail { email: String } => "user with email {email} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store `user` unless its email is already taken.
    ///
    /// The existence check and the insert are a single atomic step;
    /// implementations return [`UserPersistenceError::DuplicateEmail`] when the
    /// email is present, never a second row.
    async fn insert_if_absent(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by exact email match.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;
}
