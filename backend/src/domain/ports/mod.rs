//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, tokens) are implemented by outbound
//! adapters. Driving ports (`AuthService`, `TestCommand`, `TestQuery`) are
//! what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod password_hasher;
mod result_repository;
mod test_command;
mod test_query;
mod test_repository;
mod token_issuer;
mod user_repository;

pub use auth_service::AuthService;
#[cfg(test)]
pub use auth_service::MockAuthService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use result_repository::MockResultRepository;
pub use result_repository::{ResultRepository, ResultRepositoryError};
#[cfg(test)]
pub use test_command::MockTestCommand;
pub use test_command::{CreateTestRequest, SubmitTestRequest, TestCommand};
#[cfg(test)]
pub use test_query::MockTestQuery;
pub use test_query::TestQuery;
#[cfg(test)]
pub use test_repository::MockTestRepository;
pub use test_repository::{TestRepository, TestRepositoryError};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer, VerifiedToken};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
