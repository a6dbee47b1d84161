//! Driving port for signup and login.
//!
//! Inbound adapters call this port with validated [`Credentials`]; handler
//! tests substitute a mock instead of wiring storage and hashing.

use async_trait::async_trait;

use crate::domain::{AccessToken, Credentials, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account. Fails with `AlreadyExists` for a taken email.
    async fn signup(&self, credentials: &Credentials) -> Result<(), Error>;

    /// Authenticate and issue a bearer token. Fails with
    /// `InvalidCredentials` for an unknown email or a wrong password.
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error>;
}
