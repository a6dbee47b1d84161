//! Account signup and login.
//!
//! Implements the [`AuthService`] driving port over a user repository, a
//! password hasher and a token issuer. The service keeps no state of its own.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AuthService, PasswordHashError, PasswordHasher, TokenError, TokenIssuer, UserPersistenceError,
    UserRepository,
};
use crate::domain::{AccessToken, Credentials, Error, User};

pub(crate) const SIGNUP_DUPLICATE_MESSAGE: &str = "User already exists";
pub(crate) const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(error = %message, "user repository unavailable");
            Error::service_unavailable("user store unavailable")
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::already_exists(SIGNUP_DUPLICATE_MESSAGE)
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(format!("token issuance failed: {error}"))
}

/// Auth service backed by injected ports.
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AccountService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U, H, T> AuthService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn signup(&self, credentials: &Credentials) -> Result<(), Error> {
        let hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error)?;
        let user = User::register(credentials.email().clone(), hash);

        self.users
            .insert_if_absent(&user)
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(|err| {
                warn!(user_id = %user.id(), error = %err, "stored password hash unusable");
                map_hash_error(err)
            })?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        }

        let token = self.tokens.issue(user.email()).map_err(map_token_error)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(token)
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
