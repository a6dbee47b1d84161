//! Driven port for signed bearer tokens.

use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, Email};

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or checking tokens.
    pub enum TokenError {
        /// Signing failed.
        Issue { message: String } => "token could not be issued: {message}",
        /// Signature, claims or expiry did not validate.
        Invalid { message: String } => "token is invalid: {message}",
    }
}

/// Claims recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject: Email,
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue an access token whose subject is `subject`.
    fn issue(&self, subject: &Email) -> Result<AccessToken, TokenError>;

    /// Validate a token previously produced by [`TokenIssuer::issue`].
    fn verify(&self, token: &AccessToken) -> Result<VerifiedToken, TokenError>;
}
