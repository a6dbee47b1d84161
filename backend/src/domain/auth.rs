//! Authentication primitives: validated credentials and bearer tokens.
//!
//! Inbound adapters build [`Credentials`] from raw request fields before
//! calling the auth service, so the service only sees well-formed input.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, UserValidationError};

/// Errors raised when credential fields are absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or empty.
    EmptyEmail,
    /// Password was missing or empty.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Email/password pair used for both signup and login.
///
/// ## Invariants
/// - `email` is non-empty and kept exactly as supplied.
/// - `password` is non-empty; its buffer is zeroed on drop.
///
/// # Examples
/// ```
/// use exam_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("ada@example.com", "hunter2").unwrap();
/// assert_eq!(creds.email().as_str(), "ada@example.com");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(|err| match err {
            UserValidationError::EmptyEmail | UserValidationError::EmptyPasswordHash => {
                CredentialsValidationError::EmptyEmail
            }
        })?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email identifying the account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed bearer token returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token string.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper, yielding the encoded token.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
