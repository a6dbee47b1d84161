//! Signing secret for access tokens.
//!
//! The secret is read from a file in production. Only its SHA-256
//! fingerprint is ever logged.

use std::fmt;
use std::path::Path;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Shortest secret accepted for HS256 signing, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

const EPHEMERAL_SECRET_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum TokenSecretError {
    #[error("failed to read token secret at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret must be at least {MIN_SECRET_LEN} bytes, got {len}")]
    TooShort { len: usize },
}

/// HMAC key material, zeroed on drop.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw key bytes. Trailing ASCII whitespace (a newline left by an
    /// editor or `echo`) is not part of the key.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, TokenSecretError> {
        let mut bytes = Zeroizing::new(bytes.into());
        let len = bytes.trim_ascii_end().len();
        bytes.truncate(len);
        if len < MIN_SECRET_LEN {
            return Err(TokenSecretError::TooShort { len });
        }
        Ok(Self(bytes))
    }

    /// Load the secret from `path`.
    pub fn from_file(path: &Path) -> Result<Self, TokenSecretError> {
        let bytes = std::fs::read(path).map_err(|source| TokenSecretError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(bytes)
    }

    /// Random secret that lives only as long as the process. Tokens signed
    /// with it stop verifying after a restart.
    #[must_use]
    pub fn ephemeral() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// First 8 bytes of the SHA-256 digest, hex encoded.
    ///
    /// # Examples
    /// ```
    /// use exam_backend::outbound::security::TokenSecret;
    ///
    /// let secret = TokenSecret::from_bytes(vec![b'k'; 32]).unwrap();
    /// assert_eq!(secret.fingerprint().len(), 16);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..8])
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenSecret(fingerprint={})", self.fingerprint())
    }
}
