//! Password hashing and token signing adapters.

mod argon2_password_hasher;
mod jwt_token_issuer;
mod secret;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_issuer::{DEFAULT_TOKEN_TTL_MINUTES, JwtTokenIssuer};
pub use secret::{MIN_SECRET_LEN, TokenSecret, TokenSecretError};
