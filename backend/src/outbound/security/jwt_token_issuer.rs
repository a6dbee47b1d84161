//! HS256 JWT implementation of the `TokenIssuer` port.
//!
//! Access tokens carry `sub` (the user's email), `iat`, `nbf`, `exp`, a random
//! `jti`, `type = "access"` and `fresh = false`. Issue times come from the
//! injected clock; verification checks expiry against the system clock.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenError, TokenIssuer, VerifiedToken};
use crate::domain::{AccessToken, Email};

use super::TokenSecret;

/// Lifetime of an access token when none is configured.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    iat: i64,
    nbf: i64,
    exp: i64,
    jti: String,
    #[serde(rename = "type")]
    token_type: String,
    fresh: bool,
}

/// Signs and validates access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    pub fn new(secret: &TokenSecret, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &Email) -> Result<AccessToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::issue("token lifetime overflows the expiry timestamp"))?;
        let claims = AccessClaims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_owned(),
            fresh: false,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|err| TokenError::issue(err.to_string()))
    }

    fn verify(&self, token: &AccessToken) -> Result<VerifiedToken, TokenError> {
        let data = decode::<AccessClaims>(token.as_str(), &self.decoding_key, &Self::validation())
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        let claims = data.claims;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::invalid(format!(
                "unexpected token type {}",
                claims.token_type
            )));
        }
        let subject = Email::new(claims.sub).map_err(|err| TokenError::invalid(err.to_string()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::invalid("exp claim out of range"))?;
        Ok(VerifiedToken {
            subject,
            expires_at,
        })
    }
}
