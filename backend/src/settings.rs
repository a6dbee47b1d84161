//! Application settings loaded via OrthoConfig.
//!
//! Values are layered from command-line flags, `EXAM_*` environment
//! variables and optional config files. Every field is optional; accessors
//! supply the defaults.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::security::DEFAULT_TOKEN_TTL_MINUTES;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_TOKEN_SECRET_FILE: &str = "/var/run/secrets/token_secret";

/// Configuration values controlling the HTTP server and its backing stores.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAM")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// File holding the token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Permit a random per-process secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Access token lifetime in minutes.
    pub token_ttl_minutes: Option<i64>,
}

impl AppSettings {
    /// Return the bind address, defaulting to all interfaces on port 8080.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_pool_max_size(&self) -> u32 {
        self.db_pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn token_secret_file(&self) -> &Path {
        self.token_secret_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_TOKEN_SECRET_FILE))
    }

    /// Return the token lifetime.
    ///
    /// Non-positive values, and values too large to represent as a duration,
    /// fall back to the default.
    pub fn token_ttl(&self) -> chrono::Duration {
        self.token_ttl_minutes
            .filter(|minutes| *minutes > 0)
            .and_then(chrono::Duration::try_minutes)
            .unwrap_or_else(default_token_ttl)
    }
}

fn default_token_ttl() -> chrono::Duration {
    chrono::Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES)
}
