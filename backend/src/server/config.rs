//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use exam_backend::outbound::persistence::DbPool;
use exam_backend::outbound::security::TokenSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret, token_ttl: chrono::Duration) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, users, tests and results are stored in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Name of the store backend, for startup logs.
    #[must_use]
    pub fn store_kind(&self) -> &'static str {
        if self.db_pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
