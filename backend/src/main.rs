//! Backend entry-point: loads settings, prepares stores and serves the REST API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exam_backend::inbound::http::health::HealthState;
use exam_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use exam_backend::outbound::security::TokenSecret;
use exam_backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let token_secret = load_token_secret(&settings)?;
    info!(
        fingerprint = %token_secret.fingerprint(),
        ttl_minutes = settings.token_ttl().num_minutes(),
        "token signing secret loaded"
    );

    let mut config = ServerConfig::new(settings.bind_addr(), token_secret, settings.token_ttl());
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_pool_max_size());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database URL configured; data will not survive a restart");
    }

    info!(
        bind_addr = %settings.bind_addr(),
        store = config.store_kind(),
        "starting HTTP server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(
        shutdown_signal(),
        health_state.clone(),
        server.handle(),
    ));
    health_state.mark_ready();
    server.await
}

/// Read the token secret, falling back to a random one in development.
fn load_token_secret(settings: &AppSettings) -> std::io::Result<TokenSecret> {
    let path = settings.token_secret_file();
    match TokenSecret::from_file(path) {
        Ok(secret) => Ok(secret),
        Err(e) => {
            if cfg!(debug_assertions) || settings.allow_ephemeral_secret {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "using temporary token secret (dev only)"
                );
                Ok(TokenSecret::ephemeral())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to load token secret: {e}"
                )))
            }
        }
    }
}
