//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use exam_backend::domain::ports::{ResultRepository, TestRepository, UserRepository};
use exam_backend::domain::{AccountService, TestService};
use exam_backend::inbound::http::state::HttpState;
use exam_backend::outbound::memory::MemoryStore;
use exam_backend::outbound::persistence::{
    DieselResultRepository, DieselTestRepository, DieselUserRepository,
};
use exam_backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

use super::ServerConfig;

/// Build the HTTP state from the configured store backend.
///
/// Uses the Diesel repositories when a pool is available, otherwise a single
/// shared [`MemoryStore`] serves all three repository ports.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtTokenIssuer::new(
        &config.token_secret,
        config.token_ttl,
        clock.clone(),
    ));

    match &config.db_pool {
        Some(pool) => state_from_stores(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTestRepository::new(pool.clone())),
            Arc::new(DieselResultRepository::new(pool.clone())),
            tokens,
            clock,
        ),
        None => {
            let store = Arc::new(MemoryStore::new());
            state_from_stores(store.clone(), store.clone(), store, tokens, clock)
        }
    }
}

fn state_from_stores<U, T, R>(
    users: Arc<U>,
    tests: Arc<T>,
    results: Arc<R>,
    tokens: Arc<JwtTokenIssuer>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    T: TestRepository + 'static,
    R: ResultRepository + 'static,
{
    let auth = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
    ));
    let tests = Arc::new(TestService::new(tests, results, clock));
    HttpState::new(auth, tests.clone(), tests)
}
