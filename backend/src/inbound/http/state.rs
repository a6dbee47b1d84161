//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so
//! handler tests can swap in mocks without any storage.

use std::sync::Arc;

use crate::domain::ports::{AuthService, TestCommand, TestQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub tests: Arc<dyn TestCommand>,
    pub tests_query: Arc<dyn TestQuery>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        tests: Arc<dyn TestCommand>,
        tests_query: Arc<dyn TestQuery>,
    ) -> Self {
        Self {
            auth,
            tests,
            tests_query,
        }
    }
}
