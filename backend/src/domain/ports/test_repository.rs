//! Driven port for test persistence.
use async_trait::async_trait;

use crate::domain::{Test, TestId, TestSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by test repository adapters.
    pub enum TestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "test repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "test repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestRepository: Send + Sync {
    /// Append a new test.
    async fn insert(&self, test: &Test) -> Result<(), TestRepositoryError>;

    /// All tests without their questions, in insertion order.
    async fn list_summaries(&self) -> Result<Vec<TestSummary>, TestRepositoryError>;

    /// Fetch a test with its questions.
    async fn find_by_id(&self, id: &TestId) -> Result<Option<Test>, TestRepositoryError>;
}
