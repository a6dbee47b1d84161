//! Driven port for submitted results.
use async_trait::async_trait;

use crate::domain::{StudentId, TestResult};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by result repository adapters.
    pub enum ResultRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "result repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "result repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Append one result. Results are never updated or removed.
    async fn append(&self, result: &TestResult) -> Result<(), ResultRepositoryError>;

    /// Results recorded for `student_id`, in insertion order.
    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<TestResult>, ResultRepositoryError>;
}
