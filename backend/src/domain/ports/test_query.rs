//! Driving port for reading tests and results.

use async_trait::async_trait;

use crate::domain::{Error, StudentId, Test, TestResult, TestSummary};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestQuery: Send + Sync {
    /// Every test, questions omitted.
    async fn list_tests(&self) -> Result<Vec<TestSummary>, Error>;

    /// One test including questions and answer key.
    ///
    /// `test_id` is the raw path segment; values that are not UUIDs resolve
    /// to `NotFound` like any other unknown id.
    async fn get_test(&self, test_id: &str) -> Result<Test, Error>;

    /// Every result recorded for `student_id`.
    async fn get_results(&self, student_id: &StudentId) -> Result<Vec<TestResult>, Error>;
}
