//! Driving port for creating tests and recording submissions.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, Question, ResultId, TestId};

/// Raw create-test input; presence is validated by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTestRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub duration: Option<u32>,
    pub questions: Option<Vec<Question>>,
}

/// Raw submission input; presence is validated by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitTestRequest {
    pub test_id: Option<String>,
    pub student_id: Option<String>,
    pub answers: Option<Value>,
    pub score: Option<f64>,
    pub time_spent: Option<u32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestCommand: Send + Sync {
    /// Store a new test and return its identifier.
    async fn create_test(&self, request: CreateTestRequest) -> Result<TestId, Error>;

    /// Record a submission verbatim and return the stored result's identifier.
    async fn submit_test(&self, request: SubmitTestRequest) -> Result<ResultId, Error>;
}
