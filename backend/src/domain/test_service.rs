//! Test authoring, listing and submission.
//!
//! [`TestService`] implements both the command and query driving ports over
//! the test and result repositories. Submission timestamps come from the
//! injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateTestRequest, ResultRepository, ResultRepositoryError, SubmitTestRequest, TestCommand,
    TestQuery, TestRepository, TestRepositoryError,
};
use crate::domain::{
    Error, ResultId, StudentId, Submission, Test, TestDraft, TestId, TestResult, TestSummary,
};

pub(crate) const INVALID_TEST_MESSAGE: &str = "Invalid test data";
pub(crate) const TEST_NOT_FOUND_MESSAGE: &str = "Test not found";
pub(crate) const INVALID_SUBMISSION_MESSAGE: &str = "Invalid submission data";

fn map_test_error(error: TestRepositoryError) -> Error {
    match error {
        TestRepositoryError::Connection { message } => {
            warn!(error = %message, "test repository unavailable");
            Error::service_unavailable("test store unavailable")
        }
        TestRepositoryError::Query { message } => {
            Error::internal(format!("test repository error: {message}"))
        }
    }
}

fn map_result_error(error: ResultRepositoryError) -> Error {
    match error {
        ResultRepositoryError::Connection { message } => {
            warn!(error = %message, "result repository unavailable");
            Error::service_unavailable("result store unavailable")
        }
        ResultRepositoryError::Query { message } => {
            Error::internal(format!("result repository error: {message}"))
        }
    }
}

/// Test service over injected repositories and clock.
#[derive(Clone)]
pub struct TestService<T, R> {
    tests: Arc<T>,
    results: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<T, R> TestService<T, R> {
    pub fn new(tests: Arc<T>, results: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tests,
            results,
            clock,
        }
    }
}

#[async_trait]
impl<T, R> TestCommand for TestService<T, R>
where
    T: TestRepository,
    R: ResultRepository,
{
    async fn create_test(&self, request: CreateTestRequest) -> Result<TestId, Error> {
        let CreateTestRequest {
            title,
            subject,
            duration,
            questions,
        } = request;
        let test = TestDraft::try_new(title, questions)
            .and_then(|draft| draft.with_subject(subject).with_duration(duration))
            .map_err(|err| {
                Error::invalid_input(INVALID_TEST_MESSAGE)
                    .with_details(json!({ "reason": err.to_string() }))
            })?
            .into_test(TestId::random());

        self.tests.insert(&test).await.map_err(map_test_error)?;

        info!(
            test_id = %test.id(),
            questions = test.questions().len(),
            "test created"
        );
        Ok(test.id())
    }

    async fn submit_test(&self, request: SubmitTestRequest) -> Result<ResultId, Error> {
        let SubmitTestRequest {
            test_id,
            student_id,
            answers,
            score,
            time_spent,
        } = request;
        let result = Submission::try_new(test_id, student_id, answers)
            .and_then(|submission| submission.with_score(score).with_time_spent(time_spent))
            .map_err(|err| {
                Error::invalid_input(INVALID_SUBMISSION_MESSAGE)
                    .with_details(json!({ "reason": err.to_string() }))
            })?
            .into_result(ResultId::random(), self.clock.utc());

        self.results.append(&result).await.map_err(map_result_error)?;

        info!(
            result_id = %result.id,
            test_id = %result.test_id,
            student_id = %result.student_id,
            "submission recorded"
        );
        Ok(result.id)
    }
}

#[async_trait]
impl<T, R> TestQuery for TestService<T, R>
where
    T: TestRepository,
    R: ResultRepository,
{
    async fn list_tests(&self) -> Result<Vec<TestSummary>, Error> {
        self.tests.list_summaries().await.map_err(map_test_error)
    }

    async fn get_test(&self, test_id: &str) -> Result<Test, Error> {
        let Ok(id) = test_id.parse::<TestId>() else {
            debug!(test_id, "test id is not a UUID");
            return Err(Error::not_found(TEST_NOT_FOUND_MESSAGE));
        };

        self.tests
            .find_by_id(&id)
            .await
            .map_err(map_test_error)?
            .ok_or_else(|| Error::not_found(TEST_NOT_FOUND_MESSAGE))
    }

    async fn get_results(&self, student_id: &StudentId) -> Result<Vec<TestResult>, Error> {
        self.results
            .list_for_student(student_id)
            .await
            .map_err(map_result_error)
    }
}

#[cfg(test)]
#[path = "test_service_tests.rs"]
mod tests;
