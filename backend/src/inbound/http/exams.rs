//! Test authoring, listing, submission and result handlers.
//!
//! ```text
//! POST /api/test/create                {"title":"T","questions":[...]}
//! GET  /api/test/all
//! GET  /api/test/{test_id}
//! POST /api/test/submit                {"test_id":"..","student_id":"..","answers":{..}}
//! GET  /api/test/results/{student_id}
//! ```
//!
//! `/all`, `/submit` and `/results/..` are registered before `/{test_id}` so
//! the catch-all segment does not shadow them.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateTestRequest, SubmitTestRequest};
use crate::domain::{Question, StudentId, Test, TestResult, TestSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const TEST_CREATED: &str = "Test created successfully";
const TEST_SUBMITTED: &str = "Test submitted successfully";

/// `{"msg": ...}` acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Test submitted successfully")]
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Multiple-choice question as sent and returned over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionBody {
    #[schema(example = "What is 2 + 2?")]
    pub text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: u32,
}

impl From<QuestionBody> for Question {
    fn from(value: QuestionBody) -> Self {
        Self {
            text: value.text,
            options: value.options,
            correct_answer: value.correct_answer,
        }
    }
}

impl From<&Question> for QuestionBody {
    fn from(value: &Question) -> Self {
        Self {
            text: value.text.clone(),
            options: value.options.clone(),
            correct_answer: value.correct_answer,
        }
    }
}

/// Body of `POST /api/test/create`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateTestBody {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Allotted time in minutes.
    pub duration: Option<u32>,
    pub questions: Option<Vec<QuestionBody>>,
}

impl From<CreateTestBody> for CreateTestRequest {
    fn from(value: CreateTestBody) -> Self {
        Self {
            title: value.title,
            subject: value.subject,
            duration: value.duration,
            questions: value
                .questions
                .map(|questions| questions.into_iter().map(Question::from).collect()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTestResponse {
    #[schema(example = "Test created successfully")]
    pub msg: String,
    pub test_id: Uuid,
}

/// A test in the list view: no questions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestSummaryBody {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl From<TestSummary> for TestSummaryBody {
    fn from(value: TestSummary) -> Self {
        Self {
            id: *value.id.as_uuid(),
            title: value.title,
            subject: value.subject,
            duration: value.duration,
        }
    }
}

/// Full test including questions and the answer key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestBody {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub questions: Vec<QuestionBody>,
}

impl From<Test> for TestBody {
    fn from(value: Test) -> Self {
        Self {
            id: *value.id().as_uuid(),
            title: value.title().to_owned(),
            subject: value.subject().map(str::to_owned),
            duration: value.duration(),
            questions: value.questions().iter().map(QuestionBody::from).collect(),
        }
    }
}

/// Body of `POST /api/test/submit`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmitTestBody {
    pub test_id: Option<String>,
    pub student_id: Option<String>,
    /// Stored verbatim; any JSON value except `null`.
    #[schema(value_type = Object)]
    pub answers: Option<Value>,
    pub score: Option<f64>,
    /// Seconds spent on the attempt.
    pub time_spent: Option<u32>,
}

impl From<SubmitTestBody> for SubmitTestRequest {
    fn from(value: SubmitTestBody) -> Self {
        Self {
            test_id: value.test_id,
            student_id: value.student_id,
            answers: value.answers,
            score: value.score,
            time_spent: value.time_spent,
        }
    }
}

/// One recorded submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResultBody {
    pub id: Uuid,
    pub test_id: String,
    pub student_id: String,
    #[schema(value_type = Object)]
    pub answers: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
    pub submitted_at: DateTime<Utc>,
}

impl From<TestResult> for ResultBody {
    fn from(value: TestResult) -> Self {
        Self {
            id: *value.id.as_uuid(),
            test_id: value.test_id,
            student_id: value.student_id.to_string(),
            answers: value.answers,
            score: value.score,
            time_spent: value.time_spent,
            submitted_at: value.submitted_at,
        }
    }
}

/// Create a test.
#[utoipa::path(
    post,
    path = "/api/test/create",
    request_body = CreateTestBody,
    responses(
        (status = 201, description = "Test created", body = CreateTestResponse),
        (status = 400, description = "Missing title or questions", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tests"],
    operation_id = "createTest"
)]
#[post("/create")]
pub async fn create_test(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTestBody>,
) -> ApiResult<HttpResponse> {
    let test_id = state.tests.create_test(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CreateTestResponse {
        msg: TEST_CREATED.to_owned(),
        test_id: *test_id.as_uuid(),
    }))
}

/// List all tests without their questions.
#[utoipa::path(
    get,
    path = "/api/test/all",
    responses(
        (status = 200, description = "Tests in creation order", body = [TestSummaryBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tests"],
    operation_id = "listTests"
)]
#[get("/all")]
pub async fn list_tests(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TestSummaryBody>>> {
    let tests = state.tests_query.list_tests().await?;
    Ok(web::Json(tests.into_iter().map(Into::into).collect()))
}

/// Fetch one test with its questions.
#[utoipa::path(
    get,
    path = "/api/test/{test_id}",
    params(("test_id" = String, Path, description = "Test identifier (UUID)")),
    responses(
        (status = 200, description = "Test with questions", body = TestBody),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tests"],
    operation_id = "getTest"
)]
#[get("/{test_id}")]
pub async fn get_test(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TestBody>> {
    let test = state.tests_query.get_test(&path.into_inner()).await?;
    Ok(web::Json(test.into()))
}

/// Record a submission.
#[utoipa::path(
    post,
    path = "/api/test/submit",
    request_body = SubmitTestBody,
    responses(
        (status = 200, description = "Submission stored", body = MessageResponse),
        (status = 400, description = "Missing test_id, student_id or answers", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tests"],
    operation_id = "submitTest"
)]
#[post("/submit")]
pub async fn submit_test(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitTestBody>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.tests.submit_test(payload.into_inner().into()).await?;
    Ok(web::Json(MessageResponse::new(TEST_SUBMITTED)))
}

/// List every submission recorded for a student.
#[utoipa::path(
    get,
    path = "/api/test/results/{student_id}",
    params(("student_id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Results in submission order", body = [ResultBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tests"],
    operation_id = "getResults"
)]
#[get("/results/{student_id}")]
pub async fn get_results(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ResultBody>>> {
    let student_id = StudentId::new(path.into_inner());
    let results = state.tests_query.get_results(&student_id).await?;
    Ok(web::Json(results.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "exams_tests.rs"]
mod tests;
