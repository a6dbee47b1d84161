//! Domain primitives, services and ports.
//!
//! Purpose: define the exam platform's entities (users, tests, results), the
//! ports adapters implement, and the services behind the driving ports.
//! Nothing here depends on HTTP or a particular store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Email, Credentials: accounts and login input.
//! - Test, TestSummary, Question: test definitions.
//! - Submission, TestResult: recorded attempts.
//! - AccountService, TestService: driving port implementations.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod exam;
pub mod ports;
pub mod submission;
pub mod test_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{AccessToken, Credentials, CredentialsValidationError};
pub use self::auth_service::AccountService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exam::{Question, Test, TestDraft, TestId, TestSummary, TestValidationError};
pub use self::submission::{
    ResultId, StudentId, Submission, SubmissionValidationError, TestResult,
};
pub use self::test_service::TestService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordHash, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use exam_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Test not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
