//! Test submissions and the results they produce.
//!
//! Results are append-only. The referenced test and student are kept as
//! the caller sent them; nothing checks that either exists.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Validation errors for submission payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionValidationError {
    #[error("test_id is required")]
    MissingTestId,
    #[error("student_id is required")]
    MissingStudentId,
    #[error("answers are required")]
    MissingAnswers,
    #[error("time_spent must not exceed {} seconds", MAX_TIME_SPENT_SECONDS)]
    TimeSpentTooLong,
}

/// Largest accepted `time_spent`; stores keep it in a signed 32-bit column.
pub const MAX_TIME_SPENT_SECONDS: u32 = i32::MAX.unsigned_abs();

/// Stable result identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultId(Uuid);

impl ResultId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Opaque student reference, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentId(String);

impl StudentId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated submission awaiting a timestamp and identifier.
///
/// # Examples
/// ```
/// use exam_backend::domain::Submission;
/// use serde_json::json;
///
/// let submission = Submission::try_new(
///     Some("t-1".to_owned()),
///     Some("s-1".to_owned()),
///     Some(json!({ "0": 1 })),
/// )
/// .unwrap();
/// assert_eq!(submission.student_id().as_str(), "s-1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    test_id: String,
    student_id: StudentId,
    answers: Value,
    score: Option<f64>,
    time_spent: Option<u32>,
}

impl Submission {
    /// Require test id, student id and answers.
    ///
    /// A JSON `null` for `answers` counts as absent.
    pub fn try_new(
        test_id: Option<String>,
        student_id: Option<String>,
        answers: Option<Value>,
    ) -> Result<Self, SubmissionValidationError> {
        let test_id = test_id.ok_or(SubmissionValidationError::MissingTestId)?;
        let student_id = student_id.ok_or(SubmissionValidationError::MissingStudentId)?;
        let answers = answers
            .filter(|value| !value.is_null())
            .ok_or(SubmissionValidationError::MissingAnswers)?;
        Ok(Self {
            test_id,
            student_id: StudentId::new(student_id),
            answers,
            score: None,
            time_spent: None,
        })
    }

    /// Attach a client-computed score.
    #[must_use]
    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    /// Attach the time spent in seconds, up to [`MAX_TIME_SPENT_SECONDS`].
    pub fn with_time_spent(
        mut self,
        time_spent: Option<u32>,
    ) -> Result<Self, SubmissionValidationError> {
        if time_spent.is_some_and(|seconds| seconds > MAX_TIME_SPENT_SECONDS) {
            return Err(SubmissionValidationError::TimeSpentTooLong);
        }
        self.time_spent = time_spent;
        Ok(self)
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    /// Stamp the submission, producing the result to store.
    #[must_use]
    pub fn into_result(self, id: ResultId, submitted_at: DateTime<Utc>) -> TestResult {
        TestResult {
            id,
            test_id: self.test_id,
            student_id: self.student_id,
            answers: self.answers,
            score: self.score,
            time_spent: self.time_spent,
            submitted_at,
        }
    }
}

/// Recorded attempt at a test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub id: ResultId,
    pub test_id: String,
    pub student_id: StudentId,
    pub answers: Value,
    pub score: Option<f64>,
    pub time_spent: Option<u32>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, Some("s"), Some(json!([1])), SubmissionValidationError::MissingTestId)]
    #[case(Some("t"), None, Some(json!([1])), SubmissionValidationError::MissingStudentId)]
    #[case(Some("t"), Some("s"), None, SubmissionValidationError::MissingAnswers)]
    #[case(Some("t"), Some("s"), Some(Value::Null), SubmissionValidationError::MissingAnswers)]
    fn rejects_absent_fields(
        #[case] test_id: Option<&str>,
        #[case] student_id: Option<&str>,
        #[case] answers: Option<Value>,
        #[case] expected: SubmissionValidationError,
    ) {
        let err = Submission::try_new(
            test_id.map(str::to_owned),
            student_id.map(str::to_owned),
            answers,
        )
        .expect_err("submission should be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn keeps_answers_verbatim() {
        let answers = json!({ "q1": [0, 2], "note": "unsure" });
        let submitted_at = Utc::now();
        let result = Submission::try_new(
            Some("no-such-test".to_owned()),
            Some("student-7".to_owned()),
            Some(answers.clone()),
        )
        .expect("valid")
        .with_score(Some(0.5))
        .with_time_spent(Some(90))
        .expect("time spent in range")
        .into_result(ResultId::random(), submitted_at);

        assert_eq!(result.test_id, "no-such-test");
        assert_eq!(result.student_id.as_str(), "student-7");
        assert_eq!(result.answers, answers);
        assert_eq!(result.score, Some(0.5));
        assert_eq!(result.time_spent, Some(90));
        assert_eq!(result.submitted_at, submitted_at);
    }

    #[rstest]
    fn rejects_time_spent_beyond_storage_range() {
        let err = Submission::try_new(Some("t".to_owned()), Some("s".to_owned()), Some(json!([1])))
            .expect("valid")
            .with_time_spent(Some(3_000_000_000))
            .expect_err("out of range");
        assert_eq!(err, SubmissionValidationError::TimeSpentTooLong);
    }

    #[rstest]
    fn empty_strings_count_as_present() {
        let submission =
            Submission::try_new(Some(String::new()), Some(String::new()), Some(json!({})));
        assert!(submission.is_ok());
    }
}
