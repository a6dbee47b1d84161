//! Tests (exams) and their questions.
//!
//! A [`Test`] is immutable once stored. The list view uses [`TestSummary`],
//! which carries everything except the questions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while assembling a test draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("questions are required")]
    MissingQuestions,
    #[error("duration must not exceed {} minutes", MAX_DURATION_MINUTES)]
    DurationTooLong,
}

/// Largest accepted duration; stores keep it in a signed 32-bit column.
pub const MAX_DURATION_MINUTES: u32 = i32::MAX.unsigned_abs();

/// Stable test identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestId(Uuid);

impl TestId {
    /// Generate a new random identifier.
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

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Multiple-choice question.
///
/// `correct_answer` indexes into `options`; the index is stored as given and
/// not range-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
}

/// Validated input for creating a test.
///
/// # Examples
/// ```
/// use exam_backend::domain::{Question, TestDraft};
///
/// let draft = TestDraft::try_new(
///     Some("Algebra".to_owned()),
///     Some(vec![Question {
///         text: "1 + 1?".to_owned(),
///         options: vec!["1".to_owned(), "2".to_owned()],
///         correct_answer: 1,
///     }]),
/// )
/// .unwrap();
/// assert_eq!(draft.title(), "Algebra");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDraft {
    title: String,
    subject: Option<String>,
    duration: Option<u32>,
    questions: Vec<Question>,
}

impl TestDraft {
    /// Require both a title and a question list.
    ///
    /// Presence is all that is checked: an empty title string or an empty
    /// question list is accepted.
    pub fn try_new(
        title: Option<String>,
        questions: Option<Vec<Question>>,
    ) -> Result<Self, TestValidationError> {
        let title = title.ok_or(TestValidationError::MissingTitle)?;
        let questions = questions.ok_or(TestValidationError::MissingQuestions)?;
        Ok(Self {
            title,
            subject: None,
            duration: None,
            questions,
        })
    }

    #[must_use]
    pub fn with_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }

    /// Attach the allotted time in minutes, up to [`MAX_DURATION_MINUTES`].
    pub fn with_duration(mut self, duration: Option<u32>) -> Result<Self, TestValidationError> {
        if duration.is_some_and(|minutes| minutes > MAX_DURATION_MINUTES) {
            return Err(TestValidationError::DurationTooLong);
        }
        self.duration = duration;
        Ok(self)
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Turn the draft into a stored test with the given identifier.
    #[must_use]
    pub fn into_test(self, id: TestId) -> Test {
        Test {
            id,
            title: self.title,
            subject: self.subject,
            duration: self.duration,
            questions: self.questions,
        }
    }
}

/// Stored test including its questions and answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test {
    id: TestId,
    title: String,
    subject: Option<String>,
    duration: Option<u32>,
    questions: Vec<Question>,
}

impl Test {
    /// Rebuild a test from stored parts.
    #[must_use]
    pub const fn new(
        id: TestId,
        title: String,
        subject: Option<String>,
        duration: Option<u32>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title,
            subject,
            duration,
            questions,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TestId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    #[must_use]
    pub const fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// List-view projection without questions.
    #[must_use]
    pub fn summary(&self) -> TestSummary {
        TestSummary {
            id: self.id,
            title: self.title.clone(),
            subject: self.subject.clone(),
            duration: self.duration,
        }
    }
}

/// A test as shown in listings: no questions, no answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSummary {
    pub id: TestId,
    pub title: String,
    pub subject: Option<String>,
    pub duration: Option<u32>,
}
