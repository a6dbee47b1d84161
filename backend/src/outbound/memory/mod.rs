//! Process-local adapters used when no database is configured.
//!
//! [`MemoryStore`] implements every repository port over one mutex-guarded
//! state, so uniqueness checks and inserts happen under the same lock. Data
//! lives as long as the process.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ResultRepository, ResultRepositoryError, TestRepository, TestRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Email, StudentId, Test, TestId, TestResult, TestSummary, User};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    tests: Vec<Test>,
    results: Vec<TestResult>,
}

/// In-memory users, tests and results, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, query: impl FnOnce(String) -> E) -> Result<MutexGuard<'_, State>, E> {
        self.state
            .lock()
            .map_err(|err| query(format!("memory store lock poisoned: {err}")))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_if_absent(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if state.users.iter().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().to_string()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|user| user.email() == email).cloned())
    }
}

#[async_trait]
impl TestRepository for MemoryStore {
    async fn insert(&self, test: &Test) -> Result<(), TestRepositoryError> {
        self.lock(TestRepositoryError::query)?.tests.push(test.clone());
        Ok(())
    }

    async fn list_summaries(&self) -> Result<Vec<TestSummary>, TestRepositoryError> {
        let state = self.lock(TestRepositoryError::query)?;
        Ok(state.tests.iter().map(Test::summary).collect())
    }

    async fn find_by_id(&self, id: &TestId) -> Result<Option<Test>, TestRepositoryError> {
        let state = self.lock(TestRepositoryError::query)?;
        Ok(state.tests.iter().find(|test| test.id() == *id).cloned())
    }
}

#[async_trait]
impl ResultRepository for MemoryStore {
    async fn append(&self, result: &TestResult) -> Result<(), ResultRepositoryError> {
        self.lock(ResultRepositoryError::query)?
            .results
            .push(result.clone());
        Ok(())
    }

    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<TestResult>, ResultRepositoryError> {
        let state = self.lock(ResultRepositoryError::query)?;
        Ok(state
            .results
            .iter()
            .filter(|result| &result.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::{PasswordHash, Question, ResultId, Submission, TestDraft};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    fn user(email: &str) -> User {
        User::register(
            Email::new(email).expect("email"),
            PasswordHash::new("$argon2id$stub").expect("hash"),
        )
    }

    fn test_titled(title: &str) -> Test {
        TestDraft::try_new(
            Some(title.to_owned()),
            Some(vec![Question {
                text: "Q".to_owned(),
                options: vec!["A".to_owned()],
                correct_answer: 0,
            }]),
        )
        .expect("valid draft")
        .into_test(TestId::random())
    }

    fn result_for(student: &str, test_id: &str) -> TestResult {
        Submission::try_new(
            Some(test_id.to_owned()),
            Some(student.to_owned()),
            Some(json!([0])),
        )
        .expect("valid submission")
        .into_result(ResultId::random(), Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn second_insert_with_same_email_is_rejected(store: MemoryStore) {
        store
            .insert_if_absent(&user("ada@example.com"))
            .await
            .expect("first insert");
        let err = store
            .insert_if_absent(&user("ada@example.com"))
            .await
            .expect_err("duplicate");

        assert!(matches!(err, UserPersistenceError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn email_lookup_is_case_sensitive(store: MemoryStore) {
        store
            .insert_if_absent(&user("ada@example.com"))
            .await
            .expect("insert");
        let upper = Email::new("ADA@example.com").expect("email");

        assert!(store.find_by_email(&upper).await.expect("lookup").is_none());
        store
            .insert_if_absent(&user("ADA@example.com"))
            .await
            .expect("case variant is a different account");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_signups_store_one_user() {
        let store = Arc::new(MemoryStore::new());
        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert_if_absent(&user("race@example.com")).await })
            })
            .collect();

        let mut successes = 0;
        for attempt in attempts {
            if attempt.await.expect("task joins").is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn tests_are_listed_in_insertion_order(store: MemoryStore) {
        for title in ["first", "second", "third"] {
            TestRepository::insert(&store, &test_titled(title))
                .await
                .expect("insert");
        }

        let titles: Vec<String> = store
            .list_summaries()
            .await
            .expect("list")
            .into_iter()
            .map(|summary| summary.title)
            .collect();

        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_returns_full_test(store: MemoryStore) {
        let test = test_titled("T");
        TestRepository::insert(&store, &test).await.expect("insert");

        let found = store.find_by_id(&test.id()).await.expect("lookup");
        assert_eq!(found, Some(test));
        assert!(
            store
                .find_by_id(&TestId::random())
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn results_filter_by_student_in_order(store: MemoryStore) {
        let first = result_for("s1", "t1");
        let other = result_for("s2", "t1");
        let second = result_for("s1", "t2");
        for result in [&first, &other, &second] {
            store.append(result).await.expect("append");
        }

        let listed = store
            .list_for_student(&StudentId::new("s1"))
            .await
            .expect("list");

        assert_eq!(listed, vec![first, second]);
        assert!(
            store
                .list_for_student(&StudentId::new("nobody"))
                .await
                .expect("list")
                .is_empty()
        );
    }
}
