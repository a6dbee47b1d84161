//! PostgreSQL-backed `TestRepository`.
//!
//! Questions live in a JSONB column; listings select only the summary
//! columns so the questions document is never read for `list_summaries`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TestRepository, TestRepositoryError};
use crate::domain::{Question, Test, TestId, TestSummary};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTestRow, TestRow, TestSummaryRow};
use super::pool::{DbPool, PoolError};
use super::schema::tests as test_table;

/// Diesel-backed implementation of the test repository port.
#[derive(Clone)]
pub struct DieselTestRepository {
    pool: DbPool,
}

impl DieselTestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TestRepositoryError {
    map_basic_pool_error(error, TestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TestRepositoryError {
    map_basic_diesel_error(
        error,
        TestRepositoryError::query,
        TestRepositoryError::connection,
    )
}

fn encode_duration(duration: Option<u32>) -> Result<Option<i32>, TestRepositoryError> {
    duration
        .map(i32::try_from)
        .transpose()
        .map_err(|err| TestRepositoryError::query(format!("duration out of range: {err}")))
}

fn decode_duration(duration: Option<i32>) -> Result<Option<u32>, TestRepositoryError> {
    duration
        .map(u32::try_from)
        .transpose()
        .map_err(|err| TestRepositoryError::query(format!("stored duration invalid: {err}")))
}

fn row_to_test(row: TestRow) -> Result<Test, TestRepositoryError> {
    let TestRow {
        id,
        title,
        subject,
        duration,
        questions,
    } = row;
    let questions: Vec<Question> = serde_json::from_value(questions)
        .map_err(|err| TestRepositoryError::query(format!("decode questions: {err}")))?;
    Ok(Test::new(
        TestId::from_uuid(id),
        title,
        subject,
        decode_duration(duration)?,
        questions,
    ))
}

fn row_to_summary(row: TestSummaryRow) -> Result<TestSummary, TestRepositoryError> {
    Ok(TestSummary {
        id: TestId::from_uuid(row.id),
        title: row.title,
        subject: row.subject,
        duration: decode_duration(row.duration)?,
    })
}

#[async_trait]
impl TestRepository for DieselTestRepository {
    async fn insert(&self, test: &Test) -> Result<(), TestRepositoryError> {
        let questions = serde_json::to_value(test.questions())
            .map_err(|err| TestRepositoryError::query(format!("encode questions: {err}")))?;
        let row = NewTestRow {
            id: *test.id().as_uuid(),
            title: test.title(),
            subject: test.subject(),
            duration: encode_duration(test.duration())?,
            questions: &questions,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(test_table::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_summaries(&self) -> Result<Vec<TestSummary>, TestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TestSummaryRow> = test_table::table
            .order(test_table::seq.asc())
            .select(TestSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_summary).collect()
    }

    async fn find_by_id(&self, id: &TestId) -> Result<Option<Test>, TestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = test_table::table
            .filter(test_table::id.eq(id.as_uuid()))
            .select(TestRow::as_select())
            .first::<TestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_test).transpose()
    }
}
