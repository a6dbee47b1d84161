//! PostgreSQL-backed `ResultRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ResultRepository, ResultRepositoryError};
use crate::domain::{ResultId, StudentId, TestResult};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewResultRow, ResultRow};
use super::pool::{DbPool, PoolError};
use super::schema::results;

/// Diesel-backed implementation of the result repository port.
#[derive(Clone)]
pub struct DieselResultRepository {
    pool: DbPool,
}

impl DieselResultRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ResultRepositoryError {
    map_basic_pool_error(error, ResultRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ResultRepositoryError {
    map_basic_diesel_error(
        error,
        ResultRepositoryError::query,
        ResultRepositoryError::connection,
    )
}

fn row_to_result(row: ResultRow) -> Result<TestResult, ResultRepositoryError> {
    let time_spent = row
        .time_spent
        .map(u32::try_from)
        .transpose()
        .map_err(|err| ResultRepositoryError::query(format!("stored time_spent invalid: {err}")))?;
    Ok(TestResult {
        id: ResultId::from_uuid(row.id),
        test_id: row.test_id,
        student_id: StudentId::new(row.student_id),
        answers: row.answers,
        score: row.score,
        time_spent,
        submitted_at: row.submitted_at,
    })
}

#[async_trait]
impl ResultRepository for DieselResultRepository {
    async fn append(&self, result: &TestResult) -> Result<(), ResultRepositoryError> {
        let time_spent = result
            .time_spent
            .map(i32::try_from)
            .transpose()
            .map_err(|err| ResultRepositoryError::query(format!("time_spent out of range: {err}")))?;
        let row = NewResultRow {
            id: *result.id.as_uuid(),
            test_id: result.test_id.as_str(),
            student_id: result.student_id.as_str(),
            answers: &result.answers,
            score: result.score,
            time_spent,
            submitted_at: result.submitted_at,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(results::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<TestResult>, ResultRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ResultRow> = results::table
            .filter(results::student_id.eq(student_id.as_str()))
            .order(results::seq.asc())
            .select(ResultRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_result).collect()
    }
}
