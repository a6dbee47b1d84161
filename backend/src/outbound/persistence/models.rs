//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them to
//! domain types. Columns with database defaults (`seq`, `created_at`) are
//! omitted from the insertable structs.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{results, tests, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Full test row including the questions document.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TestRow {
    pub id: Uuid,
    pub title: String,
    pub subject: Option<String>,
    pub duration: Option<i32>,
    pub questions: serde_json::Value,
}

/// List projection: every column the summary needs, no questions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TestSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub subject: Option<String>,
    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tests)]
pub(crate) struct NewTestRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub subject: Option<&'a str>,
    pub duration: Option<i32>,
    pub questions: &'a serde_json::Value,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ResultRow {
    pub id: Uuid,
    pub test_id: String,
    pub student_id: String,
    pub answers: serde_json::Value,
    pub score: Option<f64>,
    pub time_spent: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = results)]
pub(crate) struct NewResultRow<'a> {
    pub id: Uuid,
    pub test_id: &'a str,
    pub student_id: &'a str,
    pub answers: &'a serde_json::Value,
    pub score: Option<f64>,
    pub time_spent: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}
