//! PostgreSQL-backed `UserRepository`.
//!
//! Email uniqueness is enforced by the `users_email_key` index: signup is a
//! single `INSERT .. ON CONFLICT (email) DO NOTHING`, and zero affected rows
//! means the email was taken.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordHash, User, UserId};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_diesel_error_with_conflict};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error, email: &Email) -> UserPersistenceError {
    map_diesel_error_with_conflict(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
        || UserPersistenceError::duplicate_email(email.to_string()),
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        email,
        password_hash,
    } = row;
    let email = Email::new(email).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let password_hash = PasswordHash::new(password_hash)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(UserId::from_uuid(id), email, password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_if_absent(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_str(),
            password_hash: user.password_hash().as_str(),
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, user.email()))?;

        if inserted == 0 {
            return Err(UserPersistenceError::duplicate_email(user.email().to_string()));
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, email))?;

        row.map(row_to_user).transpose()
    }
}
