//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows (`models.rs`) and domain types;
//! they hold no business rules. Connections come from a `bb8` pool of
//! `diesel-async` connections, and the schema is created by the embedded
//! migrations in `backend/migrations`.
//!
//! ```ignore
//! use exam_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/exam")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_result_repository;
mod diesel_test_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_result_repository::DieselResultRepository;
pub use diesel_test_repository::DieselTestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
