//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local repositories for running without a database.
//! - **security**: Argon2id password hashing and HS256 access tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
