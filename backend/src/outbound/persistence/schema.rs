//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id) {
        id -> Uuid,
        email -> Text,
        /// PHC-encoded Argon2id hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Authored tests. Questions are stored as a JSONB array.
    tests (id) {
        id -> Uuid,
        /// Insertion order (BIGSERIAL).
        seq -> Int8,
        title -> Text,
        subject -> Nullable<Text>,
        /// Allotted time in minutes.
        duration -> Nullable<Int4>,
        questions -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only submissions. `test_id` and `student_id` are free text.
    results (id) {
        id -> Uuid,
        /// Insertion order (BIGSERIAL).
        seq -> Int8,
        test_id -> Text,
        student_id -> Text,
        answers -> Jsonb,
        score -> Nullable<Float8>,
        /// Seconds spent on the attempt.
        time_spent -> Nullable<Int4>,
        submitted_at -> Timestamptz,
    }
}
