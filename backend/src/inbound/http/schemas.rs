//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape so the document stays accurate without pulling utoipa into the
//! domain layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// Required fields are missing or the body is malformed.
    #[schema(rename = "invalid_input")]
    InvalidInput,
    /// The account being created already exists.
    #[schema(rename = "already_exists")]
    AlreadyExists,
    /// Email/password did not authenticate.
    #[schema(rename = "invalid_credentials")]
    InvalidCredentials,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Test not found")]
    msg: String,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Supplementary details for clients.
    details: Option<serde_json::Value>,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "6f1c1f5e-0f39-4b8e-9d8c-2a0e4a4d3b11")]
    trace_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;
    use utoipa::openapi::{RefOr, schema::Schema};

    use super::*;

    fn object_properties(schema: RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            other => panic!("expected object schema, got {other:?}"),
        }
    }

    #[test]
    fn error_schema_matches_wire_envelope() {
        let mut properties = object_properties(ErrorSchema::schema());
        properties.sort();
        assert_eq!(properties, ["code", "details", "msg", "traceId"]);
    }
}
