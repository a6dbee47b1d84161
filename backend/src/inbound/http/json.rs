//! JSON extractor configuration.
//!
//! Bodies that fail to parse, or that carry fields of the wrong type, are
//! reported in the standard error envelope as `invalid_input` instead of
//! actix's plain-text 400.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Request body limit. Tests with many questions stay well below this.
const MAX_BODY_BYTES: usize = 1024 * 1024;

fn payload_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected JSON payload");
    Error::invalid_input("Malformed JSON payload")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// Extractor config registered on every API scope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(payload_error)
}
