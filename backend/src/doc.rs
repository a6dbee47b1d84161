//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler in the inbound layer together
//! with the request/response DTOs and the error envelope schema. Swagger UI
//! serves it in debug builds; `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{CredentialsRequest, LoginResponse};
use crate::inbound::http::exams::{
    CreateTestBody, CreateTestResponse, MessageResponse, QuestionBody, ResultBody,
    SubmitTestBody, TestBody, TestSummaryBody,
};
use crate::inbound::http::index::BannerResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Describe the bearer token returned by `POST /api/auth/login`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 access token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Online examination backend API",
        description = "Account signup/login, test authoring, submissions and results."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::exams::create_test,
        crate::inbound::http::exams::list_tests,
        crate::inbound::http::exams::get_test,
        crate::inbound::http::exams::submit_test,
        crate::inbound::http::exams::get_results,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BannerResponse,
        MessageResponse,
        CredentialsRequest,
        LoginResponse,
        QuestionBody,
        CreateTestBody,
        CreateTestResponse,
        TestSummaryBody,
        TestBody,
        SubmitTestBody,
        ResultBody,
    )),
    tags(
        (name = "meta", description = "Service banner"),
        (name = "auth", description = "Account signup and login"),
        (name = "tests", description = "Test authoring, submissions and results"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;

    use super::*;

    #[rstest]
    #[case("/api/auth/signup")]
    #[case("/api/auth/login")]
    #[case("/api/test/create")]
    #[case("/api/test/all")]
    #[case("/api/test/{test_id}")]
    #[case("/api/test/submit")]
    #[case("/api/test/results/{student_id}")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    #[case("/api/auth/signup")]
    #[case("/api/auth/login")]
    #[case("/api/test/create")]
    #[case("/api/test/all")]
    #[case("/api/test/{test_id}")]
    #[case("/api/test/submit")]
    #[case("/api/test/results/{student_id}")]
    fn store_backed_routes_document_unavailability(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get(path).expect("documented path");
        let operation = item
            .get
            .as_ref()
            .or(item.post.as_ref())
            .expect("get or post operation");
        assert!(
            operation.responses.responses.contains_key("503"),
            "{path} omits 503"
        );
    }

    #[rstest]
    fn registers_error_envelope_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("Error"));
        assert!(components.schemas.contains_key("ErrorCode"));
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
