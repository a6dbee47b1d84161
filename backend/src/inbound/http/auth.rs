//! Signup and login handlers.
//!
//! ```text
//! POST /api/auth/signup {"email":"ada@example.com","password":"..."}
//! POST /api/auth/login  {"email":"ada@example.com","password":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::exams::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const SIGNUP_SUCCESS: &str = "User created successfully";

/// Request body shared by signup and login.
///
/// Both fields are required; they are optional here so an absent field is
/// reported in the error envelope rather than as a parse failure.
#[derive(Default, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        let email = value.email.unwrap_or_default();
        let password = Zeroizing::new(value.password.unwrap_or_default());
        Self::try_from_parts(&email, &password)
    }
}

/// Body of a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 JWT; the subject is the account email.
    pub access_token: String,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyEmail => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_input(err.to_string()).with_details(json!({ "field": field }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field or email already registered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    state.auth.signup(&credentials).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new(SIGNUP_SUCCESS)))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let token = state.auth.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        access_token: token.into_inner(),
    }))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
