//! API banner served at `/`.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

const BANNER: &str = "Online Examination Backend API";

/// Body of `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    #[schema(example = "Online Examination Backend API")]
    pub message: &'static str,
}

/// Identify the service.
#[utoipa::path(
    get,
    path = "/",
    tags = ["meta"],
    responses((status = 200, description = "API banner", body = BannerResponse))
)]
#[get("/")]
pub async fn index() -> web::Json<BannerResponse> {
    web::Json(BannerResponse { message: BANNER })
}
