//! Liveness endpoint.

use actix_web::{HttpResponse, get};
use serde_json::json;

/// Process liveness probe.
///
/// ```text
/// GET /api/v1/health
/// ```
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
