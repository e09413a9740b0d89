use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::HealthResponse;

#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, ApiError> {
    let proposals = state.store.load().await?.len();

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        proposals,
        generation_configured: state.writer.is_configured(),
    }))
}

#[get("/favicon.ico")]
pub async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Chrome DevTools probes this path on every page load
#[get("/.well-known/appspecific/com.chrome.devtools.json")]
pub async fn devtools_probe() -> HttpResponse {
    HttpResponse::NoContent().finish()
}
