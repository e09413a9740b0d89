pub mod generate;
pub mod matching;
pub mod proposals;
pub mod system;

use actix_web::{error, web, HttpResponse};
use serde_json::json;

/// Register API routes and body-parsing error handlers
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "detail": detail })),
        )
        .into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "detail": detail })),
        )
        .into()
    }))
    .service(proposals::upload_proposal)
    .service(proposals::list_proposals)
    .service(generate::generate)
    .service(matching::match_proposals)
    .service(system::health)
    .service(system::favicon)
    .service(system::devtools_probe);
}
