use actix_web::{get, post, web, HttpResponse};
use pitchmatch_vector::Document;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{MessageResponse, NewProposalRequest};

#[post("/proposals")]
pub async fn upload_proposal(
    body: web::Either<web::Json<NewProposalRequest>, web::Form<NewProposalRequest>>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let req = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    let (name, content) = match (req.name, req.content) {
        (Some(name), Some(content)) if !name.is_empty() && !content.is_empty() => (name, content),
        _ => return Err(ApiError::bad_request("Both name and content are required.")),
    };

    state.store.append(Document::new(name, content)).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Proposal uploaded successfully.".to_string(),
    }))
}

#[get("/proposals")]
pub async fn list_proposals(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, ApiError> {
    let proposals = state.store.load().await?;
    Ok(HttpResponse::Ok().json(proposals))
}
