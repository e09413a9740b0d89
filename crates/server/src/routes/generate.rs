use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::GenerateRequest;
use crate::workflow::GenerationWorkflow;

/// Match samples, generate one proposal per sample and rank the results
#[post("/generate")]
pub async fn generate(
    body: web::Either<web::Json<GenerateRequest>, web::Form<GenerateRequest>>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let req = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    let job_description = req
        .job_description
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Job description is required."))?;

    let proposals = state.store.load().await?;
    let sample_count = state.config.sample_count;
    if proposals.len() < sample_count {
        return Err(ApiError::bad_request(format!(
            "At least {} sample proposals are required.",
            sample_count
        )));
    }

    info!(
        "Generating proposals - Job length: {} chars, corpus size: {}",
        job_description.len(),
        proposals.len()
    );

    let workflow = GenerationWorkflow::new(&state.ranker, &state.writer, sample_count);
    let response = workflow.execute(&job_description, &proposals).await?;

    Ok(HttpResponse::Ok().json(response))
}
