use actix_web::{post, web, HttpResponse};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{MatchItem, MatchRequest, MatchResponse};

/// Rank stored proposals against a job description without generating anything
#[post("/match")]
pub async fn match_proposals(
    req: web::Json<MatchRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let job_description = req
        .job_description
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Job description is required."))?;
    let top_k = req.top_k.unwrap_or(state.config.sample_count);

    let proposals = state.store.load().await?;
    let ranked = state.ranker.rank(&job_description, &proposals)?;

    let results: Vec<MatchItem> = ranked
        .into_iter()
        .take(top_k)
        .map(|r| MatchItem {
            index: r.position,
            name: r.document.name.clone(),
            content: r.document.content.clone(),
            score: r.score,
        })
        .collect();

    Ok(HttpResponse::Ok().json(MatchResponse {
        count: results.len(),
        total: proposals.len(),
        results,
    }))
}
