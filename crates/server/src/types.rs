use pitchmatch_vector::Document;
use serde::{Deserialize, Serialize};

/// Proposal upload request
#[derive(Debug, Deserialize)]
pub struct NewProposalRequest {
    /// Proposal name
    pub name: Option<String>,

    /// Proposal body
    pub content: Option<String>,
}

/// Generation request
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Job description to write proposals for
    pub job_description: Option<String>,
}

/// Match request
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// Job description to rank proposals against
    pub job_description: Option<String>,

    /// Number of ranked proposals to return
    pub top_k: Option<usize>,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One generated proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generation backend
    pub provider: String,

    /// Index into `matched_samples` of the sample it imitates
    pub sample_index: usize,

    /// Generated text (or a failure notice)
    pub text: String,
}

/// Similarity of one generated proposal to the job description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateScore {
    pub sample_index: usize,
    pub score: f64,
}

/// Generation response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Samples the proposals were modeled on, most similar first
    pub matched_samples: Vec<Document>,

    /// One result per matched sample, in sample order
    pub results: Vec<GenerationResult>,

    /// The result closest to the job description
    pub best: CandidateScore,

    /// All results by similarity: winner first, then the rest in sample order
    pub ranking: Vec<CandidateScore>,
}

/// Ranked proposal
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchItem {
    /// Position in the stored corpus
    pub index: usize,
    pub name: String,
    pub content: String,
    pub score: f64,
}

/// Match response
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub results: Vec<MatchItem>,
    pub count: usize,
    pub total: usize,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub proposals: usize,
    pub generation_configured: bool,
}
