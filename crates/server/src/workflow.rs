use futures::future::join_all;
use pitchmatch_common::{PitchMatchError, Result};
use pitchmatch_llm::ProposalWriter;
use pitchmatch_vector::{Candidate, Document, Ranker};
use tracing::info;

use crate::types::{CandidateScore, GenerateResponse, GenerationResult};

/// Generation workflow: match samples, write one proposal per sample, pick the best
pub struct GenerationWorkflow<'a> {
    ranker: &'a Ranker,
    writer: &'a ProposalWriter,
    sample_count: usize,
}

impl<'a> GenerationWorkflow<'a> {
    pub fn new(ranker: &'a Ranker, writer: &'a ProposalWriter, sample_count: usize) -> Self {
        Self {
            ranker,
            writer,
            sample_count,
        }
    }

    /// Run the workflow for one job description over a corpus snapshot
    pub async fn execute(
        &self,
        job_description: &str,
        corpus: &[Document],
    ) -> Result<GenerateResponse> {
        if corpus.len() < self.sample_count {
            return Err(PitchMatchError::invalid_input(format!(
                "At least {} sample proposals are required.",
                self.sample_count
            )));
        }

        // Phase 1: sample matching
        let matched_samples = self
            .ranker
            .select_top_k(job_description, corpus, self.sample_count)?;
        info!(
            "Matched samples: {:?}",
            matched_samples.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );

        // Phase 2: generation, one request per sample, all in flight together
        let texts = join_all(
            matched_samples
                .iter()
                .map(|sample| self.writer.write_or_placeholder(job_description, &sample.content)),
        )
        .await;

        let provider = self.writer.provider().to_string();
        let results: Vec<GenerationResult> = texts
            .into_iter()
            .enumerate()
            .map(|(sample_index, text)| GenerationResult {
                provider: provider.clone(),
                sample_index,
                text,
            })
            .collect();

        // Phase 3: rerank generated proposals against the job description
        let candidates = results
            .iter()
            .map(|r| Candidate::new(r.text.clone(), r.sample_index))
            .collect();
        let best = self.ranker.select_best(job_description, candidates)?;

        let winner = CandidateScore {
            sample_index: best.winner.candidate.meta,
            score: best.winner.score,
        };
        let ranking = std::iter::once(winner.clone())
            .chain(best.rest.iter().map(|scored| CandidateScore {
                sample_index: scored.candidate.meta,
                score: scored.score,
            }))
            .collect();

        info!(
            "Generated {} proposals, best is sample #{} (score {:.4})",
            results.len(),
            winner.sample_index,
            winner.score
        );

        Ok(GenerateResponse {
            matched_samples,
            results,
            best: winner,
            ranking,
        })
    }
}
