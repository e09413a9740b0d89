use pitchmatch_common::{PitchMatchError, Result};
use tracing::{debug, info, warn};

use crate::similarity::cosine_similarity;
use crate::tfidf::TfIdfVectorizer;
use crate::tokenizer::Tokenizer;
use crate::types::{BestOfN, Candidate, Document, RankedResult, ScoredCandidate, WeightVector};

/// Ranks corpus documents and generated candidates against a query.
///
/// Holds no state between calls; each operation vectorizes its own input set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    vectorizer: TfIdfVectorizer,
}

impl Ranker {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(tokenizer),
        }
    }

    /// Score every corpus document against the query, best first.
    ///
    /// Equal scores keep their corpus order.
    pub fn rank<'a>(&self, query: &str, corpus: &'a [Document]) -> Result<Vec<RankedResult<'a>>> {
        if corpus.is_empty() {
            return Err(PitchMatchError::invalid_input(
                "Cannot rank against an empty corpus",
            ));
        }

        let vectors = self.vectorize_with_query(query, corpus.iter().map(|d| d.content.as_str()));
        let (query_vector, doc_vectors) = split_query(&vectors)?;

        let mut results: Vec<RankedResult<'a>> = corpus
            .iter()
            .zip(doc_vectors)
            .enumerate()
            .map(|(position, (document, vector))| RankedResult {
                document,
                score: cosine_similarity(query_vector, vector),
                position,
            })
            .collect();

        // Stable sort keeps corpus order among equal scores
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            "Ranked {} documents - top score: {:.4}",
            results.len(),
            results.first().map(|r| r.score).unwrap_or(0.0)
        );
        Ok(results)
    }

    /// The `k` corpus documents most similar to the query.
    ///
    /// When the corpus holds no more than `k` documents it is returned as
    /// stored, without scoring.
    pub fn select_top_k(&self, query: &str, corpus: &[Document], k: usize) -> Result<Vec<Document>> {
        if corpus.is_empty() {
            return Err(PitchMatchError::invalid_input(
                "Cannot select samples from an empty corpus",
            ));
        }

        if corpus.len() <= k {
            debug!(
                "Corpus has {} documents (k={}), returning in stored order",
                corpus.len(),
                k
            );
            return Ok(corpus.to_vec());
        }

        let selected: Vec<Document> = self
            .rank(query, corpus)?
            .into_iter()
            .take(k)
            .map(|result| result.document.clone())
            .collect();

        info!(
            "Selected top {} of {} documents",
            selected.len(),
            corpus.len()
        );
        Ok(selected)
    }

    /// Pick the candidate most similar to the query.
    ///
    /// A candidate that cannot be scored counts as 0.0; it never aborts the
    /// selection. The first candidate wins an exact tie.
    pub fn select_best<M>(&self, query: &str, candidates: Vec<Candidate<M>>) -> Result<BestOfN<M>> {
        if candidates.is_empty() {
            return Err(PitchMatchError::invalid_input(
                "Cannot select the best of zero candidates",
            ));
        }

        let vectors =
            self.vectorize_with_query(query, candidates.iter().map(|c| c.text.as_str()));
        let (query_vector, candidate_vectors) = split_query(&vectors)?;

        let scores: Vec<f64> = candidates
            .iter()
            .zip(candidate_vectors)
            .enumerate()
            .map(|(position, (candidate, vector))| {
                match score_candidate(query_vector, &candidate.text, vector) {
                    Ok(score) => score,
                    Err(e) => {
                        warn!("Candidate {} scored as 0: {}", position, e);
                        0.0
                    }
                }
            })
            .collect();

        let mut winner_position = 0;
        for (position, score) in scores.iter().enumerate() {
            if *score > scores[winner_position] {
                winner_position = position;
            }
        }

        let mut winner = None;
        let mut rest = Vec::with_capacity(candidates.len() - 1);
        for (position, (candidate, score)) in candidates.into_iter().zip(scores).enumerate() {
            let scored = ScoredCandidate {
                candidate,
                score,
                position,
            };
            if position == winner_position {
                winner = Some(scored);
            } else {
                rest.push(scored);
            }
        }

        let winner = winner.ok_or_else(|| PitchMatchError::internal("Winner missing from candidates"))?;
        info!(
            "Best candidate: #{} (score {:.4}) of {}",
            winner.position,
            winner.score,
            rest.len() + 1
        );

        Ok(BestOfN { winner, rest })
    }

    /// Vectorize the query (element 0) together with the given texts
    fn vectorize_with_query<'t>(
        &self,
        query: &'t str,
        texts: impl Iterator<Item = &'t str>,
    ) -> Vec<WeightVector> {
        let all: Vec<&str> = std::iter::once(query).chain(texts).collect();
        self.vectorizer.vectorize(&all)
    }
}

fn split_query(vectors: &[WeightVector]) -> Result<(&WeightVector, &[WeightVector])> {
    vectors
        .split_first()
        .ok_or_else(|| PitchMatchError::internal("Query vector missing from vectorized set"))
}

/// Score a single candidate, reporting anything that is not a usable score
fn score_candidate(query: &WeightVector, text: &str, vector: &WeightVector) -> Result<f64> {
    if text.trim().is_empty() {
        return Ok(0.0);
    }

    let score = cosine_similarity(query, vector);
    if !score.is_finite() {
        return Err(PitchMatchError::ranking(format!(
            "non-finite similarity {}",
            score
        )));
    }

    Ok(score)
}
