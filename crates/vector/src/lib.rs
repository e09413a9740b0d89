//! PitchMatch ranking engine
//!
//! TF-IDF vectorization over a per-call document set, cosine similarity,
//! top-K corpus selection and best-of-N candidate selection.
//!
//! Every operation is a pure function of its inputs: vectors are rebuilt for
//! each call and nothing is cached between calls, so a [`Ranker`] can be
//! shared freely across threads.

mod ranker;
mod similarity;
mod tfidf;
mod tokenizer;
mod types;

pub use ranker::Ranker;
pub use similarity::cosine_similarity;
pub use tfidf::{inverse_document_frequency, TfIdfVectorizer};
pub use tokenizer::{Tokenizer, TokenizerOptions, STOPWORDS};
pub use types::{BestOfN, Candidate, Document, RankedResult, ScoredCandidate, WeightVector};
