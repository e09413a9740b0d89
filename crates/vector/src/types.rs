use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored reference document (sample proposal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display name
    pub name: String,

    /// Body text
    pub content: String,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Term weights for one document within one vectorization run.
///
/// Backed by an ordered map so iteration order, and with it every
/// floating-point sum over the vector, is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector(BTreeMap<String, f64>);

impl WeightVector {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Weight of a term (0.0 when absent)
    pub fn get(&self, term: &str) -> f64 {
        self.0.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate terms in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(term, weight)| (term.as_str(), *weight))
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f64 {
        self.0.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

impl FromIterator<(String, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Corpus document paired with its similarity to the query
#[derive(Debug, Clone)]
pub struct RankedResult<'a> {
    /// Ranked document
    pub document: &'a Document,

    /// Cosine similarity to the query (0.0 to 1.0)
    pub score: f64,

    /// Index of the document in the input corpus
    pub position: usize,
}

/// Generated text waiting to be scored, with a caller-defined label
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<M> {
    pub text: String,
    pub meta: M,
}

impl<M> Candidate<M> {
    pub fn new(text: impl Into<String>, meta: M) -> Self {
        Self {
            text: text.into(),
            meta,
        }
    }
}

/// Candidate with its score and original index
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<M> {
    pub candidate: Candidate<M>,
    pub score: f64,
    pub position: usize,
}

/// Outcome of best-of-N selection
#[derive(Debug, Clone, PartialEq)]
pub struct BestOfN<M> {
    /// Highest-scoring candidate (first one on exact ties)
    pub winner: ScoredCandidate<M>,

    /// Remaining candidates in their original relative order
    pub rest: Vec<ScoredCandidate<M>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_vector_lookup() {
        let vector: WeightVector = vec![("cat".to_string(), 2.0), ("pet".to_string(), 1.5)]
            .into_iter()
            .collect();

        assert_eq!(vector.len(), 2);
        assert_eq!(vector.get("cat"), 2.0);
        assert_eq!(vector.get("dog"), 0.0);
        assert!(vector.contains("pet"));
    }

    #[test]
    fn test_weight_vector_sorted_iteration() {
        let vector: WeightVector = vec![("zebra".to_string(), 1.0), ("apple".to_string(), 1.0)]
            .into_iter()
            .collect();

        let terms: Vec<&str> = vector.iter().map(|(term, _)| term).collect();
        assert_eq!(terms, vec!["apple", "zebra"]);
    }

    #[test]
    fn test_magnitude() {
        let vector: WeightVector = vec![("a".to_string(), 3.0), ("b".to_string(), 4.0)]
            .into_iter()
            .collect();
        assert!((vector.magnitude() - 5.0).abs() < 1e-12);
        assert_eq!(WeightVector::new().magnitude(), 0.0);
    }

    #[test]
    fn test_document_json_shape() {
        let doc: Document =
            serde_json::from_str(r#"{"name":"Intro","content":"Hello there"}"#).unwrap();
        assert_eq!(doc, Document::new("Intro", "Hello there"));
    }
}
