use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::tokenizer::Tokenizer;
use crate::types::WeightVector;

/// Builds TF-IDF weight vectors over one document set.
///
/// Vectors are only comparable within a single [`vectorize`](Self::vectorize)
/// call, since IDF depends on the whole set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfVectorizer {
    tokenizer: Tokenizer,
}

impl TfIdfVectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// One weight vector per input text, in input order.
    ///
    /// Weight(t, d) = raw count of t in d × IDF(t), with document frequency
    /// counted across every text passed in (the query included).
    pub fn vectorize(&self, texts: &[&str]) -> Vec<WeightVector> {
        let term_counts: Vec<BTreeMap<String, usize>> = texts
            .iter()
            .map(|text| count_terms(self.tokenizer.extract_terms(text)))
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let total = texts.len();
        debug!(
            "Vectorizing {} documents - vocabulary size: {}",
            total,
            doc_freq.len()
        );

        term_counts
            .iter()
            .map(|counts| {
                counts
                    .iter()
                    .map(|(term, &tf)| {
                        let df = doc_freq.get(term.as_str()).copied().unwrap_or(0);
                        (term.clone(), tf as f64 * inverse_document_frequency(total, df))
                    })
                    .collect()
            })
            .collect()
    }
}

/// `ln(N / DF) + 1`, or 0 when the term occurs nowhere.
///
/// Never negative: a present term has `1 <= DF <= N`, so the log is >= 0.
pub fn inverse_document_frequency(total_docs: usize, doc_freq: usize) -> f64 {
    if total_docs == 0 || doc_freq == 0 {
        return 0.0;
    }
    let doc_freq = doc_freq.min(total_docs);
    (total_docs as f64 / doc_freq as f64).ln() + 1.0
}

fn count_terms(terms: Vec<String>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TfIdfVectorizer {
        TfIdfVectorizer::new(Tokenizer::plain())
    }

    #[test]
    fn test_idf_values() {
        assert_eq!(inverse_document_frequency(4, 4), 1.0);
        assert!((inverse_document_frequency(4, 1) - (4.0f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(inverse_document_frequency(4, 0), 0.0);
        assert_eq!(inverse_document_frequency(0, 0), 0.0);
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let vectors = plain().vectorize(&["apple banana", "apple cherry", "apple durian"]);
        assert_eq!(vectors.len(), 3);
        // "apple" is everywhere, "banana" only in the first document
        assert!(vectors[0].get("banana") > vectors[0].get("apple"));
        assert_eq!(vectors[0].get("apple"), 1.0);
    }

    #[test]
    fn test_raw_term_frequency() {
        let vectors = plain().vectorize(&["echo echo echo", "other"]);
        let idf = inverse_document_frequency(2, 1);
        assert!((vectors[0].get("echo") - 3.0 * idf).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document_yields_empty_vector() {
        let vectors = plain().vectorize(&["", "something here", "   "]);
        assert!(vectors[0].is_empty());
        assert!(!vectors[1].is_empty());
        assert!(vectors[2].is_empty());
    }

    #[test]
    fn test_duplicate_documents_identical_vectors() {
        let vectors = TfIdfVectorizer::default()
            .vectorize(&["build a website", "Build a website!", "stock trading bot"]);
        assert_eq!(vectors[0], vectors[1]);
        assert_ne!(vectors[0], vectors[2]);
    }

    #[test]
    fn test_weights_non_negative() {
        let vectors = TfIdfVectorizer::default()
            .vectorize(&["cats are great pets", "dogs are loyal pets", "pets pets pets"]);
        for vector in &vectors {
            assert!(vector.iter().all(|(_, weight)| weight >= 0.0));
        }
    }

    #[test]
    fn test_no_input() {
        assert!(plain().vectorize(&[]).is_empty());
    }
}
