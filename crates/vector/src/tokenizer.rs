use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

/// English stopwords dropped when [`TokenizerOptions::remove_stopwords`] is set
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Term extraction options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerOptions {
    /// Drop common English stopwords
    pub remove_stopwords: bool,

    /// Reduce terms to their Snowball English stem
    pub stem: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            stem: true,
        }
    }
}

/// Splits text into normalized terms.
///
/// One tokenizer must be used for every text compared within a ranking call;
/// terms produced under different options are not comparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    options: TokenizerOptions,
}

impl Tokenizer {
    pub fn new(options: TokenizerOptions) -> Self {
        Self { options }
    }

    /// Lowercased word tokens with no stopword filtering or stemming
    pub fn plain() -> Self {
        Self::new(TokenizerOptions {
            remove_stopwords: false,
            stem: false,
        })
    }

    /// Extract terms in document order (duplicates kept)
    pub fn extract_terms(&self, text: &str) -> Vec<String> {
        let stemmer = self
            .options
            .stem
            .then(|| Stemmer::create(Algorithm::English));

        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| word.to_lowercase())
            .filter(|word| !(self.options.remove_stopwords && is_stopword(word)))
            .map(|word| match &stemmer {
                Some(stemmer) => stemmer.stem(&word).into_owned(),
                None => word,
            })
            .filter(|term| !term.is_empty())
            .collect()
    }
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}
