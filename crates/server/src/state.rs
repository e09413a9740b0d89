use pitchmatch_common::{AppConfig, Result};
use pitchmatch_llm::ProposalWriter;
use pitchmatch_vector::{Ranker, Tokenizer, TokenizerOptions};

use crate::store::ProposalStore;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Sample proposal corpus
    pub store: ProposalStore,

    /// Similarity ranking engine
    pub ranker: Ranker,

    /// Proposal generator
    pub writer: ProposalWriter,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        let writer = ProposalWriter::from_config(&config)?;
        Ok(Self::with_writer(config, writer))
    }

    /// Create state around an existing writer
    pub fn with_writer(config: AppConfig, writer: ProposalWriter) -> Self {
        let ranker = Ranker::new(Tokenizer::new(TokenizerOptions {
            remove_stopwords: config.tokenizer_stopwords,
            stem: config.tokenizer_stemming,
        }));

        Self {
            store: ProposalStore::new(&config.proposal_store_path),
            ranker,
            writer,
            config,
        }
    }
}
