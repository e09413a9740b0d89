use pitchmatch_common::Result;
use crate::types::ChatRequest;
use async_trait::async_trait;

/// Common trait for text-generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a chat request
    async fn generate(&self, request: ChatRequest) -> Result<String>;

    /// Provider name reported alongside generated text
    fn provider(&self) -> &str;
}
