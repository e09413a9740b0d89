use pitchmatch_common::{AppConfig, PitchMatchError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::DeepSeekClient;
use crate::llm_trait::TextGenerator;
use crate::prompts::{proposal_prompt, SYSTEM_PROMPT};
use crate::types::{ChatMessage, ChatRequest};

/// Text returned instead of a proposal when no API key is configured
pub const MISSING_KEY_PLACEHOLDER: &str =
    "(DeepSeek API key not set; returning placeholder text)";

/// Writes new proposals modeled on a sample proposal
#[derive(Clone)]
pub struct ProposalWriter {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ProposalWriter {
    /// Create writer backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            model: model.into(),
            max_tokens: 400,
            temperature: 0.3,
        }
    }

    /// Writer that only ever returns the missing-key placeholder
    pub fn unconfigured(model: impl Into<String>) -> Self {
        Self {
            generator: None,
            model: model.into(),
            max_tokens: 400,
            temperature: 0.3,
        }
    }

    /// Build from configuration; placeholder mode when no API key is set
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if !config.has_api_key() {
            warn!("DEEPSEEK_API_KEY not set - generated proposals will be placeholders");
            return Ok(Self::unconfigured(&config.deepseek_model)
                .with_sampling(config.generation_max_tokens, config.generation_temperature));
        }

        let client = DeepSeekClient::new(
            &config.deepseek_api_url,
            &config.deepseek_api_key,
            Duration::from_secs(config.generation_timeout_secs),
        )?
        .with_max_retries(config.generation_max_retries);

        Ok(Self::new(Arc::new(client), &config.deepseek_model)
            .with_sampling(config.generation_max_tokens, config.generation_temperature))
    }

    /// Override generation length and temperature
    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Provider name reported alongside generated text
    pub fn provider(&self) -> &str {
        self.generator
            .as_ref()
            .map(|g| g.provider())
            .unwrap_or("deepseek")
    }

    /// Write a proposal for `job_description` in the style of `sample`
    pub async fn write(&self, job_description: &str, sample: &str) -> Result<String> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| PitchMatchError::config("DeepSeek API key not set"))?;

        info!(
            "Generating proposal - Model: {}, Job length: {} chars, Sample length: {} chars",
            self.model,
            job_description.len(),
            sample.len()
        );

        generator.generate(self.build_request(job_description, sample)).await
    }

    /// Like [`write`](Self::write), but failures come back as a short
    /// parenthesized notice in place of the proposal text
    pub async fn write_or_placeholder(&self, job_description: &str, sample: &str) -> String {
        if !self.is_configured() {
            return MISSING_KEY_PLACEHOLDER.to_string();
        }

        match self.write(job_description, sample).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Proposal generation failed: {}", e);
                placeholder_for(&e)
            }
        }
    }

    fn build_request(&self, job_description: &str, sample: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(proposal_prompt(job_description, sample)),
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            stream: Some(false),
        }
    }
}

/// Candidate text standing in for a failed generation
pub fn placeholder_for(error: &PitchMatchError) -> String {
    match error {
        PitchMatchError::Upstream { status, body } => {
            format!("(DeepSeek error {}) {}", status, body)
        }
        PitchMatchError::Network(message) => format!("(DeepSeek request failed) {}", message),
        other => format!("(DeepSeek request failed) {}", other),
    }
}
