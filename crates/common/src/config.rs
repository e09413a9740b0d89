use crate::error::PitchMatchError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default DeepSeek chat-completions endpoint
pub const DEFAULT_DEEPSEEK_API_URL: &str = "https://api.deepseek.com/chat/completions";

/// PitchMatch application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// DeepSeek API key (empty means placeholder mode)
    #[serde(skip_serializing, default)]
    pub deepseek_api_key: String,

    /// DeepSeek model name
    pub deepseek_model: String,

    /// DeepSeek chat-completions URL
    pub deepseek_api_url: String,

    /// Timeout for a single generation request, in seconds
    pub generation_timeout_secs: u64,

    /// Attempts per generation request
    pub generation_max_retries: u32,

    /// Maximum tokens per generated proposal
    pub generation_max_tokens: u32,

    /// Sampling temperature
    pub generation_temperature: f32,

    /// Proposal store file path
    pub proposal_store_path: PathBuf,

    /// Static frontend directory
    pub frontend_dir: PathBuf,

    /// Number of samples matched per job description
    pub sample_count: usize,

    /// Apply English stemming when extracting terms
    pub tokenizer_stemming: bool,

    /// Drop English stopwords when extracting terms
    pub tokenizer_stopwords: bool,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            deepseek_api_key: String::new(),
            deepseek_model: "deepseek-chat".to_string(),
            deepseek_api_url: DEFAULT_DEEPSEEK_API_URL.to_string(),
            generation_timeout_secs: 60,
            generation_max_retries: 1,
            generation_max_tokens: 400,
            generation_temperature: 0.3,
            proposal_store_path: PathBuf::from("./proposal_store.json"),
            frontend_dir: PathBuf::from("./frontend"),
            sample_count: 3,
            tokenizer_stemming: true,
            tokenizer_stopwords: true,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, PitchMatchError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("PORT").unwrap_or(defaults.server_port),
            deepseek_api_key: std::env::var("DEEPSEEK_API_KEY")
                .map(|key| key.trim().to_string())
                .unwrap_or_default(),
            deepseek_model: std::env::var("DEEPSEEK_MODEL").unwrap_or(defaults.deepseek_model),
            deepseek_api_url: std::env::var("DEEPSEEK_API_URL")
                .unwrap_or(defaults.deepseek_api_url),
            generation_timeout_secs: Self::get_env_parsed("GENERATION_TIMEOUT_SECS")
                .unwrap_or(defaults.generation_timeout_secs),
            generation_max_retries: Self::get_env_parsed("GENERATION_MAX_RETRIES")
                .unwrap_or(defaults.generation_max_retries),
            generation_max_tokens: Self::get_env_parsed("GENERATION_MAX_TOKENS")
                .unwrap_or(defaults.generation_max_tokens),
            generation_temperature: Self::get_env_parsed("GENERATION_TEMPERATURE")
                .unwrap_or(defaults.generation_temperature),
            proposal_store_path: Self::get_env_path("PROPOSAL_STORE")
                .unwrap_or(defaults.proposal_store_path),
            frontend_dir: Self::get_env_path("FRONTEND_DIR").unwrap_or(defaults.frontend_dir),
            sample_count: Self::get_env_parsed("SAMPLE_COUNT").unwrap_or(defaults.sample_count),
            tokenizer_stemming: Self::get_env_flag("TOKENIZER_STEMMING")
                .unwrap_or(defaults.tokenizer_stemming),
            tokenizer_stopwords: Self::get_env_flag("TOKENIZER_STOPWORDS")
                .unwrap_or(defaults.tokenizer_stopwords),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Get a parsed value from environment variable, ignoring unparsable values
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Get a boolean flag from environment variable
    fn get_env_flag(key: &str) -> Option<bool> {
        std::env::var(key).ok().and_then(|s| parse_flag(&s))
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), PitchMatchError> {
        let mut dirs = vec![self.log_dir.clone()];
        if let Some(parent) = self.proposal_store_path.parent() {
            if !parent.as_os_str().is_empty() {
                dirs.push(parent.to_path_buf());
            }
        }

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(&dir).map_err(|e| {
                    PitchMatchError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Whether a DeepSeek API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.deepseek_api_key.is_empty()
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), PitchMatchError> {
        if !self.deepseek_api_url.starts_with("http://")
            && !self.deepseek_api_url.starts_with("https://")
        {
            return Err(PitchMatchError::config(
                "DeepSeek API URL must start with http:// or https://",
            ));
        }

        if self.deepseek_model.trim().is_empty() {
            return Err(PitchMatchError::config("DeepSeek model name cannot be empty"));
        }

        if self.server_port == 0 {
            return Err(PitchMatchError::config("Server port cannot be 0"));
        }

        if self.sample_count == 0 {
            return Err(PitchMatchError::config("Sample count must be at least 1"));
        }

        if !(0.0..=2.0).contains(&self.generation_temperature) {
            return Err(PitchMatchError::config(
                "Generation temperature must be between 0.0 and 2.0",
            ));
        }

        Ok(())
    }
}

/// Parse a boolean flag ("1", "true", "yes", "on" and their negatives)
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
