/// PitchMatch error types
#[derive(Debug, thiserror::Error)]
pub enum PitchMatchError {
    /// Ranking engine error
    #[error("Ranking error: {0}")]
    Ranking(String),

    /// Text generation error
    #[error("Generation error: {0}")]
    Generation(String),

    /// Upstream API answered with a non-success status
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PitchMatchError {
    /// Create ranking error
    pub fn ranking<S: Into<String>>(msg: S) -> Self {
        Self::Ranking(msg.into())
    }

    /// Create generation error
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        Self::Generation(msg.into())
    }

    /// Create upstream error from a status code and response body
    pub fn upstream<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

// HTTP response conversion
impl PitchMatchError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Json(_) => 400,
            Self::Network(_) => 503,
            Self::Upstream { .. } => 503,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Ranking(_) => 500,
            Self::Generation(_) => 500,
            Self::Storage(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
