use reqwest::StatusCode;
use serde::Deserialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum NovaError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),

    #[error("{0}")]
    Calculation(String),

    #[error("{0}")]
    Weather(String),

    #[error("{0}")]
    Launch(String),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Gemini API error: {}", .0.error.message)]
    GeminiServerError(GeminiError),

    #[error("Gemini returned no text")]
    EmptyAnswer,
}

impl NovaError {
    /// Transient network failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            NovaError::Reqwest(e) => e.is_timeout() || e.is_connect(),
            NovaError::UpstreamStatus(code) => {
                code.is_server_error() || *code == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl From<figment::Error> for NovaError {
    fn from(e: figment::Error) -> Self {
        NovaError::Config(Box::new(e))
    }
}

/// Gemini API error response structure
#[derive(Deserialize, Debug)]
pub struct GeminiError {
    pub error: GeminiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct GeminiErrorBody {
    pub code: u32,
    pub message: String,
    #[serde(default)]
    pub status: String,
}
