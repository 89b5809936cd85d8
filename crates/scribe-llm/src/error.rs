use thiserror::Error;

/// Failures talking to a completion backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("model refused the request: {0}")]
    Refused(String),

    #[error("completion response contained no content")]
    EmptyResponse,

    #[error("{0}")]
    Scripted(String),
}

pub type LlmResult<T> = Result<T, LlmError>;
