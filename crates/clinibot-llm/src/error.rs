use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider API key is not configured")]
    MissingApiKey,

    #[error("provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("provider reported an error: {0}")]
    ProviderReported(String),

    #[error("provider still unavailable after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
}
