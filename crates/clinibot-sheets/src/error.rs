use thiserror::Error;

use clinibot_core::error::CoreError;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("webhook rejected the registration (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
