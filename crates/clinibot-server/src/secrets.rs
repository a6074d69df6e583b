//! Provider and webhook credentials.
//!
//! Read from a TOML file with three keys:
//!
//! ```toml
//! GROQ_API_KEY = "gsk_..."
//! MODEL = "llama-3.3-70b-versatile"
//! GOOGLE_SCRIPT_URL = "https://script.google.com/macros/s/.../exec"
//! ```
//!
//! Environment variables with the same names take precedence. Loading never
//! fails: a missing or unreadable file is logged and treated as empty, so
//! the server still starts and reports the missing value when an action
//! needs it.

use std::path::Path;

use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const API_KEY_VAR: &str = "GROQ_API_KEY";
const MODEL_VAR: &str = "MODEL";
const WEBHOOK_VAR: &str = "GOOGLE_SCRIPT_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    pub api_key: Option<String>,
    pub model_id: String,
    pub webhook_url: Option<String>,
}

impl Default for Secrets {
    fn default() -> Self {
        Self {
            api_key: None,
            model_id: DEFAULT_MODEL.to_string(),
            webhook_url: None,
        }
    }
}

impl Secrets {
    pub fn require_api_key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ApiError::Config(format!("{API_KEY_VAR} is missing from the secrets")))
    }

    pub fn require_webhook_url(&self) -> Result<&str, ApiError> {
        self.webhook_url
            .as_deref()
            .ok_or_else(|| ApiError::Config(format!("{WEBHOOK_VAR} is missing from the secrets")))
    }
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "GROQ_API_KEY")]
    api_key: Option<String>,
    #[serde(rename = "MODEL")]
    model: Option<String>,
    #[serde(rename = "GOOGLE_SCRIPT_URL")]
    webhook_url: Option<String>,
}

/// Load secrets from `path`, overridden by the process environment.
pub fn load_secrets(path: &Path) -> Secrets {
    load_secrets_with(path, |name| std::env::var(name).ok())
}

/// Same as [`load_secrets`] with an injectable variable lookup.
pub fn load_secrets_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Secrets {
    let file = match read_secrets_file(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "secrets file unavailable, using environment only");
            SecretsFile::default()
        }
    };

    let pick = |var: &str, from_file: Option<String>| {
        lookup(var)
            .or(from_file)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let secrets = Secrets {
        api_key: pick(API_KEY_VAR, file.api_key),
        model_id: pick(MODEL_VAR, file.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        webhook_url: pick(WEBHOOK_VAR, file.webhook_url),
    };

    tracing::info!(
        model = %secrets.model_id,
        has_api_key = secrets.api_key.is_some(),
        has_webhook = secrets.webhook_url.is_some(),
        "secrets loaded"
    );

    secrets
}

fn read_secrets_file(path: &Path) -> eyre::Result<SecretsFile> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    let file: SecretsFile = toml::from_str(&contents)?;
    Ok(file)
}
