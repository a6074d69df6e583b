use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clinibot_core::workflow::{DEFAULT_POPUP_DELAY, WorkflowPolicy};
use clinibot_llm::client::DEFAULT_BASE_URL;
use clinibot_llm::retry::RetryPolicy;

const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

/// Sessions untouched for this long are dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Runtime settings, read from `CLINIBOT_*` environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub secrets_path: PathBuf,
    pub provider_url: String,
    pub popup_delay: Duration,
    pub session_ttl: Duration,
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
            provider_url: DEFAULT_BASE_URL.to_string(),
            popup_delay: DEFAULT_POPUP_DELAY.unsigned_abs(),
            session_ttl: DEFAULT_SESSION_TTL,
            retry: RetryPolicy::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup. Unparseable values
    /// are logged and replaced by their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();

        let bind = parsed(&lookup, "CLINIBOT_BIND").unwrap_or(defaults.bind);
        let secrets_path = lookup("CLINIBOT_SECRETS")
            .map(PathBuf::from)
            .unwrap_or(defaults.secrets_path);
        let provider_url = lookup("CLINIBOT_PROVIDER_URL").unwrap_or(defaults.provider_url);
        let popup_delay = parsed::<u64>(&lookup, "CLINIBOT_POPUP_DELAY_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.popup_delay);
        let session_ttl = parsed::<u64>(&lookup, "CLINIBOT_SESSION_TTL_MINS")
            .filter(|n| *n > 0)
            .map(|mins| Duration::from_secs(mins.saturating_mul(60)))
            .unwrap_or(defaults.session_ttl);
        let max_attempts = parsed::<u32>(&lookup, "CLINIBOT_RETRY_ATTEMPTS")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.retry.max_attempts);
        let base_delay = parsed::<u64>(&lookup, "CLINIBOT_RETRY_BASE_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry.base_delay);

        Self {
            bind,
            secrets_path,
            provider_url,
            popup_delay,
            session_ttl,
            retry: RetryPolicy {
                max_attempts,
                base_delay,
            },
        }
    }

    pub fn workflow_policy(&self) -> WorkflowPolicy {
        let popup_delay = jiff::SignedDuration::try_from(self.popup_delay)
            .unwrap_or(DEFAULT_POPUP_DELAY);
        WorkflowPolicy { popup_delay }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
