use std::time::Duration;

use tracing::{info, warn};

use crate::chat::ChatRequest;
use crate::error::LlmError;
use crate::retry::RetryPolicy;

/// Groq's OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Thin wrapper over a shared `reqwest::Client` pointed at one provider.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, retry: RetryPolicy) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// POST `request` and return the body of the first 200 response.
    ///
    /// 429 and 503 are retried with exponential backoff up to
    /// `max_attempts` times, with no wait after the last attempt. Any other
    /// non-200 status fails immediately with the status and body. Transport
    /// failures are not retried.
    pub async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let url = self.endpoint();
        let attempts = self.retry.max_attempts.max(1);

        for attempt in 0..attempts {
            let response = self
                .http
                .post(&url)
                .bearer_auth(api_key)
                .timeout(timeout)
                .json(request)
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;

            if status == 200 {
                info!(model = %request.model, attempt, "chat completion succeeded");
                return Ok(body);
            }

            if RetryPolicy::is_retryable(status) {
                if attempt + 1 == attempts {
                    warn!(model = %request.model, status, attempt, "provider busy, giving up");
                    break;
                }
                let delay = self.retry.delay_for(attempt);
                warn!(
                    model = %request.model,
                    status,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "provider busy, backing off"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(LlmError::Provider { status, body });
        }

        Err(LlmError::RetriesExhausted { attempts })
    }
}
