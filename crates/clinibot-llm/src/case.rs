use std::time::Duration;

use tracing::{info, warn};

use clinibot_core::models::case::CaseRequest;

use crate::chat::{ChatMessage, ChatOutcome, ChatRequest, decode_response};
use crate::client::ChatClient;
use crate::error::LlmError;
use crate::prompts;

pub const CASE_TEMPERATURE: f32 = 0.7;
pub const CASE_MAX_TOKENS: u32 = 800;
pub const CASE_TIMEOUT: Duration = Duration::from_secs(60);

/// Generate one clinical case for `request`.
///
/// Returns the trimmed message body. A 200 whose body does not have the
/// expected shape is returned verbatim rather than failing, so the user
/// still sees what the provider sent.
pub async fn generate_case(
    client: &ChatClient,
    model_id: &str,
    request: &CaseRequest,
    api_key: Option<&str>,
) -> Result<String, LlmError> {
    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(LlmError::MissingApiKey)?;

    info!(
        model = model_id,
        specialty = request.specialty.label(),
        severity = request.severity.label(),
        "generating clinical case"
    );

    let chat_request = ChatRequest {
        model: model_id.to_string(),
        messages: vec![
            ChatMessage::system(prompts::CASE_SYSTEM_PROMPT),
            ChatMessage::user(prompts::build_case_prompt(request)),
        ],
        temperature: CASE_TEMPERATURE,
        max_tokens: CASE_MAX_TOKENS,
    };

    let body = client.complete(api_key, &chat_request, CASE_TIMEOUT).await?;

    match decode_response(&body) {
        ChatOutcome::Success(content) => Ok(content.trim().to_string()),
        ChatOutcome::ProviderError { message, .. } => Err(LlmError::ProviderReported(message)),
        ChatOutcome::Malformed(raw) => {
            warn!(model = model_id, "unexpected response shape, returning raw body");
            Ok(raw)
        }
    }
}
