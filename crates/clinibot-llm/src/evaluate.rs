use std::time::Duration;

use tracing::info;

use clinibot_core::models::answer::AnswerSet;

use crate::chat::{ChatMessage, ChatOutcome, ChatRequest, decode_response};
use crate::client::ChatClient;
use crate::error::LlmError;
use crate::prompts;

pub const EVALUATION_TEMPERATURE: f32 = 0.6;
pub const EVALUATION_MAX_TOKENS: u32 = 900;
/// Grading output is longer than a case, so it gets more time.
pub const EVALUATION_TIMEOUT: Duration = Duration::from_secs(90);

/// Grade `answers` against `case_text` and return the feedback text.
pub async fn evaluate(
    client: &ChatClient,
    model_id: &str,
    case_text: &str,
    answers: &AnswerSet,
    api_key: Option<&str>,
) -> Result<String, LlmError> {
    let api_key = api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(LlmError::MissingApiKey)?;

    info!(model = model_id, "evaluating student answers");

    let chat_request = ChatRequest {
        model: model_id.to_string(),
        messages: vec![
            ChatMessage::system(prompts::EVALUATION_SYSTEM_PROMPT),
            ChatMessage::user(prompts::build_evaluation_prompt(case_text, answers)),
        ],
        temperature: EVALUATION_TEMPERATURE,
        max_tokens: EVALUATION_MAX_TOKENS,
    };

    let body = client
        .complete(api_key, &chat_request, EVALUATION_TIMEOUT)
        .await?;

    match decode_response(&body) {
        ChatOutcome::Success(content) => Ok(content.trim().to_string()),
        ChatOutcome::ProviderError { message, .. } => Err(LlmError::ProviderReported(message)),
        ChatOutcome::Malformed(raw) => Err(LlmError::ResponseParse(format!(
            "no message in evaluation response: {raw}"
        ))),
    }
}
