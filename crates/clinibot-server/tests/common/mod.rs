#![allow(dead_code)]

use std::time::Duration;

use clinibot_core::models::answer::AnswerDraft;
use clinibot_core::models::case::{CaseRequest, Severity, Specialty};
use clinibot_core::models::registration::{ExperienceLevel, RegistrationRecord, Role};
use clinibot_llm::retry::RetryPolicy;
use clinibot_server::config::Settings;
use clinibot_server::secrets::Secrets;
use clinibot_server::state::AppState;

pub const CHAT_PATH: &str = "/chat/completions";
pub const WEBHOOK_PATH: &str = "/macros/exec";

/// State wired to a mock server for both the provider and the webhook.
pub fn state_for(server_url: &str, popup_delay: Duration) -> AppState {
    let settings = Settings {
        provider_url: server_url.to_string(),
        popup_delay,
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        },
        ..Settings::default()
    };
    let secrets = Secrets {
        api_key: Some("test-key".to_string()),
        model_id: "test-model".to_string(),
        webhook_url: Some(format!("{server_url}{WEBHOOK_PATH}")),
    };
    AppState::new(&settings, secrets).expect("state builds")
}

pub fn chat_body(content: &str) -> String {
    serde_json::json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
        .to_string()
}

pub fn cardio_critical() -> CaseRequest {
    CaseRequest {
        specialty: Specialty::Cardiology,
        severity: Severity::Critical,
    }
}

pub fn full_draft() -> AnswerDraft {
    AnswerDraft {
        observation: "a".to_string(),
        prognosis: "b".to_string(),
        nursing_care: "c".to_string(),
        evaluation: "d".to_string(),
    }
}

pub fn nurse() -> RegistrationRecord {
    RegistrationRecord {
        first_name: "Yosra".to_string(),
        last_name: "Hamdi".to_string(),
        age: Some(27),
        role: Role::Nurse {
            hospital: "Hôpital Charles Nicolle".to_string(),
            service: "Urgences".to_string(),
        },
        experience: ExperienceLevel::Advanced,
    }
}
