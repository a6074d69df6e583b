use std::time::Duration;

use mockito::Matcher;

use clinibot_core::models::answer::{AnswerDraft, AnswerSet};
use clinibot_llm::client::ChatClient;
use clinibot_llm::error::LlmError;
use clinibot_llm::evaluate::evaluate;
use clinibot_llm::retry::RetryPolicy;

fn answers() -> AnswerSet {
    AnswerSet::try_from(AnswerDraft {
        observation: "Patient dyspnéique".to_string(),
        prognosis: "Engagé".to_string(),
        nursing_care: "Oxygénothérapie".to_string(),
        evaluation: "Surveillance".to_string(),
    })
    .unwrap()
}

fn client(base_url: &str) -> ChatClient {
    ChatClient::new(
        base_url,
        RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn returns_feedback_and_sends_case_with_answers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("CAS TEST".to_string()),
            Matcher::Regex("Oxygénothérapie".to_string()),
            Matcher::PartialJsonString(r#"{"temperature":0.6,"max_tokens":900}"#.to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"Observation : 4/5"}}]}"#)
        .create_async()
        .await;

    let feedback = evaluate(&client(&server.url()), "m", "CAS TEST", &answers(), Some("k"))
        .await
        .unwrap();

    assert_eq!(feedback, "Observation : 4/5");
    mock.assert_async().await;
}

#[tokio::test]
async fn shares_the_retry_policy() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let err = evaluate(&client(&server.url()), "m", "CAS", &answers(), Some("k"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::RetriesExhausted { attempts: 2 }));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = evaluate(&client(&server.url()), "m", "CAS", &answers(), Some("k"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("upstream exploded"));
}

#[tokio::test]
async fn malformed_success_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = evaluate(&client(&server.url()), "m", "CAS", &answers(), Some("k"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ResponseParse(_)));
}
