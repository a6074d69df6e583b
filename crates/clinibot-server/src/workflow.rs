//! One user turn per function.
//!
//! Each function locks the session, validates through the pure state
//! machine, calls out to the provider or webhook, and commits the result as
//! an event. Nothing is committed when a call fails, except that submitted
//! answers stay stored while their evaluation is retried.

use jiff::Timestamp;
use uuid::Uuid;

use clinibot_core::error::WorkflowError;
use clinibot_core::models::answer::AnswerDraft;
use clinibot_core::models::case::CaseRequest;
use clinibot_core::models::registration::RegistrationRecord;
use clinibot_core::workflow::{Event, Phase, PopupState, Session, transition};

use crate::error::ApiError;
use crate::state::{AppState, SessionEntry, SharedEntry};
use crate::timer::PopupTimer;

pub async fn create_session(state: &AppState) -> (Uuid, Session) {
    let (id, entry) = state.sessions.create().await;
    let session = entry.lock().await.session.clone();
    tracing::info!(session_id = %id, "session created");
    (id, session)
}

pub async fn get_session(state: &AppState, id: Uuid) -> Result<Session, ApiError> {
    let entry = state.sessions.get(id).await?;
    let session = entry.lock().await.session.clone();
    Ok(session)
}

/// Generate a fresh case and enter the input phase.
///
/// Any previous answers or feedback are discarded; the popup timer is
/// restarted unless the user is already registered.
pub async fn request_new_case(
    state: &AppState,
    id: Uuid,
    request: CaseRequest,
) -> Result<Session, ApiError> {
    let shared = state.sessions.get(id).await?;
    let mut entry = shared.lock().await;

    if entry.session.is_gated() {
        return Err(WorkflowError::RegistrationRequired.into());
    }
    let api_key = state.secrets.require_api_key()?;

    let case_text = clinibot_llm::case::generate_case(
        &state.chat,
        &state.secrets.model_id,
        &request,
        Some(api_key),
    )
    .await?;

    entry.session = transition(
        &entry.session,
        Event::CaseGenerated {
            request,
            case_text,
            at: Timestamp::now(),
        },
        &state.policy,
    )?;

    reschedule_popup(state, id, &shared, &mut entry);

    tracing::info!(
        session_id = %id,
        specialty = request.specialty.label(),
        severity = request.severity.label(),
        "case generated"
    );

    Ok(entry.session.clone())
}

/// Store the user's answers, then grade them straight away.
///
/// If grading fails the answers stay stored and the session remains in the
/// evaluation phase; the error is returned.
pub async fn submit_answers(
    state: &AppState,
    id: Uuid,
    draft: AnswerDraft,
) -> Result<Session, ApiError> {
    let shared = state.sessions.get(id).await?;
    let mut entry = shared.lock().await;

    entry.session = transition(&entry.session, Event::AnswersSubmitted(draft), &state.policy)?;
    tracing::info!(session_id = %id, "answers submitted");

    evaluate_locked(state, id, &mut entry).await?;
    Ok(entry.session.clone())
}

/// Run (or re-run) grading for a session stuck in the evaluation phase.
pub async fn run_evaluation(state: &AppState, id: Uuid) -> Result<Session, ApiError> {
    let shared = state.sessions.get(id).await?;
    let mut entry = shared.lock().await;

    evaluate_locked(state, id, &mut entry).await?;
    Ok(entry.session.clone())
}

async fn evaluate_locked(
    state: &AppState,
    id: Uuid,
    entry: &mut SessionEntry,
) -> Result<(), ApiError> {
    if entry.session.phase != Phase::Evaluation {
        return Err(WorkflowError::InvalidPhase {
            expected: Phase::Evaluation,
            actual: entry.session.phase,
        }
        .into());
    }

    let (Some(case_text), Some(answers)) = (
        entry.session.current_case.as_deref(),
        entry.session.user_responses.as_ref(),
    ) else {
        return Err(ApiError::Internal(format!(
            "session {id} is in evaluation without a case or answers"
        )));
    };

    let api_key = state.secrets.require_api_key()?;
    let feedback = clinibot_llm::evaluate::evaluate(
        &state.chat,
        &state.secrets.model_id,
        case_text,
        answers,
        Some(api_key),
    )
    .await?;

    entry.session = transition(
        &entry.session,
        Event::EvaluationCompleted { feedback },
        &state.policy,
    )?;
    tracing::info!(session_id = %id, "evaluation complete");
    Ok(())
}

/// Send the registration record to the webhook and lift the gate.
pub async fn submit_registration(
    state: &AppState,
    id: Uuid,
    record: RegistrationRecord,
) -> Result<Session, ApiError> {
    let shared = state.sessions.get(id).await?;
    let mut entry = shared.lock().await;

    record.validate()?;
    let webhook_url = state.secrets.require_webhook_url()?;

    clinibot_sheets::submit::submit_registration(&state.http, &record, webhook_url).await?;

    entry.session = transition(
        &entry.session,
        Event::RegistrationCompleted(record),
        &state.policy,
    )?;
    entry.popup_timer = None;
    tracing::info!(session_id = %id, "user registered");

    Ok(entry.session.clone())
}

/// Drop the case and answers but keep the registration.
pub async fn reset_session(state: &AppState, id: Uuid) -> Result<Session, ApiError> {
    let shared = state.sessions.get(id).await?;
    let mut entry = shared.lock().await;

    entry.session = transition(&entry.session, Event::Reset, &state.policy)?;
    entry.popup_timer = None;

    Ok(entry.session.clone())
}

/// Forget the session entirely and cancel its timer.
pub async fn end_session(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    let shared = state.sessions.remove(id).await?;
    shared.lock().await.popup_timer = None;
    tracing::info!(session_id = %id, "session ended");
    Ok(())
}

fn reschedule_popup(state: &AppState, id: Uuid, shared: &SharedEntry, entry: &mut SessionEntry) {
    entry.popup_timer = match entry.session.popup {
        PopupState::Pending { .. } => Some(PopupTimer::schedule(
            id,
            shared,
            state.policy.popup_delay.unsigned_abs(),
            state.policy,
        )),
        _ => None,
    };
}
