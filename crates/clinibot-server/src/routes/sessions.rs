use axum::Json;
use axum::extract::State;
use serde::Serialize;
use uuid::Uuid;

use clinibot_core::models::answer::AnswerDraft;
use clinibot_core::models::case::CaseRequest;
use clinibot_core::models::registration::RegistrationRecord;
use clinibot_core::workflow::Session;

use crate::error::ApiError;
use crate::extract::{JsonBody, SessionId};
use crate::state::AppState;
use crate::workflow;

/// A session as returned to the front end.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    #[serde(flatten)]
    pub session: Session,
}

fn view(id: Uuid, session: Session) -> Json<SessionView> {
    Json(SessionView { id, session })
}

pub async fn create_session(State(state): State<AppState>) -> Json<SessionView> {
    let (id, session) = workflow::create_session(&state).await;
    view(id, session)
}

pub async fn get_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionView>, ApiError> {
    let session = workflow::get_session(&state, id).await?;
    Ok(view(id, session))
}

pub async fn delete_session(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<()>, ApiError> {
    workflow::end_session(&state, id).await?;
    Ok(Json(()))
}

pub async fn new_case(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(request): JsonBody<CaseRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = workflow::request_new_case(&state, id, request).await?;
    Ok(view(id, session))
}

pub async fn submit_answers(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(draft): JsonBody<AnswerDraft>,
) -> Result<Json<SessionView>, ApiError> {
    let session = workflow::submit_answers(&state, id, draft).await?;
    Ok(view(id, session))
}

pub async fn run_evaluation(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionView>, ApiError> {
    let session = workflow::run_evaluation(&state, id).await?;
    Ok(view(id, session))
}

pub async fn register(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    JsonBody(record): JsonBody<RegistrationRecord>,
) -> Result<Json<SessionView>, ApiError> {
    let session = workflow::submit_registration(&state, id, record).await?;
    Ok(view(id, session))
}

pub async fn reset(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<SessionView>, ApiError> {
    let session = workflow::reset_session(&state, id).await?;
    Ok(view(id, session))
}
