//! Session state machine.
//!
//! A [`Session`] moves through `intro → input → evaluation → result`. The
//! popup overlay (`idle → pending → due → shown`) and the `registered` flag
//! run alongside the phase.
//!
//! [`transition`] is pure: it validates one [`Event`] against the current
//! state and returns the next state. Outbound calls (case generation,
//! grading, registration) happen in the caller, which feeds their results
//! back in as events. An `Err` means the caller keeps the state it had.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::WorkflowError;
use crate::models::answer::{AnswerDraft, AnswerSet};
use crate::models::case::CaseRequest;
use crate::models::registration::RegistrationRecord;

/// Delay between case generation and the registration popup.
pub const DEFAULT_POPUP_DELAY: SignedDuration = SignedDuration::from_secs(30);

// ── State ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Phase {
    #[default]
    Intro,
    Input,
    Evaluation,
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Intro => "intro",
            Phase::Input => "input",
            Phase::Evaluation => "evaluation",
            Phase::Result => "result",
        };
        f.write_str(name)
    }
}

/// Timer-driven registration overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum PopupState {
    #[default]
    Idle,
    Pending {
        due_at: Timestamp,
    },
    Due,
    Shown,
}

/// Everything one interactive run knows about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub phase: Phase,
    pub case_request: Option<CaseRequest>,
    pub current_case: Option<String>,
    pub user_responses: Option<AnswerSet>,
    pub evaluation_result: Option<String>,
    pub registration: Option<RegistrationRecord>,
    pub registered: bool,
    pub popup: PopupState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The popup has come due and the user has not registered yet. While
    /// gated, no new case can be started and no answers can be submitted.
    pub fn is_gated(&self) -> bool {
        self.popup == PopupState::Due && !self.registered
    }

    fn ensure_not_gated(&self) -> Result<(), WorkflowError> {
        if self.is_gated() {
            return Err(WorkflowError::RegistrationRequired);
        }
        Ok(())
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), WorkflowError> {
        if self.phase != expected {
            return Err(WorkflowError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Event {
    /// A new case came back from the generator. Allowed from any phase;
    /// discards any pending or completed evaluation.
    CaseGenerated {
        request: CaseRequest,
        case_text: String,
        at: Timestamp,
    },
    /// The user submitted the response form.
    AnswersSubmitted(AnswerDraft),
    /// The grader returned feedback for the stored answers.
    EvaluationCompleted { feedback: String },
    /// The popup timer fired (or a wall-clock check ran) at `now`.
    PopupElapsed { now: Timestamp },
    /// The webhook accepted the registration record.
    RegistrationCompleted(RegistrationRecord),
    /// Drop the case and answers. Registration, and a popup that is already
    /// due, survive a reset.
    Reset,
}

/// Knobs the state machine needs from configuration.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowPolicy {
    pub popup_delay: SignedDuration,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            popup_delay: DEFAULT_POPUP_DELAY,
        }
    }
}

// ── Transition ───────────────────────────────────────────────────────────────

/// Apply one event to `state`, returning the next state.
pub fn transition(
    state: &Session,
    event: Event,
    policy: &WorkflowPolicy,
) -> Result<Session, WorkflowError> {
    let mut next = state.clone();

    match event {
        Event::CaseGenerated {
            request,
            case_text,
            at,
        } => {
            state.ensure_not_gated()?;
            next.phase = Phase::Input;
            next.case_request = Some(request);
            next.current_case = Some(case_text);
            next.user_responses = None;
            next.evaluation_result = None;
            if !state.registered {
                next.popup = PopupState::Pending {
                    due_at: at + policy.popup_delay,
                };
            }
        }
        Event::AnswersSubmitted(draft) => {
            state.ensure_phase(Phase::Input)?;
            state.ensure_not_gated()?;
            let answers = AnswerSet::try_from(draft)?;
            next.user_responses = Some(answers);
            next.phase = Phase::Evaluation;
        }
        Event::EvaluationCompleted { feedback } => {
            state.ensure_phase(Phase::Evaluation)?;
            next.evaluation_result = Some(feedback);
            next.phase = Phase::Result;
        }
        Event::PopupElapsed { now } => {
            if let PopupState::Pending { due_at } = state.popup
                && now >= due_at
            {
                next.popup = PopupState::Due;
            }
        }
        Event::RegistrationCompleted(record) => {
            next.registration = Some(record);
            next.registered = true;
            next.popup = PopupState::Shown;
        }
        Event::Reset => {
            // A due popup outlives the reset until the user registers.
            let popup = match state.popup {
                _ if state.registered => PopupState::Shown,
                PopupState::Due => PopupState::Due,
                _ => PopupState::Idle,
            };
            next = Session {
                registration: state.registration.clone(),
                registered: state.registered,
                popup,
                ..Session::default()
            };
        }
    }

    Ok(next)
}
