use jiff::{SignedDuration, Timestamp};

use clinibot_core::error::{CoreError, WorkflowError};
use clinibot_core::models::answer::{AnswerDraft, AnswerSection};
use clinibot_core::models::case::{CaseRequest, Severity, Specialty};
use clinibot_core::models::registration::{ExperienceLevel, RegistrationRecord, Role};
use clinibot_core::workflow::{Event, Phase, PopupState, Session, WorkflowPolicy, transition};

fn policy() -> WorkflowPolicy {
    WorkflowPolicy::default()
}

fn cardio_critical() -> CaseRequest {
    CaseRequest {
        specialty: Specialty::Cardiology,
        severity: Severity::Critical,
    }
}

fn full_draft() -> AnswerDraft {
    AnswerDraft {
        observation: "a".to_string(),
        prognosis: "b".to_string(),
        nursing_care: "c".to_string(),
        evaluation: "d".to_string(),
    }
}

fn student() -> RegistrationRecord {
    RegistrationRecord {
        first_name: "Amel".to_string(),
        last_name: "Ben Salah".to_string(),
        age: Some(21),
        role: Role::Student {
            year: "3".to_string(),
            university: "ISSTM".to_string(),
        },
        experience: ExperienceLevel::Beginner,
    }
}

fn with_case(at: Timestamp) -> Session {
    transition(
        &Session::new(),
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "CAS TEST".to_string(),
            at,
        },
        &policy(),
    )
    .expect("case generation is allowed from intro")
}

fn in_result(at: Timestamp) -> Session {
    let s = with_case(at);
    let s = transition(&s, Event::AnswersSubmitted(full_draft()), &policy()).unwrap();
    transition(
        &s,
        Event::EvaluationCompleted {
            feedback: "4/5".to_string(),
        },
        &policy(),
    )
    .unwrap()
}

#[test]
fn new_session_starts_in_intro() {
    let s = Session::new();
    assert_eq!(s.phase, Phase::Intro);
    assert!(s.current_case.is_none());
    assert!(!s.registered);
    assert_eq!(s.popup, PopupState::Idle);
}

#[test]
fn case_generated_enters_input_and_arms_popup() {
    let at = Timestamp::now();
    let s = with_case(at);

    assert_eq!(s.phase, Phase::Input);
    assert_eq!(s.current_case.as_deref(), Some("CAS TEST"));
    assert_eq!(s.case_request, Some(cardio_critical()));
    assert_eq!(
        s.popup,
        PopupState::Pending {
            due_at: at + SignedDuration::from_secs(30)
        }
    );
}

#[test]
fn incomplete_answers_stay_in_input() {
    let s = with_case(Timestamp::now());

    for section in AnswerSection::ALL {
        let mut draft = full_draft();
        match section {
            AnswerSection::Observation => draft.observation = "   ".to_string(),
            AnswerSection::Prognosis => draft.prognosis.clear(),
            AnswerSection::NursingCare => draft.nursing_care.clear(),
            AnswerSection::Evaluation => draft.evaluation.clear(),
        }

        let err = transition(&s, Event::AnswersSubmitted(draft), &policy()).unwrap_err();
        match err {
            WorkflowError::Invalid(CoreError::IncompleteAnswers { missing }) => {
                assert_eq!(missing, vec![section]);
            }
            other => panic!("expected IncompleteAnswers, got {other:?}"),
        }
        assert_eq!(s.phase, Phase::Input);
        assert!(s.user_responses.is_none());
    }
}

#[test]
fn complete_answers_enter_evaluation() {
    let s = with_case(Timestamp::now());
    let s = transition(&s, Event::AnswersSubmitted(full_draft()), &policy()).unwrap();

    assert_eq!(s.phase, Phase::Evaluation);
    let answers = s.user_responses.expect("answers stored");
    assert_eq!(answers.get(AnswerSection::Observation), "a");
    assert_eq!(answers.get(AnswerSection::Evaluation), "d");
}

#[test]
fn answers_rejected_outside_input() {
    let err = transition(
        &Session::new(),
        Event::AnswersSubmitted(full_draft()),
        &policy(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::InvalidPhase {
            expected: Phase::Input,
            actual: Phase::Intro
        }
    ));
}

#[test]
fn evaluation_completed_enters_result() {
    let s = in_result(Timestamp::now());
    assert_eq!(s.phase, Phase::Result);
    assert_eq!(s.evaluation_result.as_deref(), Some("4/5"));
}

#[test]
fn evaluation_completed_requires_evaluation_phase() {
    let s = with_case(Timestamp::now());
    let err = transition(
        &s,
        Event::EvaluationCompleted {
            feedback: "x".to_string(),
        },
        &policy(),
    )
    .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidPhase { .. }));
}

#[test]
fn new_case_from_result_clears_answers_and_feedback() {
    let s = in_result(Timestamp::now());
    let s = transition(
        &s,
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "SECOND CAS".to_string(),
            at: Timestamp::now(),
        },
        &policy(),
    )
    .unwrap();

    assert_eq!(s.phase, Phase::Input);
    assert_eq!(s.current_case.as_deref(), Some("SECOND CAS"));
    assert!(s.user_responses.is_none());
    assert!(s.evaluation_result.is_none());
}

#[test]
fn new_case_during_evaluation_discards_pending_answers() {
    let s = with_case(Timestamp::now());
    let s = transition(&s, Event::AnswersSubmitted(full_draft()), &policy()).unwrap();
    let s = transition(
        &s,
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "AUTRE".to_string(),
            at: Timestamp::now(),
        },
        &policy(),
    )
    .unwrap();

    assert_eq!(s.phase, Phase::Input);
    assert!(s.user_responses.is_none());
}

#[test]
fn popup_ignores_early_timer() {
    let at = Timestamp::now();
    let s = with_case(at);
    let s = transition(
        &s,
        Event::PopupElapsed {
            now: at + SignedDuration::from_secs(5),
        },
        &policy(),
    )
    .unwrap();
    assert!(matches!(s.popup, PopupState::Pending { .. }));
}

#[test]
fn popup_becomes_due_and_gates_the_user() {
    let at = Timestamp::now();
    let s = with_case(at);
    let s = transition(
        &s,
        Event::PopupElapsed {
            now: at + SignedDuration::from_secs(31),
        },
        &policy(),
    )
    .unwrap();

    assert_eq!(s.popup, PopupState::Due);
    assert!(s.is_gated());

    let err = transition(&s, Event::AnswersSubmitted(full_draft()), &policy()).unwrap_err();
    assert!(matches!(err, WorkflowError::RegistrationRequired));

    let err = transition(
        &s,
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "x".to_string(),
            at: Timestamp::now(),
        },
        &policy(),
    )
    .unwrap_err();
    assert!(matches!(err, WorkflowError::RegistrationRequired));
}

#[test]
fn registration_lifts_the_gate_and_disarms_popup() {
    let at = Timestamp::now();
    let s = with_case(at);
    let s = transition(
        &s,
        Event::PopupElapsed {
            now: at + SignedDuration::from_secs(60),
        },
        &policy(),
    )
    .unwrap();
    let s = transition(&s, Event::RegistrationCompleted(student()), &policy()).unwrap();

    assert!(s.registered);
    assert!(!s.is_gated());
    assert_eq!(s.popup, PopupState::Shown);

    let s = transition(&s, Event::AnswersSubmitted(full_draft()), &policy()).unwrap();
    assert_eq!(s.phase, Phase::Evaluation);

    // Registered users are not asked again on the next case.
    let s = transition(
        &s,
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "y".to_string(),
            at: Timestamp::now(),
        },
        &policy(),
    )
    .unwrap();
    assert_eq!(s.popup, PopupState::Shown);
}

#[test]
fn reset_keeps_registration() {
    let s = in_result(Timestamp::now());
    let s = transition(&s, Event::RegistrationCompleted(student()), &policy()).unwrap();
    let s = transition(&s, Event::Reset, &policy()).unwrap();

    assert_eq!(s.phase, Phase::Intro);
    assert!(s.current_case.is_none());
    assert!(s.evaluation_result.is_none());
    assert!(s.registered);
    assert_eq!(s.registration, Some(student()));
}

#[test]
fn reset_does_not_lift_the_gate() {
    let at = Timestamp::now();
    let s = with_case(at);
    let s = transition(
        &s,
        Event::PopupElapsed {
            now: at + SignedDuration::from_secs(31),
        },
        &policy(),
    )
    .unwrap();
    assert!(s.is_gated());

    let s = transition(&s, Event::Reset, &policy()).unwrap();
    assert_eq!(s.phase, Phase::Intro);
    assert_eq!(s.popup, PopupState::Due);
    assert!(s.is_gated());

    let err = transition(
        &s,
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "x".to_string(),
            at: Timestamp::now(),
        },
        &policy(),
    )
    .unwrap_err();
    assert!(matches!(err, WorkflowError::RegistrationRequired));
}

#[test]
fn reset_before_the_popup_is_due_disarms_it() {
    let s = with_case(Timestamp::now());
    let s = transition(&s, Event::Reset, &policy()).unwrap();

    assert_eq!(s.popup, PopupState::Idle);
    assert!(!s.is_gated());
}

#[test]
fn custom_popup_delay_is_honoured() {
    let policy = WorkflowPolicy {
        popup_delay: SignedDuration::from_millis(50),
    };
    let at = Timestamp::now();
    let s = transition(
        &Session::new(),
        Event::CaseGenerated {
            request: cardio_critical(),
            case_text: "z".to_string(),
            at,
        },
        &policy,
    )
    .unwrap();

    assert_eq!(
        s.popup,
        PopupState::Pending {
            due_at: at + SignedDuration::from_millis(50)
        }
    );
}

#[test]
fn session_serializes_phase_in_snake_case() {
    let s = with_case(Timestamp::now());
    let json = serde_json::to_value(&s).unwrap();

    assert_eq!(json["phase"], "input");
    assert_eq!(json["current_case"], "CAS TEST");
    assert_eq!(json["case_request"]["specialty"], "Cardiologie");
    assert_eq!(json["case_request"]["severity"], "Critique");
    assert_eq!(json["popup"]["state"], "pending");
}
