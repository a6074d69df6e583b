use thiserror::Error;

use crate::models::answer::AnswerSection;
use crate::workflow::Phase;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("please fill in every section before submitting (missing: {})", section_list(.missing))]
    IncompleteAnswers { missing: Vec<AnswerSection> },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("age must be between 18 and 99, got {0}")]
    InvalidAge(u8),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("action not allowed in phase `{actual}` (expected `{expected}`)")]
    InvalidPhase { expected: Phase, actual: Phase },

    #[error("registration is required before continuing")]
    RegistrationRequired,

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

fn section_list(sections: &[AnswerSection]) -> String {
    sections
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}
