use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// One of the four fixed sections of a student response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AnswerSection {
    Observation,
    Prognosis,
    NursingCare,
    Evaluation,
}

impl AnswerSection {
    pub const ALL: [AnswerSection; 4] = [
        AnswerSection::Observation,
        AnswerSection::Prognosis,
        AnswerSection::NursingCare,
        AnswerSection::Evaluation,
    ];

    /// Heading shown on the response form and used in the grading prompt.
    pub fn label(self) -> &'static str {
        match self {
            AnswerSection::Observation => "Observation",
            AnswerSection::Prognosis => "Pronostic vital",
            AnswerSection::NursingCare => "Prise en charge infirmière",
            AnswerSection::Evaluation => "Évaluation",
        }
    }
}

/// Raw form input. Any section may still be blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerDraft {
    #[serde(default)]
    pub observation: String,
    #[serde(default)]
    pub prognosis: String,
    #[serde(default)]
    pub nursing_care: String,
    #[serde(default)]
    pub evaluation: String,
}

impl AnswerDraft {
    fn section(&self, section: AnswerSection) -> &str {
        match section {
            AnswerSection::Observation => &self.observation,
            AnswerSection::Prognosis => &self.prognosis,
            AnswerSection::NursingCare => &self.nursing_care,
            AnswerSection::Evaluation => &self.evaluation,
        }
    }

    /// Sections left blank (whitespace counts as blank), in form order.
    pub fn missing_sections(&self) -> Vec<AnswerSection> {
        AnswerSection::ALL
            .into_iter()
            .filter(|s| self.section(*s).trim().is_empty())
            .collect()
    }
}

/// A complete response: every section is non-empty.
///
/// Only obtainable through [`AnswerSet::try_from`], so holding one means the
/// completeness check has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct AnswerSet {
    observation: String,
    prognosis: String,
    nursing_care: String,
    evaluation: String,
}

impl AnswerSet {
    pub fn get(&self, section: AnswerSection) -> &str {
        match section {
            AnswerSection::Observation => &self.observation,
            AnswerSection::Prognosis => &self.prognosis,
            AnswerSection::NursingCare => &self.nursing_care,
            AnswerSection::Evaluation => &self.evaluation,
        }
    }

    /// `(section, answer)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (AnswerSection, &str)> {
        AnswerSection::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl TryFrom<AnswerDraft> for AnswerSet {
    type Error = CoreError;

    fn try_from(draft: AnswerDraft) -> Result<Self, Self::Error> {
        let missing = draft.missing_sections();
        if !missing.is_empty() {
            return Err(CoreError::IncompleteAnswers { missing });
        }

        Ok(AnswerSet {
            observation: draft.observation,
            prognosis: draft.prognosis,
            nursing_care: draft.nursing_care,
            evaluation: draft.evaluation,
        })
    }
}
