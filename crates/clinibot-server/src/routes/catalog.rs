use axum::Json;
use serde::Serialize;

use clinibot_core::models::answer::AnswerSection;
use clinibot_core::models::case::{Severity, Specialty};
use clinibot_core::models::registration::ExperienceLevel;

/// A selectable value and the label to display for it.
#[derive(Serialize)]
pub struct Choice<T: Serialize> {
    pub value: T,
    pub label: &'static str,
}

/// Everything a front end needs to draw the case selector and the forms.
#[derive(Serialize)]
pub struct Catalog {
    pub specialties: Vec<Choice<Specialty>>,
    pub severities: Vec<Choice<Severity>>,
    pub default_severity: Severity,
    pub answer_sections: Vec<Choice<AnswerSection>>,
    pub roles: Vec<Choice<&'static str>>,
    pub experience_levels: Vec<Choice<ExperienceLevel>>,
}

pub async fn get_catalog() -> Json<Catalog> {
    Json(Catalog {
        specialties: Specialty::ALL
            .into_iter()
            .map(|s| Choice { value: s, label: s.label() })
            .collect(),
        severities: Severity::ALL
            .into_iter()
            .map(|s| Choice { value: s, label: s.label() })
            .collect(),
        default_severity: Severity::default(),
        answer_sections: AnswerSection::ALL
            .into_iter()
            .map(|s| Choice { value: s, label: s.label() })
            .collect(),
        roles: vec![
            Choice { value: "student", label: "Étudiant" },
            Choice { value: "nurse", label: "Nouveau recruté" },
        ],
        experience_levels: ExperienceLevel::ALL
            .into_iter()
            .map(|e| Choice { value: e, label: e.label() })
            .collect(),
    })
}
