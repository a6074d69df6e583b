use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Medical domain a generated case is drawn from.
///
/// Serialized as the French label shown in the case selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Specialty {
    // Emergency themes
    #[serde(rename = "Détresse respiratoire")]
    RespiratoryDistress,
    #[serde(rename = "Douleur thoracique")]
    ChestPain,
    #[serde(rename = "Altération de l'état de conscience")]
    AlteredConsciousness,
    #[serde(rename = "Infection sévère")]
    SevereInfection,
    #[serde(rename = "Trauma récent")]
    RecentTrauma,
    #[serde(rename = "Urgences cardiaques")]
    CardiacEmergency,
    #[serde(rename = "Urgences neurologiques")]
    NeurologicalEmergency,
    #[serde(rename = "Urgences pédiatriques")]
    PaediatricEmergency,

    // Ward specialties
    #[serde(rename = "Cardiologie")]
    Cardiology,
    #[serde(rename = "Pneumologie")]
    Pulmonology,
    #[serde(rename = "Neurologie")]
    Neurology,
    #[serde(rename = "Pédiatrie")]
    Paediatrics,
    #[serde(rename = "Gériatrie")]
    Geriatrics,
    #[serde(rename = "Réanimation")]
    IntensiveCare,
    #[serde(rename = "Chirurgie")]
    Surgery,
    #[serde(rename = "Néphrologie")]
    Nephrology,
    #[serde(rename = "Endocrinologie")]
    Endocrinology,
    #[serde(rename = "Gastro-entérologie")]
    Gastroenterology,
    #[serde(rename = "Oncologie")]
    Oncology,
    #[serde(rename = "Psychiatrie")]
    Psychiatry,
    #[serde(rename = "Obstétrique")]
    Obstetrics,
}

impl Specialty {
    pub const ALL: [Specialty; 21] = [
        Specialty::RespiratoryDistress,
        Specialty::ChestPain,
        Specialty::AlteredConsciousness,
        Specialty::SevereInfection,
        Specialty::RecentTrauma,
        Specialty::CardiacEmergency,
        Specialty::NeurologicalEmergency,
        Specialty::PaediatricEmergency,
        Specialty::Cardiology,
        Specialty::Pulmonology,
        Specialty::Neurology,
        Specialty::Paediatrics,
        Specialty::Geriatrics,
        Specialty::IntensiveCare,
        Specialty::Surgery,
        Specialty::Nephrology,
        Specialty::Endocrinology,
        Specialty::Gastroenterology,
        Specialty::Oncology,
        Specialty::Psychiatry,
        Specialty::Obstetrics,
    ];

    /// Label used in prompts and the case selector.
    pub fn label(self) -> &'static str {
        match self {
            Specialty::RespiratoryDistress => "Détresse respiratoire",
            Specialty::ChestPain => "Douleur thoracique",
            Specialty::AlteredConsciousness => "Altération de l'état de conscience",
            Specialty::SevereInfection => "Infection sévère",
            Specialty::RecentTrauma => "Trauma récent",
            Specialty::CardiacEmergency => "Urgences cardiaques",
            Specialty::NeurologicalEmergency => "Urgences neurologiques",
            Specialty::PaediatricEmergency => "Urgences pédiatriques",
            Specialty::Cardiology => "Cardiologie",
            Specialty::Pulmonology => "Pneumologie",
            Specialty::Neurology => "Neurologie",
            Specialty::Paediatrics => "Pédiatrie",
            Specialty::Geriatrics => "Gériatrie",
            Specialty::IntensiveCare => "Réanimation",
            Specialty::Surgery => "Chirurgie",
            Specialty::Nephrology => "Néphrologie",
            Specialty::Endocrinology => "Endocrinologie",
            Specialty::Gastroenterology => "Gastro-entérologie",
            Specialty::Oncology => "Oncologie",
            Specialty::Psychiatry => "Psychiatrie",
            Specialty::Obstetrics => "Obstétrique",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How serious the generated case should be. The English variant names are
/// accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Severity {
    #[serde(rename = "Mineur", alias = "Minor")]
    Minor,
    #[default]
    #[serde(rename = "Modéré", alias = "Moderate")]
    Moderate,
    #[serde(rename = "Critique", alias = "Critical")]
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Moderate, Severity::Critical];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Minor => "Mineur",
            Severity::Moderate => "Modéré",
            Severity::Critical => "Critique",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The selector values that produce one generated case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseRequest {
    pub specialty: Specialty,
    #[serde(default)]
    pub severity: Severity,
}
