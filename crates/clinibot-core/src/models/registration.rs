use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 99;

/// Identity and background of the person using the trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub age: Option<u8>,
    pub role: Role,
    #[serde(default)]
    pub experience: ExperienceLevel,
}

/// Current status of the user. Each status carries its own required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    Student {
        year: String,
        university: String,
    },
    Nurse {
        hospital: String,
        #[serde(default)]
        service: String,
    },
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student { .. } => "Étudiant",
            Role::Nurse { .. } => "Nouveau recruté",
        }
    }
}

/// Self-reported level of clinical practice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Débutant",
            ExperienceLevel::Intermediate => "Intermédiaire",
            ExperienceLevel::Advanced => "Avancé",
        }
    }
}

impl RegistrationRecord {
    /// Check required fields before anything leaves the process.
    ///
    /// First and last name are always required. Students must give their
    /// year and university; nurses their hospital.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;

        if let Some(age) = self.age
            && !(MIN_AGE..=MAX_AGE).contains(&age)
        {
            return Err(CoreError::InvalidAge(age));
        }

        match &self.role {
            Role::Student { year, university } => {
                require("year", year)?;
                require("university", university)?;
            }
            Role::Nurse { hospital, .. } => {
                require("hospital", hospital)?;
            }
        }

        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MissingField(field.to_string()));
    }
    Ok(())
}
