use serde::Serialize;

use clinibot_core::models::registration::{RegistrationRecord, Role};

/// One spreadsheet row, as the webhook expects it.
///
/// Every column is always present; fields that do not apply to the
/// user's role are sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SheetRow {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub statut: String,
    pub year: String,
    pub university: String,
    pub hospital: String,
    pub service: String,
    pub experience: String,
}

impl From<&RegistrationRecord> for SheetRow {
    fn from(record: &RegistrationRecord) -> Self {
        let (year, university, hospital, service) = match &record.role {
            Role::Student { year, university } => {
                (year.clone(), university.clone(), String::new(), String::new())
            }
            Role::Nurse { hospital, service } => {
                (String::new(), String::new(), hospital.clone(), service.clone())
            }
        };

        SheetRow {
            first_name: record.first_name.trim().to_string(),
            last_name: record.last_name.trim().to_string(),
            age: record.age.map(|a| a.to_string()).unwrap_or_default(),
            statut: record.role.label().to_string(),
            year,
            university,
            hospital,
            service,
            experience: record.experience.label().to_string(),
        }
    }
}
