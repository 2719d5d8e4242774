//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient gender as recorded at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Stable id (`PAT-...`)
    pub id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    /// Free-text history; allergies and pregnancy are read from here
    #[serde(default)]
    pub medical_history: String,
    pub registration_date: NaiveDate,
}

impl Patient {
    /// Create a new patient registered on `registered_on`.
    pub fn new(name: String, age: u32, gender: Gender, phone: String, registered_on: NaiveDate) -> Self {
        Self {
            id: super::generate_id("PAT"),
            name,
            age,
            gender,
            phone,
            email: None,
            address: String::new(),
            medical_history: String::new(),
            registration_date: registered_on,
        }
    }

    /// Case-insensitive check against the medical history text.
    pub fn history_mentions(&self, needle: &str) -> bool {
        self.medical_history
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Whether this patient matches a search term by name, id or phone.
    pub fn matches_term(&self, term: &str) -> bool {
        let lower = term.to_lowercase();
        self.name.to_lowercase().contains(&lower)
            || self.id.to_lowercase().contains(&lower)
            || self.phone.contains(term)
    }
}

/// Look up a patient by id in a snapshot.
pub fn find_patient<'a>(patients: &'a [Patient], id: &str) -> Option<&'a Patient> {
    patients.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_patient() -> Patient {
        Patient::new(
            "Ayesha Khan".into(),
            34,
            Gender::Female,
            "0300-1234567".into(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )
    }

    #[test]
    fn test_new_patient() {
        let patient = make_patient();
        assert!(patient.id.starts_with("PAT-"));
        assert_eq!(patient.name, "Ayesha Khan");
        assert_eq!(patient.email, None);
    }

    #[test]
    fn test_history_mentions_ignores_case() {
        let mut patient = make_patient();
        patient.medical_history = "Known PENICILLIN Allergy since 2019".into();
        assert!(patient.history_mentions("penicillin allergy"));
        assert!(!patient.history_mentions("pregnant"));
    }

    #[test]
    fn test_matches_term() {
        let patient = make_patient();
        assert!(patient.matches_term("ayesha"));
        assert!(patient.matches_term("1234567"));
        assert!(patient.matches_term(&patient.id.to_lowercase()));
        assert!(!patient.matches_term("bilal"));
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"{
            "id": "PAT-1733000000000",
            "name": "Bilal",
            "age": 8,
            "gender": "Male",
            "phone": "0311-0000000",
            "email": "",
            "address": "Hayatabad",
            "medicalHistory": "",
            "registrationDate": "2024-12-01"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.age, 8);
        assert_eq!(patient.registration_date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }
}
