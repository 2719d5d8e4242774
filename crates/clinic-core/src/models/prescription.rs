//! Prescription models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Gender;

/// One prescribed medication line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    /// Frequency code (OD, BID, TID, QID, ...)
    pub frequency: String,
    pub duration: String,
    #[serde(default)]
    pub instructions: String,
}

impl Medication {
    pub fn new(name: &str, dosage: &str, frequency: &str, duration: &str, instructions: &str) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            duration: duration.into(),
            instructions: instructions.into(),
        }
    }

    /// Name and dosage are the minimum for a custom entry.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.dosage.trim().is_empty()
    }
}

/// A committed prescription. Patient details and warnings are snapshots taken
/// at submission and are not refreshed when the patient record changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    /// Diagnosis label, e.g. "Dental Abscess"
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    pub date: DateTime<Utc>,
    /// Prescriber name
    pub doctor_name: String,
    /// Prescriber council registration number
    pub pmc_number: String,
    pub warnings: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_medication() {
        assert!(Medication::new("Amoxicillin 500mg", "500mg", "TID", "5 days", "").is_complete());
        assert!(!Medication::new("Amoxicillin 500mg", "  ", "TID", "5 days", "").is_complete());
        assert!(!Medication::new("", "500mg", "TID", "5 days", "").is_complete());
    }

    #[test]
    fn test_prescription_json_is_camel_case() {
        let rx = Prescription {
            id: "RX-1".into(),
            patient_id: "PAT-1".into(),
            patient_name: "Imran".into(),
            patient_age: 52,
            patient_gender: Gender::Male,
            diagnosis: "Gingivitis".into(),
            medications: vec![Medication::new("Chlorhexidine 0.2%", "15ml", "BID", "7 days", "Rinse")],
            date: Utc::now(),
            doctor_name: "Dr. Ahmed".into(),
            pmc_number: "7071-D".into(),
            warnings: Vec::new(),
            notes: String::new(),
        };
        let value = serde_json::to_value(&rx).unwrap();
        assert_eq!(value["pmcNumber"], "7071-D");
        assert_eq!(value["patientAge"], 52);
        assert_eq!(value["medications"][0]["dosage"], "15ml");
    }
}
