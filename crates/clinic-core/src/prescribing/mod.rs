//! Prescription rule engine.
//!
//! A diagnosis selects a medication template; the patient's age, sex and
//! history plus the diagnosis select safety warnings. Both are recomputed
//! whenever either input changes and snapshotted on submission.

mod formulary;
mod warnings;

pub use formulary::*;
pub use warnings::*;

use chrono::{DateTime, Utc};

use crate::config::Prescriber;
use crate::models::{generate_id, Medication, Patient, Prescription, ValidationError};

/// Diagnosis label used when no condition was picked.
pub const CUSTOM_DIAGNOSIS: &str = "Custom Diagnosis";

/// Medications and warnings for a patient/diagnosis pair, without a draft.
pub fn advise(
    formulary: &Formulary,
    patient: Option<&Patient>,
    diagnosis: Option<DiagnosisCode>,
) -> (Vec<Medication>, Vec<String>) {
    let medications = diagnosis
        .map(|code| formulary.templates_for(code))
        .unwrap_or_default();
    (medications, warnings_for(patient, diagnosis))
}

/// A prescription being written.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionDraft {
    patient: Option<Patient>,
    diagnosis: Option<DiagnosisCode>,
    medications: Vec<Medication>,
    warnings: Vec<String>,
    pub notes: String,
}

impl PrescriptionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn diagnosis(&self) -> Option<DiagnosisCode> {
        self.diagnosis
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Select (or clear) the patient. Medications are kept.
    pub fn select_patient(&mut self, patient: Option<Patient>) {
        self.patient = patient;
        self.refresh_warnings();
    }

    /// Select a diagnosis, replacing the medication list with its template.
    pub fn select_diagnosis(&mut self, formulary: &Formulary, code: DiagnosisCode) {
        self.diagnosis = Some(code);
        self.medications = formulary.templates_for(code);
        self.refresh_warnings();
    }

    /// Add a custom medication. Name and dosage are required.
    pub fn add_medication(&mut self, medication: Medication) -> Result<(), ValidationError> {
        if !medication.is_complete() {
            return Err(ValidationError::IncompleteMedication);
        }
        self.medications.push(medication);
        Ok(())
    }

    /// Replace the list with the prescriber's edited one.
    pub fn set_medications(&mut self, medications: Vec<Medication>) -> Result<(), ValidationError> {
        if !medications.iter().all(Medication::is_complete) {
            return Err(ValidationError::IncompleteMedication);
        }
        self.medications = medications;
        Ok(())
    }

    /// Remove the medication at `index`, if present.
    pub fn remove_medication(&mut self, index: usize) -> Option<Medication> {
        (index < self.medications.len()).then(|| self.medications.remove(index))
    }

    fn refresh_warnings(&mut self) {
        self.warnings = warnings_for(self.patient.as_ref(), self.diagnosis);
    }

    /// Commit the draft. Patient details and warnings are copied onto the
    /// prescription as they are now.
    pub fn submit(&self, prescriber: &Prescriber, now: DateTime<Utc>) -> Result<Prescription, ValidationError> {
        let patient = self.patient.as_ref().ok_or(ValidationError::MissingPatient)?;
        if self.medications.is_empty() {
            return Err(ValidationError::NoMedications);
        }

        Ok(Prescription {
            id: generate_id("RX"),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            patient_age: patient.age,
            patient_gender: patient.gender,
            diagnosis: self
                .diagnosis
                .map(|c| c.label())
                .unwrap_or(CUSTOM_DIAGNOSIS)
                .to_string(),
            medications: self.medications.clone(),
            date: now,
            doctor_name: prescriber.name.clone(),
            pmc_number: prescriber.pmc_number.clone(),
            warnings: self.warnings.clone(),
            notes: self.notes.clone(),
        })
    }
}
