//! Domain models for the clinic.

mod appointment;
mod billing;
mod expense;
mod inventory;
mod lab_work;
mod patient;
mod prescription;
mod treatment;

pub use appointment::*;
pub use billing::*;
pub use expense::*;
pub use inventory::*;
pub use lab_work::*;
pub use patient::*;
pub use prescription::*;
pub use treatment::*;

use thiserror::Error;

/// Submit-time validation failures. No record is created when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select a patient")]
    MissingPatient,

    #[error("Add at least one medication")]
    NoMedications,

    #[error("Add at least one item to the bill")]
    NoBillItems,

    #[error("Medication name and dosage are required")]
    IncompleteMedication,

    #[error("Invalid field: {0}")]
    InvalidField(String),
}

/// Generate a record id with an entity prefix, e.g. `PAT-3f2a...`.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
