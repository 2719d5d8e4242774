//! Clinic Core Library
//!
//! Local-first records, analytics and prescribing for a single dental clinic.
//!
//! # Architecture
//!
//! ```text
//!            Host UI (forms, tables, PDF)
//!                       │
//!                 ClinicCore (FFI)
//!                       │
//!      ┌────────────────┼─────────────────┬──────────────┐
//!      ▼                ▼                 ▼              ▼
//!  Record stores   Aggregation      Prescription     Lab tracker
//!  (db + models)     engine          rule engine     (sweep, FSM)
//!      │           (analytics)      (prescribing)       (lab)
//!      ▼
//!  kv_store (SQLite): adc_patients, adc_billing, ... as JSON lists
//!      │
//!      └──► Backup export / import (export)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite key-value store and whole-list record stores
//! - [`models`]: Domain types (Patient, Bill, LabWork, etc.)
//! - [`analytics`]: Dashboard, period BI, inventory and expense reports
//! - [`prescribing`]: Diagnosis templates and safety warnings
//! - [`lab`]: Lab order status transitions and overdue sweep
//! - [`export`]: Billing export and clinic backups
//! - [`config`]: Clinic configuration

pub mod analytics;
pub mod config;
pub mod db;
pub mod export;
pub mod lab;
pub mod models;
pub mod prescribing;

// Re-export commonly used types
pub use analytics::{DashboardSummary, Period, PeriodAnalytics};
pub use config::ClinicConfig;
pub use db::{ClinicSnapshot, Database, KeyValueStore, RecordStore};
pub use models::{
    Appointment, AppointmentStatus, AppointmentType, Bill, Expense, ExpenseCategory, Gender,
    InventoryItem, LabStatus, LabWork, Medication, Patient, Prescription, Treatment,
    TreatmentCategory,
};
pub use prescribing::{DiagnosisCode, Formulary, PrescriptionDraft};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Invalid status change: {0}")]
    InvalidTransition(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Confirmation required to delete {0}")]
    ConfirmationRequired(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for ClinicError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(id) => ClinicError::NotFound(id),
            other => ClinicError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(e: serde_json::Error) -> Self {
        ClinicError::SerializationError(e.to_string())
    }
}

impl From<models::ValidationError> for ClinicError {
    fn from(e: models::ValidationError) -> Self {
        ClinicError::ValidationFailed(e.to_string())
    }
}

impl From<lab::LabError> for ClinicError {
    fn from(e: lab::LabError) -> Self {
        match e {
            lab::LabError::Validation(v) => v.into(),
            transition => ClinicError::InvalidTransition(transition.to_string()),
        }
    }
}

impl From<db::LabUpdateError> for ClinicError {
    fn from(e: db::LabUpdateError) -> Self {
        match e {
            db::LabUpdateError::Db(e) => e.into(),
            db::LabUpdateError::Lab(e) => e.into(),
        }
    }
}

impl From<export::BackupError> for ClinicError {
    fn from(e: export::BackupError) -> Self {
        match e {
            export::BackupError::Database(e) => e.into(),
            invalid => ClinicError::ImportFailed(invalid.to_string()),
        }
    }
}

impl From<config::ConfigError> for ClinicError {
    fn from(e: config::ConfigError) -> Self {
        ClinicError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path with the default config.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<ClinicCore>, ClinicError> {
    let db = Database::open(&path)?;
    Ok(ClinicCore::with_database(db, ClinicConfig::default()))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<ClinicCore>, ClinicError> {
    let db = Database::open_in_memory()?;
    Ok(ClinicCore::with_database(db, ClinicConfig::default()))
}

/// Open the database described by a JSON config. Without a database path
/// the store lives in memory.
#[uniffi::export]
pub fn open_with_config(config_json: String) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = ClinicConfig::from_json_str(&config_json)?;
    let db = match &config.storage.database_path {
        Some(path) => Database::open_with_prefix(path, &config.storage.key_prefix)?,
        None => Database::open_in_memory_with_prefix(&config.storage.key_prefix)?,
    };
    Ok(ClinicCore::with_database(db, config))
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_date(value: &str) -> Result<NaiveDate, ClinicError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ClinicError::InvalidInput(format!("expected YYYY-MM-DD date, got {:?}", value)))
}

fn require_confirmation(confirmed: bool, what: &str) -> Result<(), ClinicError> {
    if confirmed {
        Ok(())
    } else {
        Err(ClinicError::ConfirmationRequired(what.to_string()))
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    db: Arc<Mutex<Database>>,
    config: ClinicConfig,
    formulary: Formulary,
}

impl ClinicCore {
    fn with_database(db: Database, config: ClinicConfig) -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            config,
            formulary: Formulary::new(),
        })
    }

    fn delete<T: db::Record>(&self, id: &str, confirmed: bool) -> Result<bool, ClinicError> {
        require_confirmation(confirmed, id)?;
        let db = self.db.lock()?;
        Ok(db.delete_record::<T>(id)?)
    }
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient, dated today.
    pub fn create_patient(
        &self,
        name: String,
        age: u32,
        gender: Gender,
        phone: String,
        medical_history: String,
    ) -> Result<FfiPatient, ClinicError> {
        if name.trim().is_empty() {
            return Err(ClinicError::InvalidInput("patient name is required".into()));
        }
        let db = self.db.lock()?;
        let mut patient = Patient::new(name, age, gender, phone, local_now().date());
        patient.medical_history = medical_history;
        db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Update a patient. Returns false if the id is unknown.
    pub fn update_patient(&self, patient: FfiPatient) -> Result<bool, ClinicError> {
        let patient = Patient::try_from(patient)?;
        let db = self.db.lock()?;
        Ok(db.update_patient(&patient)?)
    }

    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(&id)?.map(Into::into))
    }

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?.into_iter().map(Into::into).collect())
    }

    /// Search patients by name, id or phone.
    pub fn search_patients(&self, query: String, limit: u32) -> Result<Vec<FfiPatient>, ClinicError> {
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(Into::into).collect())
    }

    /// Delete a patient. Related records are kept.
    pub fn delete_patient(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        require_confirmation(confirmed, &id)?;
        let db = self.db.lock()?;
        Ok(db.delete_patient(&id)?)
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    pub fn book_appointment(
        &self,
        patient_id: String,
        date: String,
        time: String,
        kind: AppointmentType,
        notes: String,
    ) -> Result<FfiAppointment, ClinicError> {
        let mut appointment = Appointment::new(patient_id, parse_date(&date)?, time, kind);
        appointment.notes = notes;
        let db = self.db.lock()?;
        db.insert_record(appointment.clone())?;
        Ok(appointment.into())
    }

    /// Appointments on a date, by start time.
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, ClinicError> {
        let day = parse_date(&date)?;
        let db = self.db.lock()?;
        Ok(db.appointments_on(day)?.into_iter().map(Into::into).collect())
    }

    /// Replace an appointment. Returns false if the id is unknown.
    pub fn update_appointment(&self, appointment: FfiAppointment) -> Result<bool, ClinicError> {
        let appointment = Appointment::try_from(appointment)?;
        let db = self.db.lock()?;
        Ok(db.update_record(&appointment)?)
    }

    pub fn set_appointment_status(&self, id: String, status: AppointmentStatus) -> Result<bool, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.set_appointment_status(&id, status)?)
    }

    pub fn delete_appointment(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<Appointment>(&id, confirmed)
    }

    /// Bookable half-hour slots.
    pub fn day_slots(&self) -> Vec<String> {
        models::day_slots()
    }

    // =========================================================================
    // Treatment Operations
    // =========================================================================

    /// Treatments matching a name or description term, optionally in one
    /// category.
    pub fn search_treatments(
        &self,
        query: String,
        category: Option<TreatmentCategory>,
    ) -> Result<Vec<FfiTreatment>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.search_treatments(&query, category)?.into_iter().map(Into::into).collect())
    }

    pub fn list_treatments(&self) -> Result<Vec<FfiTreatment>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.list_treatments()?.into_iter().map(Into::into).collect())
    }

    pub fn upsert_treatment(&self, treatment: FfiTreatment) -> Result<(), ClinicError> {
        let db = self.db.lock()?;
        db.upsert_treatment(&treatment.into())?;
        Ok(())
    }

    pub fn delete_treatment(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<Treatment>(&id, confirmed)
    }

    // =========================================================================
    // Billing Operations
    // =========================================================================

    /// Bill a patient for treatments. Repeated ids increase the quantity.
    pub fn create_bill(
        &self,
        patient_id: String,
        treatment_ids: Vec<String>,
        discount_percent: f64,
        payment_method: String,
        notes: String,
    ) -> Result<FfiBill, ClinicError> {
        let db = self.db.lock()?;
        let treatments = db.list_treatments()?;

        let mut draft = models::BillDraft::new();
        draft.patient_id = Some(patient_id.clone());
        for id in &treatment_ids {
            let treatment = treatments
                .iter()
                .find(|t| &t.id == id)
                .ok_or_else(|| ClinicError::NotFound(id.clone()))?;
            draft.add_treatment(treatment);
        }
        draft.discount_percent = discount_percent;
        if !payment_method.trim().is_empty() {
            draft.payment_method = payment_method;
        }
        draft.notes = notes;

        let patient = db.get_patient(&patient_id)?;
        let bill = draft.submit(patient.as_ref(), Utc::now())?;
        db.insert_record(bill.clone())?;
        Ok(bill.into())
    }

    /// Bills, newest first.
    pub fn list_bills(&self) -> Result<Vec<FfiBill>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.load_all::<Bill>()?.into_iter().map(Into::into).collect())
    }

    pub fn delete_bill(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<Bill>(&id, confirmed)
    }

    /// Export billing data as JSON.
    pub fn export_billing_json(&self) -> Result<String, ClinicError> {
        let db = self.db.lock()?;
        let batch = export::BillingExporter::new(&db).export_all()?;
        Ok(batch.to_json()?)
    }

    /// Export billing data as CSV.
    pub fn export_billing_csv(&self) -> Result<String, ClinicError> {
        let db = self.db.lock()?;
        let batch = export::BillingExporter::new(&db).export_all()?;
        Ok(batch.to_csv())
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    /// Stock matching a name or supplier term, optionally in one category.
    pub fn search_inventory(
        &self,
        query: String,
        category: Option<String>,
    ) -> Result<Vec<FfiInventoryItem>, ClinicError> {
        let db = self.db.lock()?;
        let items = db.search_inventory(&query, category.as_deref())?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub fn inventory_categories(&self) -> Vec<String> {
        models::INVENTORY_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    pub fn suppliers(&self) -> Result<Vec<String>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.suppliers()?)
    }

    pub fn list_inventory(&self) -> Result<Vec<FfiInventoryItem>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.list_inventory()?.into_iter().map(Into::into).collect())
    }

    pub fn upsert_inventory_item(&self, item: FfiInventoryItem) -> Result<(), ClinicError> {
        let item = InventoryItem::try_from(item)?;
        let db = self.db.lock()?;
        db.upsert_inventory_item(&item)?;
        Ok(())
    }

    /// Add or remove stock. Quantity never drops below zero.
    pub fn adjust_inventory_quantity(&self, id: String, change: i64) -> Result<u32, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.adjust_inventory_quantity(&id, change)?)
    }

    pub fn delete_inventory_item(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<InventoryItem>(&id, confirmed)
    }

    /// Low-stock and expiring items using the configured expiry window.
    pub fn inventory_alerts(&self) -> Result<FfiInventoryAlerts, ClinicError> {
        let db = self.db.lock()?;
        let items = db.list_inventory()?;
        let alerts = analytics::inventory_alerts(
            &items,
            local_now().date(),
            self.config.inventory.expiry_window_days,
        );
        Ok(alerts.into())
    }

    // =========================================================================
    // Expense Operations
    // =========================================================================

    pub fn add_expense(
        &self,
        date: String,
        category: ExpenseCategory,
        description: String,
        amount: f64,
        payment_method: String,
    ) -> Result<FfiExpense, ClinicError> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(ClinicError::InvalidInput(format!("invalid amount {}", amount)));
        }
        let mut expense = Expense::new(parse_date(&date)?, category, description, amount);
        if !payment_method.trim().is_empty() {
            expense.payment_method = payment_method;
        }
        let db = self.db.lock()?;
        db.insert_record(expense.clone())?;
        Ok(expense.into())
    }

    /// Expenses, newest first.
    pub fn list_expenses(&self) -> Result<Vec<FfiExpense>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.load_all::<Expense>()?.into_iter().map(Into::into).collect())
    }

    pub fn delete_expense(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<Expense>(&id, confirmed)
    }

    // =========================================================================
    // Analytics Operations
    // =========================================================================

    pub fn dashboard_summary(&self) -> Result<FfiDashboardSummary, ClinicError> {
        let db = self.db.lock()?;
        let snapshot = db.snapshot()?;
        Ok(analytics::dashboard_summary(&snapshot, local_now()).into())
    }

    pub fn period_analytics(&self, period: Period) -> Result<FfiPeriodAnalytics, ClinicError> {
        let db = self.db.lock()?;
        let snapshot = db.snapshot()?;
        Ok(analytics::period_analytics(&snapshot, period, local_now()).into())
    }

    pub fn expense_breakdown(&self, year: i32, month: u32) -> Result<FfiExpenseBreakdown, ClinicError> {
        if !(1..=12).contains(&month) {
            return Err(ClinicError::InvalidInput(format!("month {} out of range", month)));
        }
        let db = self.db.lock()?;
        let snapshot = db.snapshot()?;
        Ok(analytics::expense_breakdown(&snapshot, year, month).into())
    }

    pub fn inventory_value(&self) -> Result<f64, ClinicError> {
        let db = self.db.lock()?;
        Ok(analytics::inventory_value(&db.list_inventory()?))
    }

    // =========================================================================
    // Prescription Operations
    // =========================================================================

    /// Diagnoses with their labels and tiers.
    pub fn list_diagnoses(&self) -> Vec<FfiDiagnosis> {
        DiagnosisCode::ALL
            .into_iter()
            .map(|code| FfiDiagnosis {
                code,
                id: code.id().to_string(),
                label: code.label().to_string(),
                tier: code.tier(),
            })
            .collect()
    }

    /// Template medications and warnings for the current form selection.
    pub fn prescription_advice(
        &self,
        patient_id: Option<String>,
        diagnosis: Option<DiagnosisCode>,
    ) -> Result<FfiPrescriptionAdvice, ClinicError> {
        let patient = match patient_id {
            Some(id) => self.db.lock()?.get_patient(&id)?,
            None => None,
        };
        let (medications, warnings) = prescribing::advise(&self.formulary, patient.as_ref(), diagnosis);
        Ok(FfiPrescriptionAdvice {
            medications: medications.into_iter().map(Into::into).collect(),
            warnings,
        })
    }

    /// Write a prescription. `medications` is the final edited list; the
    /// diagnosis template is used when it is empty.
    pub fn create_prescription(
        &self,
        patient_id: String,
        diagnosis: Option<DiagnosisCode>,
        medications: Vec<FfiMedication>,
        notes: String,
    ) -> Result<FfiPrescription, ClinicError> {
        let db = self.db.lock()?;

        let mut draft = PrescriptionDraft::new();
        draft.select_patient(db.get_patient(&patient_id)?);
        if let Some(code) = diagnosis {
            draft.select_diagnosis(&self.formulary, code);
        }
        if !medications.is_empty() {
            draft.set_medications(medications.into_iter().map(Into::into).collect())?;
        }
        draft.notes = notes;

        let prescription = draft.submit(&self.config.prescriber, Utc::now())?;
        db.insert_record(prescription.clone())?;
        Ok(prescription.into())
    }

    /// Prescriptions, newest first.
    pub fn list_prescriptions(&self) -> Result<Vec<FfiPrescription>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.load_all::<Prescription>()?.into_iter().map(Into::into).collect())
    }

    pub fn delete_prescription(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<Prescription>(&id, confirmed)
    }

    // =========================================================================
    // Lab Work Operations
    // =========================================================================

    /// Lab orders with overdue ones marked delayed.
    pub fn list_lab_work(&self) -> Result<Vec<FfiLabWork>, ClinicError> {
        let db = self.db.lock()?;
        let today = local_now().date();
        Ok(db
            .list_lab_work(today)?
            .into_iter()
            .map(|order| FfiLabWork::from_order(order, today))
            .collect())
    }

    /// Lab orders in one status after the overdue sweep; `None` lists all.
    pub fn lab_work_with_status(&self, status: Option<LabStatus>) -> Result<Vec<FfiLabWork>, ClinicError> {
        let db = self.db.lock()?;
        let today = local_now().date();
        Ok(db
            .lab_work_with_status(today, status)?
            .into_iter()
            .map(|order| FfiLabWork::from_order(order, today))
            .collect())
    }

    pub fn lab_summary(&self) -> Result<FfiLabSummary, ClinicError> {
        let db = self.db.lock()?;
        let orders = db.list_lab_work(local_now().date())?;
        Ok(lab::summarize(&orders).into())
    }

    /// Place a lab order. Known work types fill in cost and delivery date;
    /// explicit values override them.
    #[allow(clippy::too_many_arguments)]
    pub fn create_lab_order(
        &self,
        patient_id: String,
        lab_name: String,
        work_type: String,
        description: String,
        teeth: Option<String>,
        shade_details: Option<String>,
        expected_delivery: Option<String>,
        cost: Option<f64>,
    ) -> Result<FfiLabWork, ClinicError> {
        let today = local_now().date();
        let mut draft = lab::LabOrderDraft::new(today);
        draft.patient_id = Some(patient_id.clone());
        draft.lab_name = lab_name;
        draft.select_work_type(&work_type);
        draft.description = description;
        draft.teeth = teeth;
        draft.shade_details = shade_details;
        if let Some(date) = expected_delivery {
            draft.expected_delivery = Some(parse_date(&date)?);
        }
        if let Some(cost) = cost {
            draft.cost = cost;
        }

        let db = self.db.lock()?;
        let patient = db.get_patient(&patient_id)?;
        let order = draft.submit(patient.as_ref())?;
        db.insert_lab_work(&order)?;
        Ok(FfiLabWork::from_order(order, today))
    }

    pub fn update_lab_status(&self, id: String, status: LabStatus) -> Result<FfiLabWork, ClinicError> {
        let db = self.db.lock()?;
        let today = local_now().date();
        let order = db.update_lab_status(&id, status, today)?;
        Ok(FfiLabWork::from_order(order, today))
    }

    pub fn delete_lab_order(&self, id: String, confirmed: bool) -> Result<bool, ClinicError> {
        self.delete::<LabWork>(&id, confirmed)
    }

    pub fn lab_work_types(&self) -> Vec<FfiWorkType> {
        lab::work_types().into_iter().map(Into::into).collect()
    }

    pub fn partner_labs(&self) -> Vec<FfiPartnerLab> {
        lab::partner_labs().into_iter().map(Into::into).collect()
    }

    // =========================================================================
    // Backup Operations
    // =========================================================================

    /// Export every store as one JSON document.
    pub fn export_backup_json(&self) -> Result<String, ClinicError> {
        let db = self.db.lock()?;
        let document = export::export_backup(&*db, Utc::now())?;
        Ok(document.to_json()?)
    }

    /// Restore a backup. Returns the names of the stores that were replaced.
    pub fn import_backup_json(&self, json: String) -> Result<Vec<String>, ClinicError> {
        let db = self.db.lock()?;
        let summary = export::import_backup(&*db, &json, Utc::now())?;
        Ok(summary.restored.iter().map(|k| k.name().to_string()).collect())
    }

    /// Timestamp of the last backup export or import.
    /// Per-store record counts and their total.
    pub fn backup_stats(&self) -> Result<FfiBackupStats, ClinicError> {
        let db = self.db.lock()?;
        Ok(export::backup_stats(&*db)?.into())
    }

    pub fn last_backup(&self) -> Result<Option<String>, ClinicError> {
        let db = self.db.lock()?;
        Ok(db.last_sync()?)
    }

    /// Clinic name, address and phone for printed documents.
    pub fn clinic_profile(&self) -> FfiClinicProfile {
        let profile = &self.config.clinic;
        FfiClinicProfile {
            name: profile.name.clone(),
            address: profile.address.clone(),
            phone: profile.phone.clone(),
            doctor_name: self.config.prescriber.name.clone(),
            pmc_number: self.config.prescriber.pmc_number.clone(),
        }
    }
}

// =========================================================================
// FFI Types
// =========================================================================

fn count(n: usize) -> u64 {
    n as u64
}

/// FFI-safe patient. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub medical_history: String,
    pub registration_date: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone,
            email: patient.email,
            address: patient.address,
            medical_history: patient.medical_history,
            registration_date: patient.registration_date.to_string(),
        }
    }
}

impl TryFrom<FfiPatient> for Patient {
    type Error = ClinicError;

    fn try_from(patient: FfiPatient) -> Result<Self, Self::Error> {
        Ok(Patient {
            registration_date: parse_date(&patient.registration_date)?,
            id: patient.id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            phone: patient.phone,
            email: patient.email,
            address: patient.address,
            medical_history: patient.medical_history,
        })
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            date: appointment.date.to_string(),
            time: appointment.time,
            duration: appointment.duration,
            kind: appointment.kind,
            status: appointment.status,
            notes: appointment.notes,
        }
    }
}

impl TryFrom<FfiAppointment> for Appointment {
    type Error = ClinicError;

    fn try_from(appointment: FfiAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            date: parse_date(&appointment.date)?,
            id: appointment.id,
            patient_id: appointment.patient_id,
            time: appointment.time,
            duration: appointment.duration,
            kind: appointment.kind,
            status: appointment.status,
            notes: appointment.notes,
        })
    }
}

/// FFI-safe treatment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatment {
    pub id: String,
    pub name: String,
    pub category: TreatmentCategory,
    pub price: f64,
    pub duration: u32,
    pub description: String,
}

impl From<Treatment> for FfiTreatment {
    fn from(treatment: Treatment) -> Self {
        Self {
            id: treatment.id,
            name: treatment.name,
            category: treatment.category,
            price: treatment.price,
            duration: treatment.duration,
            description: treatment.description,
        }
    }
}

impl From<FfiTreatment> for Treatment {
    fn from(treatment: FfiTreatment) -> Self {
        Treatment {
            id: treatment.id,
            name: treatment.name,
            category: treatment.category,
            price: treatment.price,
            duration: treatment.duration,
            description: treatment.description,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBillItem {
    pub treatment_id: String,
    pub treatment_name: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

/// FFI-safe bill. `date` is RFC 3339.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBill {
    pub id: String,
    pub patient_id: String,
    pub date: String,
    pub items: Vec<FfiBillItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: String,
    pub payment_status: models::PaymentStatus,
    pub notes: String,
}

impl From<Bill> for FfiBill {
    fn from(bill: Bill) -> Self {
        Self {
            id: bill.id,
            patient_id: bill.patient_id,
            date: bill.date.to_rfc3339(),
            items: bill
                .items
                .into_iter()
                .map(|i| FfiBillItem {
                    treatment_id: i.treatment_id,
                    treatment_name: i.treatment_name,
                    quantity: i.quantity,
                    price: i.price,
                    total: i.total,
                })
                .collect(),
            subtotal: bill.subtotal,
            discount: bill.discount,
            tax: bill.tax,
            total: bill.total,
            payment_method: bill.payment_method,
            payment_status: bill.payment_status,
            notes: bill.notes,
        }
    }
}

/// FFI-safe inventory item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub reorder_level: u32,
    pub cost_per_unit: f64,
    pub supplier: String,
    pub expiry_date: Option<String>,
    pub last_restocked: String,
    pub notes: String,
}

impl From<InventoryItem> for FfiInventoryItem {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            reorder_level: item.reorder_level,
            cost_per_unit: item.cost_per_unit,
            supplier: item.supplier,
            expiry_date: item.expiry_date.map(|d| d.to_string()),
            last_restocked: item.last_restocked.to_string(),
            notes: item.notes,
        }
    }
}

impl TryFrom<FfiInventoryItem> for InventoryItem {
    type Error = ClinicError;

    fn try_from(item: FfiInventoryItem) -> Result<Self, Self::Error> {
        let expiry_date = match item.expiry_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(date) => Some(parse_date(date)?),
        };
        Ok(InventoryItem {
            expiry_date,
            last_restocked: parse_date(&item.last_restocked)?,
            id: item.id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            reorder_level: item.reorder_level,
            cost_per_unit: item.cost_per_unit,
            supplier: item.supplier,
            notes: item.notes,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExpiryAlert {
    pub item: FfiInventoryItem,
    pub days_until_expiry: i64,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryAlerts {
    pub low_stock: Vec<FfiInventoryItem>,
    pub expiring_soon: Vec<FfiExpiryAlert>,
    pub total_value: f64,
}

impl From<analytics::InventoryAlerts> for FfiInventoryAlerts {
    fn from(alerts: analytics::InventoryAlerts) -> Self {
        Self {
            low_stock: alerts.low_stock.into_iter().map(Into::into).collect(),
            expiring_soon: alerts
                .expiring_soon
                .into_iter()
                .map(|a| FfiExpiryAlert {
                    item: a.item.into(),
                    days_until_expiry: a.days_until_expiry,
                })
                .collect(),
            total_value: alerts.total_value,
        }
    }
}

/// FFI-safe expense.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExpense {
    pub id: String,
    pub date: String,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
    pub payment_method: String,
    pub notes: String,
}

impl From<Expense> for FfiExpense {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            date: expense.date.to_string(),
            category: expense.category,
            description: expense.description,
            amount: expense.amount,
            payment_method: expense.payment_method,
            notes: expense.notes,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardSummary {
    pub total_patients: u64,
    pub today_appointments: u64,
    pub pending_lab_work: u64,
    pub monthly_revenue: f64,
    pub low_stock_items: u64,
}

impl From<DashboardSummary> for FfiDashboardSummary {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_patients: count(summary.total_patients),
            today_appointments: count(summary.today_appointments),
            pending_lab_work: count(summary.pending_lab_work),
            monthly_revenue: summary.monthly_revenue,
            low_stock_items: count(summary.low_stock_items),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatmentRevenue {
    pub name: String,
    pub count: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthlyFigures {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// FFI-safe period report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPeriodAnalytics {
    pub period: Period,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub profit_margin: f64,
    pub avg_transaction_value: f64,
    pub top_treatments: Vec<FfiTreatmentRevenue>,
    pub monthly_trend: Vec<FfiMonthlyFigures>,
    pub total_patients: u64,
    pub period_appointments: u64,
    pub completed_appointments: u64,
}

impl From<PeriodAnalytics> for FfiPeriodAnalytics {
    fn from(report: PeriodAnalytics) -> Self {
        Self {
            period: report.period,
            total_revenue: report.total_revenue,
            total_expenses: report.total_expenses,
            profit: report.profit,
            profit_margin: report.profit_margin,
            avg_transaction_value: report.avg_transaction_value,
            top_treatments: report
                .top_treatments
                .into_iter()
                .map(|t| FfiTreatmentRevenue {
                    name: t.name,
                    count: t.count,
                    revenue: t.revenue,
                })
                .collect(),
            monthly_trend: report
                .monthly_trend
                .into_iter()
                .map(|m| FfiMonthlyFigures {
                    month: m.month,
                    revenue: m.revenue,
                    expenses: m.expenses,
                    profit: m.profit,
                })
                .collect(),
            total_patients: count(report.total_patients),
            period_appointments: count(report.period_appointments),
            completed_appointments: count(report.completed_appointments),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiExpenseBreakdown {
    pub year: i32,
    pub month: u32,
    pub categories: Vec<FfiCategoryTotal>,
    pub total_expenses: f64,
    pub revenue: f64,
    pub profit: f64,
    pub profit_margin: f64,
}

impl From<analytics::ExpenseBreakdown> for FfiExpenseBreakdown {
    fn from(report: analytics::ExpenseBreakdown) -> Self {
        Self {
            year: report.year,
            month: report.month,
            categories: report
                .categories
                .into_iter()
                .map(|c| FfiCategoryTotal {
                    category: c.category,
                    amount: c.amount,
                    percentage: c.percentage,
                })
                .collect(),
            total_expenses: report.total_expenses,
            revenue: report.revenue,
            profit: report.profit,
            profit_margin: report.profit_margin,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiagnosis {
    pub code: DiagnosisCode,
    pub id: String,
    pub label: String,
    pub tier: prescribing::Tier,
}

/// FFI-safe medication line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

impl From<Medication> for FfiMedication {
    fn from(m: Medication) -> Self {
        Self {
            name: m.name,
            dosage: m.dosage,
            frequency: m.frequency,
            duration: m.duration,
            instructions: m.instructions,
        }
    }
}

impl From<FfiMedication> for Medication {
    fn from(m: FfiMedication) -> Self {
        Medication {
            name: m.name,
            dosage: m.dosage,
            frequency: m.frequency,
            duration: m.duration,
            instructions: m.instructions,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescriptionAdvice {
    pub medications: Vec<FfiMedication>,
    pub warnings: Vec<String>,
}

/// FFI-safe prescription. `date` is RFC 3339.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescription {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub diagnosis: String,
    pub medications: Vec<FfiMedication>,
    pub date: String,
    pub doctor_name: String,
    pub pmc_number: String,
    pub warnings: Vec<String>,
    pub notes: String,
}

impl From<Prescription> for FfiPrescription {
    fn from(rx: Prescription) -> Self {
        Self {
            id: rx.id,
            patient_id: rx.patient_id,
            patient_name: rx.patient_name,
            patient_age: rx.patient_age,
            patient_gender: rx.patient_gender,
            diagnosis: rx.diagnosis,
            medications: rx.medications.into_iter().map(Into::into).collect(),
            date: rx.date.to_rfc3339(),
            doctor_name: rx.doctor_name,
            pmc_number: rx.pmc_number,
            warnings: rx.warnings,
            notes: rx.notes,
        }
    }
}

/// FFI-safe lab order with its countdown as of the listing day.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabWork {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub lab_name: String,
    pub work_type: String,
    pub description: String,
    pub date_ordered: String,
    pub expected_delivery: String,
    pub actual_delivery: Option<String>,
    pub status: LabStatus,
    pub cost: f64,
    pub notes: String,
    pub shade_details: Option<String>,
    pub teeth: Option<String>,
    pub days_remaining: i64,
}

impl FfiLabWork {
    fn from_order(order: LabWork, today: NaiveDate) -> Self {
        Self {
            days_remaining: order.days_remaining(today),
            id: order.id,
            patient_id: order.patient_id,
            patient_name: order.patient_name,
            lab_name: order.lab_name,
            work_type: order.work_type,
            description: order.description,
            date_ordered: order.date_ordered.to_string(),
            expected_delivery: order.expected_delivery.to_string(),
            actual_delivery: order.actual_delivery.map(|d| d.to_string()),
            status: order.status,
            cost: order.cost,
            notes: order.notes,
            shade_details: order.shade_details,
            teeth: order.teeth,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabSummary {
    pub pending: u64,
    pub delayed: u64,
    pub ready: u64,
}

impl From<lab::LabSummary> for FfiLabSummary {
    fn from(summary: lab::LabSummary) -> Self {
        Self {
            pending: count(summary.pending),
            delayed: count(summary.delayed),
            ready: count(summary.ready),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWorkType {
    pub name: String,
    pub cost: f64,
    pub turnaround_days: u32,
}

impl From<lab::WorkType> for FfiWorkType {
    fn from(w: lab::WorkType) -> Self {
        Self {
            name: w.name,
            cost: w.cost,
            turnaround_days: w.turnaround_days,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPartnerLab {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub specialties: Vec<String>,
}

impl From<lab::PartnerLab> for FfiPartnerLab {
    fn from(l: lab::PartnerLab) -> Self {
        Self {
            name: l.name,
            address: l.address,
            phone: l.phone,
            specialties: l.specialties,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStoreCount {
    /// Store name, as used in backup documents
    pub store: String,
    pub records: u64,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBackupStats {
    pub stores: Vec<FfiStoreCount>,
    pub total_records: u64,
}

impl From<export::BackupStats> for FfiBackupStats {
    fn from(stats: export::BackupStats) -> Self {
        Self {
            stores: stats
                .stores
                .into_iter()
                .map(|c| FfiStoreCount {
                    store: c.store.name().to_string(),
                    records: count(c.records),
                })
                .collect(),
            total_records: count(stats.total_records),
        }
    }
}

/// Letterhead details for printed bills and prescriptions.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub doctor_name: String,
    pub pmc_number: String,
}
