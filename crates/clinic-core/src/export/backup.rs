//! Whole-clinic backup and restore.
//!
//! A backup is one JSON document holding every store plus `exportDate`.
//! Restore parses the full document before writing anything, then replaces
//! each store present in the document inside a single transaction. Stores
//! missing from the document are left untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{DbError, KeyValueStore, RecordStore, StoreKey, LAST_SYNC_KEY};
use crate::models::{
    Appointment, Bill, Expense, InventoryItem, LabWork, Patient, Prescription, Treatment,
};

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Invalid backup file: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub type BackupResult<T> = Result<T, BackupError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<Patient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Vec<Appointment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatments: Option<Vec<Treatment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Vec<Bill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriptions: Option<Vec<Prescription>>,
    #[serde(default, rename = "labwork", skip_serializing_if = "Option::is_none")]
    pub lab_work: Option<Vec<LabWork>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Expense>>,
    #[serde(default)]
    pub export_date: Option<String>,
}

impl BackupDocument {
    pub fn from_json(json: &str) -> BackupResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialized stores present in the document, keyed by logical name.
    fn entries(&self) -> Result<Vec<(StoreKey, String)>, serde_json::Error> {
        fn push<T: Serialize>(
            out: &mut Vec<(StoreKey, String)>,
            key: StoreKey,
            records: &Option<Vec<T>>,
        ) -> Result<(), serde_json::Error> {
            if let Some(records) = records {
                out.push((key, serde_json::to_string(records)?));
            }
            Ok(())
        }

        let mut out = Vec::new();
        push(&mut out, StoreKey::Patients, &self.patients)?;
        push(&mut out, StoreKey::Appointments, &self.appointments)?;
        push(&mut out, StoreKey::Treatments, &self.treatments)?;
        push(&mut out, StoreKey::Billing, &self.billing)?;
        push(&mut out, StoreKey::Prescriptions, &self.prescriptions)?;
        push(&mut out, StoreKey::LabWork, &self.lab_work)?;
        push(&mut out, StoreKey::Inventory, &self.inventory)?;
        push(&mut out, StoreKey::Expenses, &self.expenses)?;
        Ok(out)
    }
}

/// Stores counted on the backup screen. The price list is not clinic data
/// and is left out.
pub const COUNTED_STORES: [StoreKey; 7] = [
    StoreKey::Patients,
    StoreKey::Appointments,
    StoreKey::Billing,
    StoreKey::Prescriptions,
    StoreKey::LabWork,
    StoreKey::Inventory,
    StoreKey::Expenses,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCount {
    pub store: StoreKey,
    pub records: usize,
}

/// Record counts shown before a backup is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupStats {
    pub stores: Vec<StoreCount>,
    pub total_records: usize,
}

pub fn backup_stats<S: KeyValueStore>(store: &S) -> BackupResult<BackupStats> {
    let stores = COUNTED_STORES
        .into_iter()
        .map(|key| {
            Ok(StoreCount {
                store: key,
                records: store.entry_count(key)?,
            })
        })
        .collect::<Result<Vec<_>, DbError>>()?;
    let total_records = stores.iter().map(|c| c.records).sum();
    Ok(BackupStats { stores, total_records })
}

/// What a restore changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub restored: Vec<StoreKey>,
    pub skipped: Vec<StoreKey>,
}

/// Snapshot every store into a backup document and record the backup time.
pub fn export_backup<S: KeyValueStore>(store: &S, now: DateTime<Utc>) -> BackupResult<BackupDocument> {
    let snapshot = store.snapshot()?;
    let export_date = now.to_rfc3339();

    let document = BackupDocument {
        patients: Some(snapshot.patients),
        appointments: Some(snapshot.appointments),
        treatments: Some(snapshot.treatments),
        billing: Some(snapshot.bills),
        prescriptions: Some(snapshot.prescriptions),
        lab_work: Some(snapshot.lab_work),
        inventory: Some(snapshot.inventory),
        expenses: Some(snapshot.expenses),
        export_date: Some(export_date.clone()),
    };

    store.set_last_sync(&export_date)?;
    tracing::info!(export_date = %export_date, "Exported clinic backup");
    Ok(document)
}

/// Restore a backup from its JSON text. Nothing is written if the text does
/// not parse as a backup document.
pub fn import_backup<S: KeyValueStore>(store: &S, json: &str, now: DateTime<Utc>) -> BackupResult<ImportSummary> {
    let document = match BackupDocument::from_json(json) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected backup import");
            return Err(e);
        }
    };
    import_document(store, &document, now)
}

pub fn import_document<S: KeyValueStore>(
    store: &S,
    document: &BackupDocument,
    now: DateTime<Utc>,
) -> BackupResult<ImportSummary> {
    let present = document.entries()?;
    let restored: Vec<StoreKey> = present.iter().map(|(key, _)| *key).collect();
    let skipped = StoreKey::ALL
        .into_iter()
        .filter(|key| !restored.contains(key))
        .collect();

    let mut writes: Vec<(String, String)> = present
        .into_iter()
        .map(|(key, json)| (store.full_key(key.name()), json))
        .collect();
    writes.push((store.full_key(LAST_SYNC_KEY), now.to_rfc3339()));
    store.set_items(&writes)?;

    tracing::info!(restored = restored.len(), "Imported clinic backup");
    Ok(ImportSummary { restored, skipped })
}
