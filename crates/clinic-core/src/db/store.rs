//! Record stores layered over a key-value store.
//!
//! Each record type lives under one key as a JSON array. Stores are always
//! loaded and saved whole; there are no partial updates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{DbError, DbResult};
use crate::models::{
    Appointment, Bill, Expense, InventoryItem, LabWork, Patient, Prescription, Treatment,
};

/// Key holding the ISO timestamp of the last backup export/import.
pub const LAST_SYNC_KEY: &str = "last_sync";

/// Minimal string key-value storage.
pub trait KeyValueStore {
    /// Prefix prepended to every key.
    fn key_prefix(&self) -> &str;

    fn get_item(&self, key: &str) -> DbResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> DbResult<()>;

    fn remove_item(&self, key: &str) -> DbResult<bool>;

    /// Write several keys all-or-nothing.
    fn set_items(&self, entries: &[(String, String)]) -> DbResult<()>;

    /// Full storage key for a logical name.
    fn full_key(&self, name: &str) -> String {
        format!("{}{}", self.key_prefix(), name)
    }
}

/// The eight record stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Patients,
    Appointments,
    Treatments,
    Billing,
    Prescriptions,
    LabWork,
    Inventory,
    Expenses,
}

impl StoreKey {
    pub const ALL: [StoreKey; 8] = [
        StoreKey::Patients,
        StoreKey::Appointments,
        StoreKey::Treatments,
        StoreKey::Billing,
        StoreKey::Prescriptions,
        StoreKey::LabWork,
        StoreKey::Inventory,
        StoreKey::Expenses,
    ];

    /// Logical name, also used as the backup document key.
    pub fn name(&self) -> &'static str {
        match self {
            StoreKey::Patients => "patients",
            StoreKey::Appointments => "appointments",
            StoreKey::Treatments => "treatments",
            StoreKey::Billing => "billing",
            StoreKey::Prescriptions => "prescriptions",
            StoreKey::LabWork => "labwork",
            StoreKey::Inventory => "inventory",
            StoreKey::Expenses => "expenses",
        }
    }
}

/// A record kept in one of the stores.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const STORE: StoreKey;

    /// New records go to the front of the list (bills, orders, ...) unless
    /// the store keeps registration order.
    const NEWEST_FIRST: bool = true;

    fn id(&self) -> &str;
}

/// Id of a stored entry, read without parsing the rest of it.
fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

/// Whole-collection operations for any [`Record`] type.
///
/// Reads fail open: a store that is not a JSON array reads as empty, and an
/// entry that does not parse as `T` is skipped. Writes edit the stored
/// entries in place, so entries this version cannot read are carried over
/// untouched, and a store that is not an array is never overwritten.
pub trait RecordStore: KeyValueStore {
    /// Stored entries of `T`'s store as raw JSON. A missing key is empty.
    fn load_entries<T: Record>(&self) -> DbResult<Vec<Value>> {
        let key = self.full_key(T::STORE.name());
        let Some(raw) = self.get_item(&key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| DbError::Unreadable {
            key,
            reason: e.to_string(),
        })
    }

    fn save_entries<T: Record>(&self, entries: &[Value]) -> DbResult<()> {
        let json = serde_json::to_string(entries)?;
        self.set_item(&self.full_key(T::STORE.name()), &json)
    }

    /// Number of stored entries under `store`, readable or not. An unreadable
    /// store counts as empty.
    fn entry_count(&self, store: StoreKey) -> DbResult<usize> {
        let Some(raw) = self.get_item(&self.full_key(store.name()))? else {
            return Ok(0);
        };
        Ok(serde_json::from_str::<Vec<Value>>(&raw).map_or(0, |entries| entries.len()))
    }

    /// Load every record of type `T`, skipping entries that fail to parse.
    fn load_all<T: Record>(&self) -> DbResult<Vec<T>> {
        let entries = match self.load_entries::<T>() {
            Ok(entries) => entries,
            Err(DbError::Unreadable { key, reason }) => {
                tracing::warn!(key = %key, error = %reason, "Malformed store contents, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(store = T::STORE.name(), index, error = %e, "Skipping malformed record");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    /// Whether the store key has ever been written.
    fn has_store<T: Record>(&self) -> DbResult<bool> {
        Ok(self.get_item(&self.full_key(T::STORE.name()))?.is_some())
    }

    /// Overwrite the whole store.
    fn save_all<T: Record>(&self, records: &[T]) -> DbResult<()> {
        let json = serde_json::to_string(records)?;
        self.set_item(&self.full_key(T::STORE.name()), &json)
    }

    /// Load the store, writing `seed` first if the key has never been set.
    fn load_or_seed<T: Record, F: FnOnce() -> Vec<T>>(&self, seed: F) -> DbResult<Vec<T>> {
        if self.has_store::<T>()? {
            return self.load_all();
        }
        let records = seed();
        tracing::info!(store = T::STORE.name(), count = records.len(), "Seeding default records");
        self.save_all(&records)?;
        Ok(records)
    }

    fn get_record<T: Record>(&self, id: &str) -> DbResult<Option<T>> {
        Ok(self.load_all::<T>()?.into_iter().find(|r| r.id() == id))
    }

    fn insert_record<T: Record>(&self, record: T) -> DbResult<()> {
        let mut entries = self.load_entries::<T>()?;
        if entries.iter().any(|e| entry_id(e) == Some(record.id())) {
            return Err(DbError::Constraint(format!(
                "duplicate id {} in {}",
                record.id(),
                T::STORE.name()
            )));
        }
        let entry = serde_json::to_value(&record)?;
        if T::NEWEST_FIRST {
            entries.insert(0, entry);
        } else {
            entries.push(entry);
        }
        self.save_entries::<T>(&entries)
    }

    /// Replace the record with the same id. Returns false if none matched.
    fn update_record<T: Record>(&self, record: &T) -> DbResult<bool> {
        let mut entries = self.load_entries::<T>()?;
        let Some(slot) = entries.iter_mut().find(|e| entry_id(e) == Some(record.id())) else {
            return Ok(false);
        };
        *slot = serde_json::to_value(record)?;
        self.save_entries::<T>(&entries)?;
        Ok(true)
    }

    /// Replace each record with the stored entry of the same id in one write.
    /// Records with no stored counterpart are ignored. Returns how many matched.
    fn update_records<T: Record>(&self, records: &[T]) -> DbResult<usize> {
        let mut entries = self.load_entries::<T>()?;
        let mut matched = 0;
        for record in records {
            if let Some(slot) = entries.iter_mut().find(|e| entry_id(e) == Some(record.id())) {
                *slot = serde_json::to_value(record)?;
                matched += 1;
            }
        }
        if matched > 0 {
            self.save_entries::<T>(&entries)?;
        }
        Ok(matched)
    }

    /// Replace the record with the same id, or append it.
    fn upsert_record<T: Record>(&self, record: &T) -> DbResult<()> {
        let mut entries = self.load_entries::<T>()?;
        let entry = serde_json::to_value(record)?;
        match entries.iter_mut().find(|e| entry_id(e) == Some(record.id())) {
            Some(slot) => *slot = entry,
            None => entries.push(entry),
        }
        self.save_entries::<T>(&entries)
    }

    /// Remove a record by id. Never cascades to other stores.
    fn delete_record<T: Record>(&self, id: &str) -> DbResult<bool> {
        let mut entries = self.load_entries::<T>()?;
        let before = entries.len();
        entries.retain(|e| entry_id(e) != Some(id));
        if entries.len() == before {
            return Ok(false);
        }
        self.save_entries::<T>(&entries)?;
        Ok(true)
    }

    /// Point-in-time copy of every store.
    fn snapshot(&self) -> DbResult<ClinicSnapshot> {
        Ok(ClinicSnapshot {
            patients: self.load_all()?,
            appointments: self.load_all()?,
            treatments: self.load_all()?,
            bills: self.load_all()?,
            prescriptions: self.load_all()?,
            lab_work: self.load_all()?,
            inventory: self.load_all()?,
            expenses: self.load_all()?,
        })
    }

    /// Timestamp of the last backup, if any.
    fn last_sync(&self) -> DbResult<Option<String>> {
        self.get_item(&self.full_key(LAST_SYNC_KEY))
    }

    fn set_last_sync(&self, timestamp: &str) -> DbResult<()> {
        self.set_item(&self.full_key(LAST_SYNC_KEY), timestamp)
    }
}

impl<S: KeyValueStore> RecordStore for S {}

/// Copies of every store, passed to the analytics engine.
#[derive(Debug, Clone, Default)]
pub struct ClinicSnapshot {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub treatments: Vec<Treatment>,
    pub bills: Vec<Bill>,
    pub prescriptions: Vec<Prescription>,
    pub lab_work: Vec<LabWork>,
    pub inventory: Vec<InventoryItem>,
    pub expenses: Vec<Expense>,
}
