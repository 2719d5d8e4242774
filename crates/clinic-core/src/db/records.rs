//! Store bindings for each record type.

use super::{Record, StoreKey};
use crate::models::{
    Appointment, Bill, Expense, InventoryItem, LabWork, Patient, Prescription, Treatment,
};

impl Record for Patient {
    const STORE: StoreKey = StoreKey::Patients;
    const NEWEST_FIRST: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Appointment {
    const STORE: StoreKey = StoreKey::Appointments;
    const NEWEST_FIRST: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Treatment {
    const STORE: StoreKey = StoreKey::Treatments;
    const NEWEST_FIRST: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Bill {
    const STORE: StoreKey = StoreKey::Billing;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Prescription {
    const STORE: StoreKey = StoreKey::Prescriptions;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for LabWork {
    const STORE: StoreKey = StoreKey::LabWork;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for InventoryItem {
    const STORE: StoreKey = StoreKey::Inventory;
    const NEWEST_FIRST: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Expense {
    const STORE: StoreKey = StoreKey::Expenses;

    fn id(&self) -> &str {
        &self.id
    }
}
