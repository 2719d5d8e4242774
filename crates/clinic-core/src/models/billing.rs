//! Billing models: bills, line items and the bill draft.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Patient, Treatment, ValidationError};

/// Payment state of a bill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Pending,
}

/// One billed treatment. Name and price are copied from the catalog when the
/// item is added and never re-derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub treatment_id: String,
    pub treatment_name: String,
    pub quantity: u32,
    /// Unit price
    pub price: f64,
    /// quantity * price
    pub total: f64,
}

impl BillItem {
    fn from_treatment(treatment: &Treatment) -> Self {
        Self {
            treatment_id: treatment.id.clone(),
            treatment_name: treatment.name.clone(),
            quantity: 1,
            price: treatment.price,
            total: treatment.price,
        }
    }
}

/// A persisted bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub patient_id: String,
    /// Creation timestamp
    pub date: DateTime<Utc>,
    pub items: Vec<BillItem>,
    pub subtotal: f64,
    /// Discount amount (not the percentage)
    pub discount: f64,
    /// Always zero: medical services are untaxed
    pub tax: f64,
    pub total: f64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub notes: String,
}

impl Bill {
    /// Bill timestamp on the local wall clock.
    pub fn local_time(&self) -> NaiveDateTime {
        self.date.with_timezone(&Local).naive_local()
    }
}

/// Totals computed from a draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax: f64,
    pub total: f64,
}

/// A bill being assembled before submission.
#[derive(Debug, Clone, Default)]
pub struct BillDraft {
    pub patient_id: Option<String>,
    pub items: Vec<BillItem>,
    /// Discount percentage, 0-100
    pub discount_percent: f64,
    pub payment_method: String,
    pub payment_status: Option<PaymentStatus>,
    pub notes: String,
}

impl BillDraft {
    pub fn new() -> Self {
        Self {
            payment_method: "Cash".into(),
            ..Default::default()
        }
    }

    /// Add a treatment. Adding one already on the bill bumps its quantity.
    pub fn add_treatment(&mut self, treatment: &Treatment) {
        match self
            .items
            .iter_mut()
            .find(|i| i.treatment_id == treatment.id)
        {
            Some(item) => {
                item.quantity += 1;
                item.total = f64::from(item.quantity) * item.price;
            }
            None => self.items.push(BillItem::from_treatment(treatment)),
        }
    }

    /// Drop a treatment line. Returns false if it was not on the bill.
    pub fn remove_treatment(&mut self, treatment_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.treatment_id != treatment_id);
        self.items.len() != before
    }

    pub fn totals(&self) -> BillTotals {
        let subtotal: f64 = self.items.iter().map(|i| i.total).sum();
        let discount_amount = subtotal * self.discount_percent / 100.0;
        let tax = 0.0;
        BillTotals {
            subtotal,
            discount_amount,
            tax,
            total: subtotal - discount_amount + tax,
        }
    }

    /// Turn the draft into a bill for `patient`.
    pub fn submit(&self, patient: Option<&Patient>, now: DateTime<Utc>) -> Result<Bill, ValidationError> {
        let patient = patient.ok_or(ValidationError::MissingPatient)?;
        if self.items.is_empty() {
            return Err(ValidationError::NoBillItems);
        }
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(ValidationError::InvalidField(format!(
                "discount {}% outside 0-100",
                self.discount_percent
            )));
        }

        let totals = self.totals();
        Ok(Bill {
            id: super::generate_id("BILL"),
            patient_id: patient.id.clone(),
            date: now,
            items: self.items.clone(),
            subtotal: totals.subtotal,
            discount: totals.discount_amount,
            tax: totals.tax,
            total: totals.total,
            payment_method: self.payment_method.clone(),
            payment_status: self.payment_status.unwrap_or(PaymentStatus::Paid),
            notes: self.notes.clone(),
        })
    }
}
