//! Billing export for accounting.

use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult, RecordStore};
use crate::models::{Bill, Patient};

/// Billing export for a single bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillExport {
    pub metadata: BillMetadata,
    pub line_items: Vec<BillLineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillMetadata {
    pub bill_id: String,
    pub patient_id: String,
    /// Patient name at export time, empty if the patient was deleted
    pub patient_name: String,
    /// Bill timestamp, RFC 3339
    pub billed_at: String,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub payment_method: String,
    pub payment_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineItem {
    pub treatment_id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

const CSV_HEADER: &str = "bill_id,patient_id,patient_name,billed_at,treatment_id,description,quantity,unit_price,line_total,payment_method,payment_status\n";

impl BillExport {
    pub fn from_bill(bill: &Bill, patient: Option<&Patient>) -> Self {
        let line_items = bill
            .items
            .iter()
            .map(|item| BillLineItem {
                treatment_id: item.treatment_id.clone(),
                description: item.treatment_name.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                line_total: item.total,
            })
            .collect();

        Self {
            metadata: BillMetadata {
                bill_id: bill.id.clone(),
                patient_id: bill.patient_id.clone(),
                patient_name: patient.map(|p| p.name.clone()).unwrap_or_default(),
                billed_at: bill.date.to_rfc3339(),
                subtotal: bill.subtotal,
                discount: bill.discount,
                total: bill.total,
                payment_method: bill.payment_method.clone(),
                payment_status: format!("{:?}", bill.payment_status),
            },
            line_items,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        self.write_csv_rows(&mut csv);
        csv
    }

    fn write_csv_rows(&self, csv: &mut String) {
        let m = &self.metadata;
        for item in &self.line_items {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&m.bill_id),
                escape_csv(&m.patient_id),
                escape_csv(&m.patient_name),
                escape_csv(&m.billed_at),
                escape_csv(&item.treatment_id),
                escape_csv(&item.description),
                item.quantity,
                item.unit_price,
                item.line_total,
                escape_csv(&m.payment_method),
                escape_csv(&m.payment_status),
            ));
        }
    }
}

/// All bills in one export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchBillExport {
    pub exported_at: String,
    pub bills: Vec<BillExport>,
    pub total_items: usize,
    pub total_revenue: f64,
}

impl BatchBillExport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// One row per line item across every bill.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        for export in &self.bills {
            export.write_csv_rows(&mut csv);
        }
        csv
    }
}

pub struct BillingExporter<'a> {
    db: &'a Database,
}

impl<'a> BillingExporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Export every stored bill, newest first.
    pub fn export_all(&self) -> DbResult<BatchBillExport> {
        let bills: Vec<Bill> = self.db.load_all()?;
        let patients: Vec<Patient> = self.db.load_all()?;
        Ok(build_batch(&bills, &patients))
    }
}

pub fn build_batch(bills: &[Bill], patients: &[Patient]) -> BatchBillExport {
    let exports: Vec<BillExport> = bills
        .iter()
        .map(|b| BillExport::from_bill(b, crate::models::find_patient(patients, &b.patient_id)))
        .collect();

    BatchBillExport {
        exported_at: chrono::Utc::now().to_rfc3339(),
        total_items: exports.iter().map(|e| e.line_items.len()).sum(),
        total_revenue: bills.iter().map(|b| b.total).sum(),
        bills: exports,
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillDraft, Gender, Treatment, TreatmentCategory};
    use chrono::{NaiveDate, Utc};

    fn make_patient() -> Patient {
        Patient::new(
            "Khan, Imran".into(),
            52,
            Gender::Male,
            "0301-7654321".into(),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        )
    }

    fn make_bill(patient: &Patient) -> Bill {
        let mut draft = BillDraft::new();
        draft.patient_id = Some(patient.id.clone());
        draft.add_treatment(&Treatment::new("Scaling & Polishing".into(), TreatmentCategory::PreventiveCare, 3000.0));
        draft.add_treatment(&Treatment::new("Composite Filling".into(), TreatmentCategory::GeneralDentistry, 3500.0));
        draft.submit(Some(patient), Utc::now()).unwrap()
    }

    #[test]
    fn test_bill_export() {
        let patient = make_patient();
        let bill = make_bill(&patient);
        let export = BillExport::from_bill(&bill, Some(&patient));

        assert_eq!(export.metadata.bill_id, bill.id);
        assert_eq!(export.metadata.patient_name, "Khan, Imran");
        assert_eq!(export.line_items.len(), 2);
        assert_eq!(export.line_items[1].unit_price, 3500.0);

        let json = export.to_json().unwrap();
        assert!(json.contains("\"lineItems\""));
        assert!(json.contains("Composite Filling"));
    }

    #[test]
    fn test_bill_export_csv() {
        let patient = make_patient();
        let export = BillExport::from_bill(&make_bill(&patient), Some(&patient));

        let csv = export.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3); // Header + 2 items
        assert!(lines[0].starts_with("bill_id"));
        assert!(lines[1].contains("\"Khan, Imran\""));
        assert!(lines[1].contains("Scaling & Polishing"));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_batch_export_from_db() {
        let db = Database::open_in_memory().unwrap();
        let patient = make_patient();
        db.insert_patient(&patient).unwrap();
        db.insert_record(make_bill(&patient)).unwrap();

        let orphan = make_bill(&make_patient());
        db.insert_record(orphan).unwrap();

        let batch = BillingExporter::new(&db).export_all().unwrap();
        assert_eq!(batch.bills.len(), 2);
        assert_eq!(batch.total_items, 4);
        assert_eq!(batch.total_revenue, 13000.0);
        // Newest first; the orphan's patient was never stored
        assert_eq!(batch.bills[0].metadata.patient_name, "");
        assert_eq!(batch.to_csv().lines().count(), 5);
    }
}
