//! Lab work order models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lab order status. `Delivered` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum LabStatus {
    Ordered,
    #[serde(rename = "In Progress")]
    InProgress,
    Ready,
    Delivered,
    Delayed,
}

impl LabStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LabStatus::Delivered)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LabStatus::Ordered => "Ordered",
            LabStatus::InProgress => "In Progress",
            LabStatus::Ready => "Ready",
            LabStatus::Delivered => "Delivered",
            LabStatus::Delayed => "Delayed",
        }
    }
}

/// An order sent to an outside dental lab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabWork {
    pub id: String,
    pub patient_id: String,
    /// Patient name at order time
    pub patient_name: String,
    pub lab_name: String,
    pub work_type: String,
    #[serde(default)]
    pub description: String,
    pub date_ordered: NaiveDate,
    pub expected_delivery: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<NaiveDate>,
    pub status: LabStatus,
    pub cost: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shade_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teeth: Option<String>,
}

impl LabWork {
    /// Days until the expected delivery; negative when overdue.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.expected_delivery - today).num_days()
    }

    /// Past its expected delivery date and still open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.expected_delivery && !self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&LabStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        assert_eq!(LabStatus::InProgress.label(), "In Progress");
        assert!(LabStatus::Delivered.is_terminal());
        assert!(!LabStatus::Delayed.is_terminal());
    }

    #[test]
    fn test_parse_stored_order() {
        let json = r#"{
            "id": "LAB-1", "patientId": "PAT-1", "patientName": "Zainab",
            "labName": "Khyber Dental Lab", "workType": "Crown (PFM)",
            "dateOrdered": "2026-10-01", "expectedDelivery": "2026-10-08",
            "status": "Ordered", "cost": 8000
        }"#;
        let order: LabWork = serde_json::from_str(json).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 10).unwrap();

        assert_eq!(order.days_remaining(today), -2);
        assert!(order.is_overdue(today));
        assert!(order.teeth.is_none());
    }
}
