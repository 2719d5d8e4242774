//! Dashboard header figures.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::ClinicSnapshot;
use crate::models::LabStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub today_appointments: usize,
    /// Lab orders not yet delivered
    pub pending_lab_work: usize,
    /// Bill totals for the current calendar month
    pub monthly_revenue: f64,
    pub low_stock_items: usize,
}

pub fn dashboard_summary(snapshot: &ClinicSnapshot, now: NaiveDateTime) -> DashboardSummary {
    let today = now.date();

    DashboardSummary {
        total_patients: snapshot.patients.len(),
        today_appointments: snapshot.appointments.iter().filter(|a| a.is_on(today)).count(),
        pending_lab_work: snapshot
            .lab_work
            .iter()
            .filter(|l| l.status != LabStatus::Delivered)
            .count(),
        monthly_revenue: snapshot
            .bills
            .iter()
            .filter(|b| {
                let local = b.local_time().date();
                local.year() == today.year() && local.month() == today.month()
            })
            .map(|b| b.total)
            .sum(),
        low_stock_items: snapshot.inventory.iter().filter(|i| i.is_low_stock()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        default_inventory, Appointment, AppointmentType, Bill, Gender, LabWork, PaymentStatus,
        Patient,
    };
    use chrono::{Local, NaiveDate, TimeZone, Utc};

    fn local_noon(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
        Local.from_local_datetime(&naive).single().unwrap().with_timezone(&Utc)
    }

    fn bill(date: chrono::DateTime<Utc>, total: f64) -> Bill {
        Bill {
            id: crate::models::generate_id("BILL"),
            patient_id: "PAT-1".into(),
            date,
            items: vec![],
            subtotal: total,
            discount: 0.0,
            tax: 0.0,
            total,
            payment_method: "Cash".into(),
            payment_status: PaymentStatus::Paid,
            notes: String::new(),
        }
    }

    fn lab(status: LabStatus) -> LabWork {
        let d = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        LabWork {
            id: crate::models::generate_id("LAB"),
            patient_id: "PAT-1".into(),
            patient_name: "X".into(),
            lab_name: "Prime Dental Lab".into(),
            work_type: "Night Guard".into(),
            description: String::new(),
            date_ordered: d,
            expected_delivery: d,
            actual_delivery: None,
            status,
            cost: 0.0,
            notes: String::new(),
            shade_details: None,
            teeth: None,
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(dashboard_summary(&ClinicSnapshot::default(), now), DashboardSummary::default());
    }

    #[test]
    fn test_summary_counts() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let now = today.and_hms_opt(15, 30, 0).unwrap();

        let snapshot = ClinicSnapshot {
            patients: vec![Patient::new("A".into(), 30, Gender::Male, "1".into(), today)],
            appointments: vec![
                Appointment::new("P".into(), today, "09:00".into(), AppointmentType::CheckUp),
                Appointment::new("P".into(), today.succ_opt().unwrap(), "09:00".into(), AppointmentType::CheckUp),
            ],
            bills: vec![
                bill(local_noon(2026, 10, 1), 1500.0),
                bill(local_noon(2026, 10, 19), 500.0),
                bill(local_noon(2026, 9, 30), 9000.0),
                bill(local_noon(2025, 10, 19), 7000.0),
            ],
            lab_work: vec![
                lab(LabStatus::Ordered),
                lab(LabStatus::Delayed),
                lab(LabStatus::Ready),
                lab(LabStatus::Delivered),
            ],
            inventory: default_inventory(),
            ..Default::default()
        };

        let summary = dashboard_summary(&snapshot, now);
        assert_eq!(summary.total_patients, 1);
        assert_eq!(summary.today_appointments, 1);
        assert_eq!(summary.pending_lab_work, 3);
        assert_eq!(summary.monthly_revenue, 2000.0);
        assert_eq!(
            summary.low_stock_items,
            default_inventory().iter().filter(|i| i.quantity <= i.reorder_level).count()
        );
    }
}
