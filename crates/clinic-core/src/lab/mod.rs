//! Lab order status tracking.
//!
//! ```text
//! Ordered ──► In Progress ──► Ready ──► Delivered
//!    │             │            │          ▲
//!    └─────────────┴────────────┴─► Delayed┘   (automatic, when overdue)
//! ```
//!
//! Forward moves are explicit user actions. The overdue sweep is the only
//! automatic transition and must run before statuses are shown.

mod catalog;

pub use catalog::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{LabStatus, LabWork, Patient, ValidationError};

/// Lab tracker errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabError {
    #[error("Cannot move lab order from {from:?} to {to:?}")]
    InvalidTransition { from: LabStatus, to: LabStatus },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type LabResult<T> = Result<T, LabError>;

/// Whether a user may move an order from `from` to `to`.
pub fn can_transition(from: LabStatus, to: LabStatus) -> bool {
    use LabStatus::*;
    matches!(
        (from, to),
        (Ordered, InProgress) | (InProgress, Ready) | (Ready, Delivered) | (Delayed, Delivered)
    )
}

/// Apply a user-driven status change. Delivery stamps `actual_delivery`.
pub fn transition(order: &mut LabWork, to: LabStatus, today: NaiveDate) -> LabResult<()> {
    if !can_transition(order.status, to) {
        return Err(LabError::InvalidTransition {
            from: order.status,
            to,
        });
    }
    order.status = to;
    if to == LabStatus::Delivered {
        order.actual_delivery = Some(today);
    }
    Ok(())
}

/// Mark every open order past its expected delivery date as delayed.
///
/// Idempotent: delayed and delivered orders are left alone. Returns the
/// number of orders changed.
pub fn sweep_overdue(orders: &mut [LabWork], today: NaiveDate) -> usize {
    let mut changed = 0;
    for order in orders.iter_mut() {
        if order.is_overdue(today) && order.status != LabStatus::Delayed {
            order.status = LabStatus::Delayed;
            changed += 1;
        }
    }
    if changed > 0 {
        tracing::debug!(changed, %today, "Lab orders marked delayed");
    }
    changed
}

/// Counts shown on the lab board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabSummary {
    /// Ordered or in progress
    pub pending: usize,
    pub delayed: usize,
    pub ready: usize,
}

pub fn summarize(orders: &[LabWork]) -> LabSummary {
    orders.iter().fold(LabSummary::default(), |mut s, o| {
        match o.status {
            LabStatus::Ordered | LabStatus::InProgress => s.pending += 1,
            LabStatus::Delayed => s.delayed += 1,
            LabStatus::Ready => s.ready += 1,
            LabStatus::Delivered => {}
        }
        s
    })
}

/// Lab order being filled in before submission.
#[derive(Debug, Clone)]
pub struct LabOrderDraft {
    pub patient_id: Option<String>,
    pub lab_name: String,
    pub work_type: String,
    pub description: String,
    pub date_ordered: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub cost: f64,
    pub notes: String,
    pub shade_details: Option<String>,
    pub teeth: Option<String>,
}

impl LabOrderDraft {
    pub fn new(date_ordered: NaiveDate) -> Self {
        Self {
            patient_id: None,
            lab_name: String::new(),
            work_type: String::new(),
            description: String::new(),
            date_ordered,
            expected_delivery: None,
            cost: 0.0,
            notes: String::new(),
            shade_details: None,
            teeth: None,
        }
    }

    /// Pick a work type; known types fill in cost and expected delivery.
    pub fn select_work_type(&mut self, name: &str) {
        self.work_type = name.to_string();
        if let Some(kind) = find_work_type(name) {
            self.cost = kind.cost;
            self.expected_delivery = Some(kind.expected_delivery(self.date_ordered));
        }
    }

    /// Build the order for `patient`. The patient's name is copied onto it.
    pub fn submit(&self, patient: Option<&Patient>) -> LabResult<LabWork> {
        let patient = patient.ok_or(ValidationError::MissingPatient)?;
        if self.work_type.trim().is_empty() {
            return Err(ValidationError::InvalidField("work type is required".into()).into());
        }
        let expected_delivery = self
            .expected_delivery
            .ok_or_else(|| ValidationError::InvalidField("expected delivery is required".into()))?;

        Ok(LabWork {
            id: crate::models::generate_id("LAB"),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            lab_name: self.lab_name.clone(),
            work_type: self.work_type.clone(),
            description: self.description.clone(),
            date_ordered: self.date_ordered,
            expected_delivery,
            actual_delivery: None,
            status: LabStatus::Ordered,
            cost: self.cost,
            notes: self.notes.clone(),
            shade_details: self.shade_details.clone(),
            teeth: self.teeth.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_order(status: LabStatus, expected: NaiveDate) -> LabWork {
        LabWork {
            id: "LAB-1".into(),
            patient_id: "PAT-1".into(),
            patient_name: "Sana".into(),
            lab_name: "Khyber Dental Laboratory".into(),
            work_type: "Crown (PFM)".into(),
            description: String::new(),
            date_ordered: date(2026, 10, 1),
            expected_delivery: expected,
            actual_delivery: None,
            status,
            cost: 8000.0,
            notes: String::new(),
            shade_details: None,
            teeth: None,
        }
    }

    #[test]
    fn test_forward_transitions() {
        let today = date(2026, 10, 5);
        let mut order = make_order(LabStatus::Ordered, date(2026, 10, 8));

        transition(&mut order, LabStatus::InProgress, today).unwrap();
        transition(&mut order, LabStatus::Ready, today).unwrap();
        assert_eq!(order.actual_delivery, None);
        transition(&mut order, LabStatus::Delivered, today).unwrap();

        assert_eq!(order.status, LabStatus::Delivered);
        assert_eq!(order.actual_delivery, Some(today));
    }

    #[test]
    fn test_delivered_is_terminal() {
        let mut order = make_order(LabStatus::Delivered, date(2026, 10, 8));
        for to in [
            LabStatus::Ordered,
            LabStatus::InProgress,
            LabStatus::Ready,
            LabStatus::Delayed,
            LabStatus::Delivered,
        ] {
            assert!(transition(&mut order, to, date(2026, 10, 9)).is_err());
        }
    }

    #[test]
    fn test_skipping_steps_rejected() {
        let mut order = make_order(LabStatus::Ordered, date(2026, 10, 8));
        let err = transition(&mut order, LabStatus::Delivered, date(2026, 10, 2)).unwrap_err();
        assert_eq!(
            err,
            LabError::InvalidTransition {
                from: LabStatus::Ordered,
                to: LabStatus::Delivered
            }
        );
        assert_eq!(order.status, LabStatus::Ordered);
    }

    #[test]
    fn test_delayed_can_be_delivered() {
        let today = date(2026, 10, 20);
        let mut order = make_order(LabStatus::Delayed, date(2026, 10, 8));
        transition(&mut order, LabStatus::Delivered, today).unwrap();
        assert_eq!(order.actual_delivery, Some(today));
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let today = date(2026, 10, 19);
        let past = date(2026, 10, 18);
        let mut orders = vec![
            make_order(LabStatus::Ordered, past),
            make_order(LabStatus::InProgress, past),
            make_order(LabStatus::Ready, past),
            make_order(LabStatus::Delivered, past),
            make_order(LabStatus::Ordered, today), // due today, not overdue
        ];

        assert_eq!(sweep_overdue(&mut orders, today), 3);
        assert_eq!(orders[0].status, LabStatus::Delayed);
        assert_eq!(orders[2].status, LabStatus::Delayed);
        assert_eq!(orders[3].status, LabStatus::Delivered);
        assert_eq!(orders[4].status, LabStatus::Ordered);

        let before = orders.clone();
        assert_eq!(sweep_overdue(&mut orders, today), 0);
        assert_eq!(orders, before);
    }

    #[test]
    fn test_days_remaining() {
        let today = date(2026, 10, 19);
        assert_eq!(make_order(LabStatus::Ordered, date(2026, 10, 22)).days_remaining(today), 3);
        assert_eq!(make_order(LabStatus::Ordered, today).days_remaining(today), 0);
        assert_eq!(make_order(LabStatus::Ordered, date(2026, 10, 17)).days_remaining(today), -2);
    }

    #[test]
    fn test_summary() {
        let d = date(2026, 10, 30);
        let orders = vec![
            make_order(LabStatus::Ordered, d),
            make_order(LabStatus::InProgress, d),
            make_order(LabStatus::Ready, d),
            make_order(LabStatus::Delayed, d),
            make_order(LabStatus::Delivered, d),
        ];
        assert_eq!(
            summarize(&orders),
            LabSummary {
                pending: 2,
                delayed: 1,
                ready: 1
            }
        );
    }

    #[test]
    fn test_draft_fills_from_work_type() {
        let patient = Patient::new("Sana".into(), 45, Gender::Female, "1".into(), date(2026, 1, 1));
        let mut draft = LabOrderDraft::new(date(2026, 10, 19));
        draft.lab_name = "Modern Dental Laboratory".into();
        draft.select_work_type("Crown (Zirconia)");

        assert_eq!(draft.cost, 15000.0);
        assert_eq!(draft.expected_delivery, Some(date(2026, 10, 29)));

        assert!(matches!(
            draft.submit(None),
            Err(LabError::Validation(ValidationError::MissingPatient))
        ));

        let order = draft.submit(Some(&patient)).unwrap();
        assert!(order.id.starts_with("LAB-"));
        assert_eq!(order.patient_name, "Sana");
        assert_eq!(order.status, LabStatus::Ordered);
    }
}
