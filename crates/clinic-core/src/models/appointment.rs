//! Appointment models.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Kind of visit booked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
pub enum AppointmentType {
    #[serde(rename = "Check-up")]
    CheckUp,
    Cleaning,
    Filling,
    #[serde(rename = "Root Canal")]
    RootCanal,
    Extraction,
    #[serde(rename = "Crown/Bridge")]
    CrownBridge,
    Emergency,
    #[serde(rename = "Follow-up")]
    FollowUp,
}

/// Appointment status. Transitions are user driven only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[serde(rename = "No-Show")]
    NoShow,
}

/// A booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    /// Patient id (looked up, never owned)
    pub patient_id: String,
    pub date: NaiveDate,
    /// Start time, "HH:MM"
    pub time: String,
    /// Length in minutes
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
}

impl Appointment {
    /// Book a new appointment in the `Scheduled` state.
    pub fn new(patient_id: String, date: NaiveDate, time: String, kind: AppointmentType) -> Self {
        Self {
            id: super::generate_id("APT"),
            patient_id,
            date,
            time,
            duration: 30,
            kind,
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}

/// Number of bookable slots in a clinic day.
pub const DAY_SLOT_COUNT: u32 = 20;

/// The clinic's half-hour slot grid, starting at 09:00.
pub fn day_slots() -> Vec<String> {
    (0..DAY_SLOT_COUNT)
        .filter_map(|i| {
            let minutes = 9 * 60 + i * 30;
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        })
        .map(|t| t.format("%H:%M").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_slots() {
        let slots = day_slots();
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0], "09:00");
        assert_eq!(slots[1], "09:30");
        assert_eq!(slots[19], "18:30");
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"No-Show\"");
        let kind: AppointmentType = serde_json::from_str("\"Crown/Bridge\"").unwrap();
        assert_eq!(kind, AppointmentType::CrownBridge);
    }

    #[test]
    fn test_new_appointment_is_scheduled() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let appt = Appointment::new("PAT-1".into(), day, "10:30".into(), AppointmentType::Filling);
        assert!(appt.id.starts_with("APT-"));
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert!(appt.is_on(day));
    }
}
