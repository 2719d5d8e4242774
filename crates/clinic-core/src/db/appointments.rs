//! Appointment database operations.

use chrono::NaiveDate;

use super::{Database, DbResult, RecordStore};
use crate::models::{Appointment, AppointmentStatus};

impl Database {
    /// Appointments booked on `day`, ordered by start time.
    pub fn appointments_on(&self, day: NaiveDate) -> DbResult<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self
            .load_all::<Appointment>()?
            .into_iter()
            .filter(|a| a.is_on(day))
            .collect();
        appointments.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(appointments)
    }

    /// Set an appointment's status. Returns false if the id is unknown.
    pub fn set_appointment_status(&self, id: &str, status: AppointmentStatus) -> DbResult<bool> {
        let Some(mut appointment) = self.get_record::<Appointment>(id)? else {
            return Ok(false);
        };
        appointment.status = status;
        self.update_record(&appointment)
    }
}
