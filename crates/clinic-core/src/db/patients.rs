//! Patient database operations.

use super::{Database, DbResult, RecordStore};
use crate::models::Patient;

/// Minimum Jaro-Winkler similarity for a fuzzy name hit.
pub const FUZZY_NAME_THRESHOLD: f64 = 0.85;

impl Database {
    /// Register a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.insert_record(patient.clone())
    }

    /// Update an existing patient. Past prescriptions keep their snapshots.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        self.update_record(patient)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.get_record(id)
    }

    /// List all patients in registration order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        self.load_all()
    }

    /// Delete a patient. Appointments, bills and orders referring to the
    /// patient are left in place.
    pub fn delete_patient(&self, id: &str) -> DbResult<bool> {
        self.delete_record::<Patient>(id)
    }

    /// Search patients by name, id or phone.
    ///
    /// Substring hits come first in registration order, followed by names
    /// that are close to the query (typos, transliteration variants).
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let patients = self.list_patients()?;
        Ok(rank_patients(patients, query, limit))
    }
}

/// Rank patients against a search term.
pub fn rank_patients(patients: Vec<Patient>, query: &str, limit: usize) -> Vec<Patient> {
    let query = query.trim();
    if query.is_empty() {
        return patients.into_iter().take(limit).collect();
    }

    let lower = query.to_lowercase();
    let (mut exact, rest): (Vec<Patient>, Vec<Patient>) =
        patients.into_iter().partition(|p| p.matches_term(query));

    let mut fuzzy: Vec<(f64, Patient)> = rest
        .into_iter()
        .filter_map(|p| {
            let score = name_similarity(&p.name, &lower);
            (score >= FUZZY_NAME_THRESHOLD).then_some((score, p))
        })
        .collect();
    fuzzy.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    exact.extend(fuzzy.into_iter().map(|(_, p)| p));
    exact.truncate(limit);
    exact
}

/// Best similarity between the query and the full name or any of its parts.
fn name_similarity(name: &str, lower_query: &str) -> f64 {
    let lower_name = name.to_lowercase();
    std::iter::once(lower_name.as_str())
        .chain(lower_name.split_whitespace())
        .map(|part| strsim::jaro_winkler(part, lower_query))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn patient(name: &str, phone: &str) -> Patient {
        Patient::new(
            name.into(),
            30,
            Gender::Other,
            phone.into(),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut p = patient("Fatima Noor", "0300-5551234");
        p.medical_history = "Penicillin allergy".into();
        db.insert_patient(&p).unwrap();

        let retrieved = db.get_patient(&p.id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Fatima Noor");
        assert_eq!(retrieved.medical_history, "Penicillin allergy");
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        let mut p = patient("Usman", "0345-1111111");
        db.insert_patient(&p).unwrap();

        p.age = 31;
        p.address = "University Road".into();
        assert!(db.update_patient(&p).unwrap());

        let retrieved = db.get_patient(&p.id).unwrap().unwrap();
        assert_eq!(retrieved.age, 31);
        assert_eq!(retrieved.address, "University Road");
    }

    #[test]
    fn test_search_patients() {
        let db = setup_db();

        db.insert_patient(&patient("Muhammad Ali", "0300-1000001")).unwrap();
        db.insert_patient(&patient("Ali Raza", "0300-1000002")).unwrap();
        db.insert_patient(&patient("Sana Iqbal", "0311-2000003")).unwrap();

        let results = db.search_patients("ali", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.name.contains("Ali")));

        let by_phone = db.search_patients("2000003", 10).unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Sana Iqbal");
    }

    #[test]
    fn test_fuzzy_name_after_exact() {
        let db = setup_db();

        db.insert_patient(&patient("Mohammad Khan", "1")).unwrap();
        db.insert_patient(&patient("Muhammad Khan", "2")).unwrap();

        let results = db.search_patients("muhammad", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Muhammad Khan");
        assert_eq!(results[1].name, "Mohammad Khan");
    }

    #[test]
    fn test_delete_does_not_cascade() {
        use crate::models::{Appointment, AppointmentType};

        let db = setup_db();
        let p = patient("Zainab", "0300-0000000");
        db.insert_patient(&p).unwrap();

        let appt = Appointment::new(
            p.id.clone(),
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            "09:00".into(),
            AppointmentType::CheckUp,
        );
        db.insert_record(appt.clone()).unwrap();

        assert!(db.delete_patient(&p.id).unwrap());
        assert!(db.get_patient(&p.id).unwrap().is_none());

        let remaining: Option<Appointment> = db.get_record(&appt.id).unwrap();
        assert!(remaining.is_some());
    }
}
