//! Work types and partner labs offered on the order form.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A kind of lab work with its usual price and turnaround.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkType {
    pub name: String,
    pub cost: f64,
    pub turnaround_days: u32,
}

impl WorkType {
    fn new(name: &str, cost: f64, turnaround_days: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            turnaround_days,
        }
    }

    /// Expected delivery for an order placed on `ordered`.
    pub fn expected_delivery(&self, ordered: NaiveDate) -> NaiveDate {
        ordered
            .checked_add_days(Days::new(self.turnaround_days.into()))
            .unwrap_or(ordered)
    }
}

/// An outside dental laboratory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerLab {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub specialties: Vec<String>,
}

impl PartnerLab {
    fn new(name: &str, address: &str, phone: &str, specialties: &[&str]) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn work_types() -> Vec<WorkType> {
    vec![
        WorkType::new("Crown (PFM)", 8000.0, 7),
        WorkType::new("Crown (Zirconia)", 15000.0, 10),
        WorkType::new("Crown (E-max)", 18000.0, 10),
        WorkType::new("Bridge (3-unit PFM)", 22000.0, 10),
        WorkType::new("Bridge (3-unit Zirconia)", 40000.0, 14),
        WorkType::new("Complete Denture", 15000.0, 14),
        WorkType::new("Partial Denture (Acrylic)", 12000.0, 10),
        WorkType::new("Partial Denture (Cast)", 20000.0, 14),
        WorkType::new("Orthodontic Retainer", 5000.0, 5),
        WorkType::new("Night Guard", 6000.0, 5),
        WorkType::new("Implant Crown", 20000.0, 10),
        WorkType::new("Temporary Crown", 2000.0, 1),
        WorkType::new("Maryland Bridge", 18000.0, 10),
        WorkType::new("Veneer (Composite)", 12000.0, 7),
        WorkType::new("Veneer (Porcelain)", 20000.0, 10),
    ]
}

/// Look up a work type by exact name.
pub fn find_work_type(name: &str) -> Option<WorkType> {
    work_types().into_iter().find(|w| w.name == name)
}

pub fn partner_labs() -> Vec<PartnerLab> {
    vec![
        PartnerLab::new(
            "Khyber Dental Laboratory",
            "Phase 5, Hayatabad",
            "091-5817700",
            &["Crowns", "Bridges", "Dentures", "Implants"],
        ),
        PartnerLab::new(
            "Peshawar Dental Lab",
            "Saddar Road",
            "091-2214455",
            &["Orthodontics", "Prosthetics", "Ceramics"],
        ),
        PartnerLab::new(
            "Modern Dental Laboratory",
            "University Road",
            "091-5703322",
            &["CAD/CAM", "Zirconia", "E-max"],
        ),
        PartnerLab::new(
            "Prime Dental Lab",
            "Hayatabad Phase 4",
            "091-5861234",
            &["Removable Prosthetics", "Orthodontic Appliances"],
        ),
        PartnerLab::new(
            "Quality Dental Laboratory",
            "Cantt Area",
            "091-2276688",
            &["All Types", "Express Service Available"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(work_types().len(), 15);
        assert_eq!(partner_labs().len(), 5);
    }

    #[test]
    fn test_expected_delivery() {
        let ordered = NaiveDate::from_ymd_opt(2026, 12, 28).unwrap();
        let temp = find_work_type("Temporary Crown").unwrap();
        assert_eq!(temp.expected_delivery(ordered), NaiveDate::from_ymd_opt(2026, 12, 29).unwrap());

        let bridge = find_work_type("Bridge (3-unit Zirconia)").unwrap();
        assert_eq!(bridge.cost, 40000.0);
        assert_eq!(bridge.expected_delivery(ordered), NaiveDate::from_ymd_opt(2027, 1, 11).unwrap());
    }

    #[test]
    fn test_unknown_work_type() {
        assert!(find_work_type("crown (pfm)").is_none());
    }
}
