//! Treatment price list models.

use serde::{Deserialize, Serialize};

/// Treatment catalog category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, uniffi::Enum)]
pub enum TreatmentCategory {
    #[serde(rename = "General Dentistry")]
    GeneralDentistry,
    #[serde(rename = "Cosmetic Dentistry")]
    CosmeticDentistry,
    Orthodontics,
    #[serde(rename = "Oral Surgery")]
    OralSurgery,
    Endodontics,
    Periodontics,
    #[serde(rename = "Pediatric Dentistry")]
    PediatricDentistry,
    #[serde(rename = "Preventive Care")]
    PreventiveCare,
}

/// A single entry in the treatment price list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: String,
    pub name: String,
    pub category: TreatmentCategory,
    /// Price in rupees
    pub price: f64,
    /// Chair time in minutes
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

impl Treatment {
    pub fn new(name: String, category: TreatmentCategory, price: f64) -> Self {
        Self {
            id: super::generate_id("T"),
            name,
            category,
            price,
            duration: 30,
            description: String::new(),
        }
    }

    /// Case-insensitive match on name or description. An empty term matches.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Price list written the first time the treatments store is opened.
pub fn default_treatments() -> Vec<Treatment> {
    use TreatmentCategory::*;

    let rows: [(&str, &str, TreatmentCategory, f64, u32, &str); 10] = [
        ("T1", "Dental Checkup", PreventiveCare, 1000.0, 30, "Routine examination"),
        ("T2", "Teeth Cleaning", PreventiveCare, 2000.0, 45, "Professional scaling and polishing"),
        ("T3", "Tooth Filling", GeneralDentistry, 3000.0, 60, "Composite filling"),
        ("T4", "Root Canal Treatment", Endodontics, 15000.0, 90, "Single canal RCT"),
        ("T5", "Tooth Extraction", OralSurgery, 3000.0, 30, "Simple extraction"),
        ("T6", "Teeth Whitening", CosmeticDentistry, 20000.0, 60, "Professional bleaching"),
        ("T7", "Dental Crown", GeneralDentistry, 25000.0, 120, "Ceramic crown"),
        ("T8", "Dental Bridge", GeneralDentistry, 60000.0, 120, "3-unit bridge"),
        ("T9", "Braces Consultation", Orthodontics, 1500.0, 45, "Initial orthodontic assessment"),
        ("T10", "Gum Treatment", Periodontics, 5000.0, 60, "Deep cleaning"),
    ];

    rows.into_iter()
        .map(|(id, name, category, price, duration, description)| Treatment {
            id: id.into(),
            name: name.into(),
            category,
            price,
            duration,
            description: description.into(),
        })
        .collect()
}
