//! Diagnosis codes and their default medication templates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Medication;

/// Case complexity shown next to each diagnosis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Standard,
    Complex,
}

/// Diagnoses offered on the prescription form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosisCode {
    Caries,
    Gingivitis,
    Periodontitis,
    Pulpitis,
    Abscess,
    DrySocket,
    Toothache,
    Sensitivity,
    PostExtraction,
    #[serde(rename = "postRCT")]
    PostRct,
    Aphthous,
    Candidiasis,
    Herpes,
    Tmj,
    Bruxism,
    Pericoronitis,
    Cellulitis,
    Impacted,
    Trauma,
    Xerostomia,
}

impl DiagnosisCode {
    pub const ALL: [DiagnosisCode; 20] = [
        DiagnosisCode::Caries,
        DiagnosisCode::Gingivitis,
        DiagnosisCode::Periodontitis,
        DiagnosisCode::Pulpitis,
        DiagnosisCode::Abscess,
        DiagnosisCode::DrySocket,
        DiagnosisCode::Toothache,
        DiagnosisCode::Sensitivity,
        DiagnosisCode::PostExtraction,
        DiagnosisCode::PostRct,
        DiagnosisCode::Aphthous,
        DiagnosisCode::Candidiasis,
        DiagnosisCode::Herpes,
        DiagnosisCode::Tmj,
        DiagnosisCode::Bruxism,
        DiagnosisCode::Pericoronitis,
        DiagnosisCode::Cellulitis,
        DiagnosisCode::Impacted,
        DiagnosisCode::Trauma,
        DiagnosisCode::Xerostomia,
    ];

    /// Stable identifier, e.g. `drySocket`.
    pub fn id(&self) -> &'static str {
        match self {
            DiagnosisCode::Caries => "caries",
            DiagnosisCode::Gingivitis => "gingivitis",
            DiagnosisCode::Periodontitis => "periodontitis",
            DiagnosisCode::Pulpitis => "pulpitis",
            DiagnosisCode::Abscess => "abscess",
            DiagnosisCode::DrySocket => "drySocket",
            DiagnosisCode::Toothache => "toothache",
            DiagnosisCode::Sensitivity => "sensitivity",
            DiagnosisCode::PostExtraction => "postExtraction",
            DiagnosisCode::PostRct => "postRCT",
            DiagnosisCode::Aphthous => "aphthous",
            DiagnosisCode::Candidiasis => "candidiasis",
            DiagnosisCode::Herpes => "herpes",
            DiagnosisCode::Tmj => "tmj",
            DiagnosisCode::Bruxism => "bruxism",
            DiagnosisCode::Pericoronitis => "pericoronitis",
            DiagnosisCode::Cellulitis => "cellulitis",
            DiagnosisCode::Impacted => "impacted",
            DiagnosisCode::Trauma => "trauma",
            DiagnosisCode::Xerostomia => "xerostomia",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Display label stored on the prescription.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosisCode::Caries => "Dental Caries",
            DiagnosisCode::Gingivitis => "Gingivitis",
            DiagnosisCode::Periodontitis => "Periodontitis",
            DiagnosisCode::Pulpitis => "Pulpitis (Acute)",
            DiagnosisCode::Abscess => "Dental Abscess",
            DiagnosisCode::DrySocket => "Dry Socket (Alveolar Osteitis)",
            DiagnosisCode::Toothache => "Toothache",
            DiagnosisCode::Sensitivity => "Tooth Sensitivity",
            DiagnosisCode::PostExtraction => "Post-Extraction Care",
            DiagnosisCode::PostRct => "Post-RCT Care",
            DiagnosisCode::Aphthous => "Aphthous Ulcers",
            DiagnosisCode::Candidiasis => "Oral Candidiasis",
            DiagnosisCode::Herpes => "Herpes Labialis",
            DiagnosisCode::Tmj => "TMJ Disorder",
            DiagnosisCode::Bruxism => "Bruxism",
            DiagnosisCode::Pericoronitis => "Pericoronitis",
            DiagnosisCode::Cellulitis => "Facial Cellulitis",
            DiagnosisCode::Impacted => "Impacted Wisdom Tooth",
            DiagnosisCode::Trauma => "Dental Trauma",
            DiagnosisCode::Xerostomia => "Xerostomia (Dry Mouth)",
        }
    }

    pub fn tier(&self) -> Tier {
        use DiagnosisCode::*;
        match self {
            Abscess | Tmj | Cellulitis | Trauma => Tier::Complex,
            Caries | Gingivitis | Toothache | Sensitivity | PostExtraction | Aphthous
            | Xerostomia => Tier::Basic,
            _ => Tier::Standard,
        }
    }
}

/// Medication templates keyed by diagnosis.
pub struct Formulary {
    templates: HashMap<DiagnosisCode, Vec<Medication>>,
}

impl Default for Formulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Formulary {
    /// Create a formulary with the clinic's standard regimens.
    pub fn new() -> Self {
        Self {
            templates: Self::default_templates(),
        }
    }

    /// Template for a diagnosis, in prescribing order. Diagnoses without a
    /// regimen get an empty list.
    pub fn templates_for(&self, code: DiagnosisCode) -> Vec<Medication> {
        self.templates.get(&code).cloned().unwrap_or_default()
    }

    /// Replace the regimen for a diagnosis.
    pub fn set_template(&mut self, code: DiagnosisCode, medications: Vec<Medication>) {
        self.templates.insert(code, medications);
    }

    fn default_templates() -> HashMap<DiagnosisCode, Vec<Medication>> {
        use DiagnosisCode::*;
        let m = Medication::new;
        let mut map = HashMap::new();

        map.insert(
            Caries,
            vec![
                m("Ibuprofen 400mg", "400mg", "TID", "3 days", "Take after meals"),
                m("Paracetamol 500mg", "500mg", "TID", "3 days", "Take with water"),
            ],
        );
        map.insert(
            Gingivitis,
            vec![
                m("Chlorhexidine 0.2% Mouthwash", "10ml", "BID", "7 days", "Rinse for 30 seconds, do not swallow"),
                m("Metronidazole 400mg", "400mg", "TID", "5 days", "Take after meals"),
            ],
        );
        map.insert(
            Periodontitis,
            vec![
                m("Amoxicillin 500mg", "500mg", "TID", "7 days", "Complete full course"),
                m("Metronidazole 400mg", "400mg", "TID", "7 days", "Avoid alcohol"),
                m("Ibuprofen 400mg", "400mg", "TID", "5 days", "Take with food"),
                m("Chlorhexidine 0.2% Mouthwash", "10ml", "BID", "14 days", "Use after brushing"),
            ],
        );
        map.insert(
            Pulpitis,
            vec![
                m("Ibuprofen 400mg", "400mg", "QID", "5 days", "Take every 6 hours with food"),
                m("Paracetamol 500mg", "500mg", "QID", "5 days", "Can alternate with ibuprofen"),
            ],
        );
        map.insert(
            Abscess,
            vec![
                m("Amoxicillin 500mg + Clavulanic Acid 125mg", "625mg", "TID", "7 days", "Complete full course"),
                m("Metronidazole 400mg", "400mg", "TID", "7 days", "Avoid alcohol completely"),
                m("Ibuprofen 600mg", "600mg", "TID", "5 days", "Take with food"),
                m("Chlorhexidine 0.2% Mouthwash", "10ml", "TID", "7 days", "Rinse gently"),
            ],
        );
        map.insert(
            DrySocket,
            vec![
                m("Ibuprofen 600mg", "600mg", "TID", "5 days", "Take with meals"),
                m("Tramadol 50mg", "50mg", "BID", "3 days", "If severe pain persists"),
                m("Chlorhexidine 0.12% Gel", "Apply", "TID", "7 days", "Apply to socket after meals"),
            ],
        );
        map.insert(
            PostExtraction,
            vec![
                m("Ibuprofen 400mg", "400mg", "TID", "3 days", "Start immediately after extraction"),
                m("Amoxicillin 500mg", "500mg", "TID", "5 days", "If high infection risk"),
                m("Chlorhexidine 0.2% Mouthwash", "10ml", "BID", "7 days", "Start 24 hours post-extraction"),
            ],
        );
        map.insert(
            PostRct,
            vec![
                m("Ibuprofen 400mg", "400mg", "TID", "3 days", "For post-operative discomfort"),
                m("Amoxicillin 500mg", "500mg", "TID", "5 days", "If periapical infection present"),
            ],
        );
        map.insert(
            Aphthous,
            vec![
                m("Triamcinolone Acetonide 0.1% Oral Paste", "Apply", "TID", "5 days", "Apply thin layer to ulcers"),
                m("Benzydamine HCl 0.15% Mouthwash", "15ml", "TID", "7 days", "Rinse and spit"),
                m("Vitamin B Complex", "1 tab", "OD", "30 days", "Take after breakfast"),
            ],
        );
        map.insert(
            Candidiasis,
            vec![
                m("Fluconazole 150mg", "150mg", "Once weekly", "2 weeks", "Take on same day each week"),
                m("Nystatin Oral Suspension", "5ml", "QID", "14 days", "Swish and swallow"),
                m("Chlorhexidine 0.2% Mouthwash", "10ml", "BID", "14 days", "For oral hygiene"),
            ],
        );
        map.insert(
            Herpes,
            vec![
                m("Acyclovir 400mg", "400mg", "TID", "5 days", "Start at first sign of outbreak"),
                m("Acyclovir 5% Cream", "Apply", "5 times/day", "5 days", "Apply to lesions"),
            ],
        );
        map.insert(
            Tmj,
            vec![
                m("Ibuprofen 400mg", "400mg", "TID", "7 days", "Take with food"),
                m("Diazepam 5mg", "5mg", "At bedtime", "5 days", "For muscle relaxation"),
                m("Hot/Cold Compress", "Apply", "TID", "14 days", "15 min each session"),
            ],
        );
        map.insert(
            Pericoronitis,
            vec![
                m("Amoxicillin 500mg", "500mg", "TID", "7 days", "Complete course"),
                m("Metronidazole 400mg", "400mg", "TID", "5 days", "Avoid alcohol"),
                m("Ibuprofen 400mg", "400mg", "TID", "5 days", "For pain and swelling"),
                m("Chlorhexidine 0.2% Mouthwash", "10ml", "TID", "7 days", "Gentle rinsing"),
            ],
        );
        map.insert(
            Cellulitis,
            vec![
                m("Amoxicillin 875mg + Clavulanic Acid 125mg", "1000mg", "BID", "10 days", "Urgent - complete course"),
                m("Metronidazole 500mg", "500mg", "TID", "7 days", "Strict no alcohol"),
                m("Ibuprofen 600mg", "600mg", "TID", "7 days", "For inflammation"),
            ],
        );

        map
    }
}
