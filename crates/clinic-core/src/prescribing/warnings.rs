//! Safety warnings raised for a patient and diagnosis.

use super::DiagnosisCode;
use crate::models::{Gender, Patient};

/// One warning rule. Rules are independent and evaluated in table order.
pub struct WarningRule {
    pub applies: fn(Option<&Patient>, Option<DiagnosisCode>) -> bool,
    pub message: &'static str,
}

pub const PREGNANCY_WARNING: &str =
    "⚠️ PREGNANCY: Avoid Metronidazole in first trimester. Consult regarding Ibuprofen.";
pub const PENICILLIN_WARNING: &str =
    "⚠️ ALLERGY: Patient allergic to Penicillin. Avoid Amoxicillin. Use Azithromycin instead.";
pub const PEDIATRIC_WARNING: &str =
    "⚠️ PEDIATRIC: Adjust dosages for child weight. Avoid Metronidazole under 12 years.";
pub const ELDERLY_WARNING: &str =
    "⚠️ ELDERLY: Consider reduced dosages. Monitor renal function.";
pub const SEVERE_INFECTION_WARNING: &str =
    "⚠️ SEVERE INFECTION: Monitor patient closely. Consider hospitalization if spreading.";
pub const CONTROLLED_DRUG_WARNING: &str =
    "⚠️ CONTROLLED DRUG: Diazepam is habit-forming. Short-term use only.";

fn pregnant(p: Option<&Patient>, _: Option<DiagnosisCode>) -> bool {
    p.is_some_and(|p| p.gender == Gender::Female && p.history_mentions("pregnant"))
}

fn penicillin_allergy(p: Option<&Patient>, _: Option<DiagnosisCode>) -> bool {
    p.is_some_and(|p| p.history_mentions("penicillin allergy"))
}

fn pediatric(p: Option<&Patient>, _: Option<DiagnosisCode>) -> bool {
    p.is_some_and(|p| p.age < 12)
}

fn elderly(p: Option<&Patient>, _: Option<DiagnosisCode>) -> bool {
    p.is_some_and(|p| p.age > 65)
}

fn severe_infection(_: Option<&Patient>, d: Option<DiagnosisCode>) -> bool {
    matches!(d, Some(DiagnosisCode::Abscess | DiagnosisCode::Cellulitis))
}

fn controlled_drug(_: Option<&Patient>, d: Option<DiagnosisCode>) -> bool {
    d == Some(DiagnosisCode::Tmj)
}

pub const WARNING_RULES: &[WarningRule] = &[
    WarningRule { applies: pregnant, message: PREGNANCY_WARNING },
    WarningRule { applies: penicillin_allergy, message: PENICILLIN_WARNING },
    WarningRule { applies: pediatric, message: PEDIATRIC_WARNING },
    WarningRule { applies: elderly, message: ELDERLY_WARNING },
    WarningRule { applies: severe_infection, message: SEVERE_INFECTION_WARNING },
    WarningRule { applies: controlled_drug, message: CONTROLLED_DRUG_WARNING },
];

/// Warnings for the current selection, in rule order.
pub fn warnings_for(patient: Option<&Patient>, diagnosis: Option<DiagnosisCode>) -> Vec<String> {
    WARNING_RULES
        .iter()
        .filter(|rule| (rule.applies)(patient, diagnosis))
        .map(|rule| rule.message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient(age: u32, gender: Gender, history: &str) -> Patient {
        let mut p = Patient::new(
            "Test".into(),
            age,
            gender,
            "0300".into(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        p.medical_history = history.into();
        p
    }

    #[test]
    fn test_abscess_warning_verbatim() {
        let warnings = warnings_for(None, Some(DiagnosisCode::Abscess));
        assert_eq!(
            warnings,
            vec!["⚠️ SEVERE INFECTION: Monitor patient closely. Consider hospitalization if spreading."]
        );
    }

    #[test]
    fn test_elderly_penicillin_abscess() {
        let p = patient(70, Gender::Female, "Penicillin Allergy");
        let warnings = warnings_for(Some(&p), Some(DiagnosisCode::Abscess));
        assert_eq!(
            warnings,
            vec![PENICILLIN_WARNING, ELDERLY_WARNING, SEVERE_INFECTION_WARNING]
        );
    }

    #[test]
    fn test_pregnancy_needs_female() {
        let male = patient(30, Gender::Male, "wife is pregnant");
        assert!(warnings_for(Some(&male), None).is_empty());

        let female = patient(30, Gender::Female, "PREGNANT, 2nd trimester");
        assert_eq!(warnings_for(Some(&female), None), vec![PREGNANCY_WARNING]);
    }

    #[test]
    fn test_age_boundaries() {
        assert!(warnings_for(Some(&patient(12, Gender::Other, "")), None).is_empty());
        assert!(warnings_for(Some(&patient(65, Gender::Other, "")), None).is_empty());
        assert_eq!(warnings_for(Some(&patient(11, Gender::Other, "")), None), vec![PEDIATRIC_WARNING]);
        assert_eq!(warnings_for(Some(&patient(66, Gender::Other, "")), None), vec![ELDERLY_WARNING]);
    }

    #[test]
    fn test_tmj_controlled_drug() {
        assert_eq!(warnings_for(None, Some(DiagnosisCode::Tmj)), vec![CONTROLLED_DRUG_WARNING]);
        assert!(warnings_for(None, Some(DiagnosisCode::Caries)).is_empty());
    }
}
