//! Severity heuristic over a completed intake.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value::Answers;

/// MMSE assumed when the patient skipped the question.
pub const DEFAULT_MMSE: f64 = 0.0;

/// ADL assumed when the patient skipped the question.
pub const DEFAULT_ADL: f64 = 100.0;

const MILD_MMSE_FLOOR: f64 = 24.0;
const MODERATE_MMSE_FLOOR: f64 = 10.0;
const LOW_ADL_CEILING: f64 = 50.0;
const LOW_ADL_PENALTY: f64 = 0.1;

/// Coarse cognitive risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLabel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLabel {
    fn base_score(self) -> f64 {
        match self {
            SeverityLabel::Mild => 0.2,
            SeverityLabel::Moderate => 0.6,
            SeverityLabel::Severe => 0.9,
        }
    }

    /// Moderate and severe results are escalated to a clinician.
    pub fn raises_alert(self) -> bool {
        self >= SeverityLabel::Moderate
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeverityLabel::Mild => "mild",
            SeverityLabel::Moderate => "moderate",
            SeverityLabel::Severe => "severe",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Severity {
    #[serde(rename = "severity_label")]
    pub label: SeverityLabel,
    #[serde(rename = "severity_score")]
    pub score: f64,
}

impl Severity {
    /// Scores a completed intake from its MMSE and ADL answers.
    pub fn infer(answers: &Answers) -> Self {
        let mmse = answers.number("MMSE").unwrap_or(DEFAULT_MMSE);
        let adl = answers.number("ADL").unwrap_or(DEFAULT_ADL);
        Self::from_scores(mmse, adl)
    }

    pub fn from_scores(mmse: f64, adl: f64) -> Self {
        let label = if mmse >= MILD_MMSE_FLOOR {
            SeverityLabel::Mild
        } else if mmse >= MODERATE_MMSE_FLOOR {
            SeverityLabel::Moderate
        } else {
            SeverityLabel::Severe
        };

        let mut score = label.base_score();
        if adl < LOW_ADL_CEILING {
            score += LOW_ADL_PENALTY;
        }
        let score = (score.min(1.0) * 100.0).round() / 100.0;

        Self { label, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::value::FieldValue;
    use proptest::prelude::*;

    #[test]
    fn thresholds_map_to_labels() {
        assert_eq!(Severity::from_scores(30.0, 100.0).label, SeverityLabel::Mild);
        assert_eq!(Severity::from_scores(24.0, 100.0).label, SeverityLabel::Mild);
        assert_eq!(Severity::from_scores(23.0, 100.0).label, SeverityLabel::Moderate);
        assert_eq!(Severity::from_scores(10.0, 100.0).label, SeverityLabel::Moderate);
        assert_eq!(Severity::from_scores(9.0, 100.0).label, SeverityLabel::Severe);
    }

    #[test]
    fn low_adl_adds_penalty() {
        assert_eq!(Severity::from_scores(28.0, 40.0).score, 0.3);
        assert_eq!(Severity::from_scores(15.0, 49.0).score, 0.7);
        assert_eq!(Severity::from_scores(15.0, 50.0).score, 0.6);
    }

    #[test]
    fn score_is_capped_at_one() {
        let severity = Severity::from_scores(3.0, 10.0);
        assert_eq!(severity.label, SeverityLabel::Severe);
        assert_eq!(severity.score, 1.0);
    }

    #[test]
    fn missing_answers_use_defaults() {
        let answers = Answers::new();
        let severity = Severity::infer(&answers);

        assert_eq!(severity.label, SeverityLabel::Severe);
        assert_eq!(severity.score, 0.9);
    }

    #[test]
    fn skipped_adl_counts_as_independent() {
        let mut answers = Answers::new();
        answers.insert("MMSE", Some(FieldValue::Number(8.0)));
        answers.insert("ADL", None);

        assert_eq!(Severity::infer(&answers).score, 0.9);
    }

    #[test]
    fn serializes_with_dataset_field_names() {
        let json = serde_json::to_value(Severity::from_scores(15.0, 100.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"severity_label": "moderate", "severity_score": 0.6})
        );
    }

    #[test]
    fn only_moderate_and_severe_raise_alerts() {
        assert!(!SeverityLabel::Mild.raises_alert());
        assert!(SeverityLabel::Moderate.raises_alert());
        assert!(SeverityLabel::Severe.raises_alert());
    }

    proptest! {
        #[test]
        fn lower_mmse_never_lowers_severity(a in 0u32..=30, b in 0u32..=30, adl in 0u32..=100) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let worse = Severity::from_scores(low as f64, adl as f64);
            let better = Severity::from_scores(high as f64, adl as f64);
            prop_assert!(worse.label >= better.label);
            prop_assert!(worse.score >= better.score);
        }

        #[test]
        fn score_stays_in_unit_interval(mmse in -10.0f64..40.0, adl in -10.0f64..120.0) {
            let severity = Severity::from_scores(mmse, adl);
            prop_assert!(severity.score > 0.0 && severity.score <= 1.0);
        }
    }
}
