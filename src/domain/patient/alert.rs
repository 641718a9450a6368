//! Clinician alerts raised by intake results.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AlertId, PatientId, Timestamp};
use crate::domain::intake::{Answers, IntakeSummary, Severity, SeverityLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    IntakeChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Medium,
    High,
}

/// Human-in-the-loop review state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitlStatus {
    #[default]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDetails {
    pub severity: Severity,
    pub answers: Answers,
}

/// An append-only alert record. Never mutated once logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub patient_id: PatientId,
    pub kind: AlertKind,
    pub level: AlertLevel,
    pub summary: String,
    pub details: AlertDetails,
    pub created_at: Timestamp,
    pub hitl_status: HitlStatus,
}

/// An alert not yet logged. The alert log assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDraft {
    pub patient_id: PatientId,
    pub level: AlertLevel,
    pub summary: String,
    pub details: AlertDetails,
    pub created_at: Timestamp,
}

impl AlertDraft {
    /// Drafts an alert for a completed intake, if its severity warrants one.
    pub fn from_intake(
        patient_id: PatientId,
        summary: &IntakeSummary,
        created_at: Timestamp,
    ) -> Option<Self> {
        let label = summary.severity.label;
        let level = match label {
            SeverityLabel::Mild => return None,
            SeverityLabel::Moderate => AlertLevel::Medium,
            SeverityLabel::Severe => AlertLevel::High,
        };

        Some(Self {
            patient_id,
            level,
            summary: format!("Intake suggests {} severity", label),
            details: AlertDetails {
                severity: summary.severity,
                answers: summary.answers.clone(),
            },
            created_at,
        })
    }

    pub fn assign(self, id: AlertId) -> Alert {
        Alert {
            id,
            patient_id: self.patient_id,
            kind: AlertKind::IntakeChange,
            level: self.level,
            summary: self.summary,
            details: self.details,
            created_at: self.created_at,
            hitl_status: HitlStatus::Pending,
        }
    }
}
