//! Patient registry records and the alerts raised against them.

mod alert;
mod record;

pub use alert::{Alert, AlertDetails, AlertDraft, AlertKind, AlertLevel, HitlStatus};
pub use record::{
    HistoryEntry, IntakeSnapshot, LastScores, PatientProfile, PatientRecord, Speaker,
    DEFAULT_TIMEZONE,
};
