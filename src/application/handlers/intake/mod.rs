//! Intake command and query handlers.
//!
//! Also hosts the read side of what intake produces: patient records and
//! the alert log.

mod get_intake_state;
mod get_patient_record;
mod list_alerts;
mod reply_intake;
mod start_intake;

pub use get_intake_state::{GetIntakeStateHandler, GetIntakeStateQuery};
pub use get_patient_record::{GetPatientRecordHandler, GetPatientRecordQuery};
pub use list_alerts::{ListAlertsHandler, ListAlertsQuery};
pub use reply_intake::{ReplyIntakeCommand, ReplyIntakeHandler, ReplyIntakeResult};
pub use start_intake::{StartIntakeCommand, StartIntakeHandler, StartIntakeResult};
