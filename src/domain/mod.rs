//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, statuses, errors)
//! - `intake` - Question bank, answer parsing and intake sessions
//! - `patient` - Patient records and clinician alerts
//! - `checkin` - Treatment chatbots, activity selection and chat sessions

pub mod checkin;
pub mod foundation;
pub mod intake;
pub mod patient;
