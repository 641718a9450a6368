//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! `app` wires them into a single router.

mod app;
pub mod checkin;
pub mod error;
pub mod intake;

pub use app::{build_router, in_memory_router, Stores};
pub use checkin::{checkin_routes, CheckinHandlers};
pub use error::ErrorResponse;
pub use intake::{intake_routes, IntakeHandlers};
