//! HTTP adapter for intake endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AlertListResponse, IntakeStateQuery, IntakeStateResponse, ListAlertsParams,
    ReplyIntakeRequest, ReplyIntakeResponse, StartIntakeResponse,
};
pub use handlers::IntakeHandlers;
pub use routes::intake_routes;
