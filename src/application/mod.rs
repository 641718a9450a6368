//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate sessions through the stores' `update` closures;
//! query handlers only read.

pub mod handlers;

pub use handlers::checkin::{
    ChatHistoryHandler, ChatHistoryQuery, ChatHistoryResult, ChatbotStatusHandler,
    ChatbotStatusQuery, ChatbotStatusView, EndChatCommand, EndChatHandler, EndChatResult,
    InitializeChatbotCommand, InitializeChatbotHandler, InitializeChatbotResult,
    ReplaceTreatmentPlanCommand, ReplaceTreatmentPlanHandler, ReplaceTreatmentPlanResult,
    SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult, StartChatCommand,
    StartChatHandler, StartChatResult,
};
pub use handlers::intake::{
    GetIntakeStateHandler, GetIntakeStateQuery, GetPatientRecordHandler, GetPatientRecordQuery,
    ListAlertsHandler, ListAlertsQuery, ReplyIntakeCommand, ReplyIntakeHandler,
    ReplyIntakeResult, StartIntakeCommand, StartIntakeHandler, StartIntakeResult,
};
