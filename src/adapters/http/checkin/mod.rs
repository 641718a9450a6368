//! HTTP adapter for chatbot and check-in endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatHistoryParams, ChatHistoryResponse, ChatMessageRequest, ChatMessageResponse,
    ChatbotStatusResponse, EndChatRequest, EndChatResponse, InitializeChatbotRequest,
    InitializeChatbotResponse, ReplacePlanRequest, ReplacePlanResponse, StartChatRequest,
    StartChatResponse,
};
pub use handlers::CheckinHandlers;
pub use routes::checkin_routes;
