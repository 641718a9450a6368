//! Treatment check-ins: activity selection, reply classification, chat
//! sessions and their summaries.

mod activity;
mod chat_type;
mod chatbot;
mod classifier;
mod errors;
mod execution;
mod flow;
mod responder;
mod session;
mod summary;

pub use activity::{ActivityItem, ActivityKind, Frequency};
pub use chat_type::ChatType;
pub use chatbot::{ChatbotConfig, ChatbotStatus, ChatbotStatusReport, PatientChatbot};
pub use classifier::{
    Classification, ClassifierConfig, EngagementLevel, ReplyMetrics, ResponseClassifier, Sentiment,
};
pub use errors::CheckinError;
pub use execution::{
    ActivityCategory, IngestIssue, TreatmentExecution, DAILY_CHECK_IN_CATEGORIES,
    DAILY_CHECK_IN_LIMIT,
};
pub use flow::{ConversationFlow, ConversationFlows, OpeningContext};
pub use responder::{respond, Response, CLOSING_MESSAGE, MAX_FOLLOW_UPS};
pub use session::{ChatSession, ChatSessionOverview, ChatTurn, CompletedActivity, Interaction};
pub use summary::{
    engagement_score, recommendations, CompletedActivitySummary, SentimentTally, SessionMetrics,
    SessionSummary,
};
