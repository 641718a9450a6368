//! Check-in chat session aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatSessionId, ChatSessionStatus, PatientId, Timestamp};

use super::activity::ActivityItem;
use super::chat_type::ChatType;
use super::classifier::{Classification, ReplyMetrics, ResponseClassifier};
use super::errors::CheckinError;
use super::responder::{respond, Response};
use super::summary::SessionSummary;

/// Record of an activity the patient reported as done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedActivity {
    pub activity_id: String,
    pub activity_title: String,
    pub completion_time: Timestamp,
    pub patient_response: String,
    pub metrics: ReplyMetrics,
}

/// One patient message and the assistant's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub timestamp: Timestamp,
    pub activity_id: String,
    pub patient_message: String,
    pub chatbot_response: String,
    pub response_analysis: Classification,
}

/// Outcome of one patient message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub message: String,
    pub activity_completed: bool,
    pub conversation_complete: bool,
    pub follow_up_questions: Vec<String>,
    pub next_steps: Vec<String>,
    /// True when this message moved the session past an activity.
    pub advanced: bool,
}

impl ChatTurn {
    fn closing() -> Self {
        let Response {
            message,
            follow_up_questions,
            next_steps,
        } = Response::closing();
        Self {
            message,
            activity_completed: true,
            conversation_complete: true,
            follow_up_questions,
            next_steps,
            advanced: false,
        }
    }
}

/// Condensed view used for chat history listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSessionOverview {
    pub session_id: ChatSessionId,
    pub chat_type: ChatType,
    pub created_at: Timestamp,
    pub status: ChatSessionStatus,
    pub completed_activities_count: usize,
    pub total_interactions: usize,
    pub summary: Option<SessionSummary>,
}

/// A check-in conversation.
///
/// # Invariants
///
/// - `current_activity_index` only grows, one step per completed activity
/// - once `Completed`, the session accepts no more messages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSession {
    id: ChatSessionId,
    patient_id: PatientId,
    chat_type: ChatType,
    created_at: Timestamp,
    current_activity_index: usize,
    completed_activities: Vec<CompletedActivity>,
    interactions: Vec<Interaction>,
    conversation_turns: u32,
    last_activity_time: Timestamp,
    status: ChatSessionStatus,
    ended_at: Option<Timestamp>,
    summary: Option<SessionSummary>,
}

impl ChatSession {
    pub fn new(id: ChatSessionId, patient_id: PatientId, chat_type: ChatType) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            patient_id,
            chat_type,
            created_at: now,
            current_activity_index: 0,
            completed_activities: Vec::new(),
            interactions: Vec::new(),
            conversation_turns: 0,
            last_activity_time: now,
            status: ChatSessionStatus::Active,
            ended_at: None,
            summary: None,
        }
    }

    pub fn id(&self) -> ChatSessionId {
        self.id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn chat_type(&self) -> &ChatType {
        &self.chat_type
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn current_activity_index(&self) -> usize {
        self.current_activity_index
    }

    pub fn completed_activities(&self) -> &[CompletedActivity] {
        &self.completed_activities
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn conversation_turns(&self) -> u32 {
        self.conversation_turns
    }

    pub fn last_activity_time(&self) -> Timestamp {
        self.last_activity_time
    }

    pub fn status(&self) -> ChatSessionStatus {
        self.status
    }

    pub fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Handles one patient message against the current activity.
    ///
    /// `activities` is the selection for this session's chat type, taken
    /// from the chatbot's current treatment execution.
    pub fn send_message(
        &mut self,
        activities: &[ActivityItem],
        classifier: &ResponseClassifier,
        text: &str,
    ) -> Result<ChatTurn, CheckinError> {
        if !self.status.is_open() {
            return Err(CheckinError::session_completed(self.id));
        }

        let Some(activity) = activities.get(self.current_activity_index) else {
            return Ok(ChatTurn::closing());
        };

        let classification = classifier.classify(text);
        let response = respond(activity, &classification);
        let now = Timestamp::now();

        if classification.activity_completed {
            self.completed_activities.push(CompletedActivity {
                activity_id: activity.id.clone(),
                activity_title: activity.title.clone(),
                completion_time: now,
                patient_response: text.to_string(),
                metrics: classification.metrics,
            });
            self.current_activity_index += 1;
        }

        self.interactions.push(Interaction {
            timestamp: now,
            activity_id: activity.id.clone(),
            patient_message: text.to_string(),
            chatbot_response: response.message.clone(),
            response_analysis: classification,
        });
        self.conversation_turns += 1;
        self.last_activity_time = now;

        Ok(ChatTurn {
            message: response.message,
            activity_completed: classification.activity_completed,
            conversation_complete: self.current_activity_index >= activities.len(),
            follow_up_questions: response.follow_up_questions,
            next_steps: response.next_steps,
            advanced: classification.activity_completed,
        })
    }

    /// Ends the session and returns its summary.
    ///
    /// The summary is computed once; later calls return the stored copy.
    pub fn end(&mut self) -> SessionSummary {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }

        let summary = SessionSummary::for_session(self);
        self.status = ChatSessionStatus::Completed;
        self.ended_at = Some(Timestamp::now());
        self.summary = Some(summary.clone());
        summary
    }

    pub fn overview(&self) -> ChatSessionOverview {
        ChatSessionOverview {
            session_id: self.id,
            chat_type: self.chat_type.clone(),
            created_at: self.created_at,
            status: self.status,
            completed_activities_count: self.completed_activities.len(),
            total_interactions: self.interactions.len(),
            summary: self.summary.clone(),
        }
    }
}
