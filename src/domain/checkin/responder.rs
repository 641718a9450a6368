//! Canned assistant replies for check-in turns.

use super::activity::{ActivityItem, ActivityKind};
use super::classifier::{Classification, Sentiment};

/// Follow-up questions offered per reply.
pub const MAX_FOLLOW_UPS: usize = 2;

pub const CLOSING_MESSAGE: &str =
    "Great job! We've covered everything for today. Is there anything else you'd like to discuss?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub follow_up_questions: Vec<String>,
    pub next_steps: Vec<String>,
}

impl Response {
    /// Reply once every selected activity has been covered.
    pub fn closing() -> Self {
        Self {
            message: CLOSING_MESSAGE.to_string(),
            follow_up_questions: Vec::new(),
            next_steps: steps(&["End conversation", "Review progress"]),
        }
    }
}

/// Builds the assistant's reply to a classified patient message.
pub fn respond(activity: &ActivityItem, classification: &Classification) -> Response {
    let title = activity.title.as_str();

    let message = match classification.sentiment {
        Sentiment::Positive => format!(
            "That's wonderful! I'm glad to hear about your progress with {}. Let me know if you need any help with the next step.",
            title
        ),
        Sentiment::Negative => {
            let mut message = format!(
                "I understand that {} has been challenging. Let's talk about what specific difficulties you're experiencing.",
                title
            );
            if let Some(probe) = difficulty_probe(activity.kind) {
                message.push(' ');
                message.push_str(probe);
            }
            message
        }
        Sentiment::Neutral => match activity.chat_prompts.as_slice() {
            [] => format!("Thank you for sharing. Can you tell me more about {}?", title),
            [only] => format!("Thank you for sharing. {}", only),
            [_, second, ..] => format!("Thank you for sharing. {}", second),
        },
    };

    let next_steps = if classification.activity_completed {
        steps(&["Move to next activity", "Continue check-in"])
    } else if classification.needs_follow_up {
        steps(&["Discuss challenges", "Adjust activity", "Provide support"])
    } else {
        steps(&["Continue discussion", "Clarify activity"])
    };

    Response {
        message,
        follow_up_questions: activity
            .follow_up_questions
            .iter()
            .take(MAX_FOLLOW_UPS)
            .cloned()
            .collect(),
        next_steps,
    }
}

fn difficulty_probe(kind: ActivityKind) -> Option<&'static str> {
    match kind {
        ActivityKind::Medication => {
            Some("Are you experiencing side effects, or is it difficult to remember?")
        }
        ActivityKind::PhysicalActivity => Some("What's making the exercise difficult for you?"),
        ActivityKind::Nutrition => Some("What challenges are you facing with your diet?"),
        ActivityKind::Sleep => Some("What's getting in the way of a good night's rest?"),
        _ => None,
    }
}

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
