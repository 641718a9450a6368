//! End-of-session summary and recommendations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatSessionId, Timestamp};

use super::chat_type::ChatType;
use super::classifier::{EngagementLevel, ReplyMetrics, Sentiment};
use super::session::{ChatSession, Interaction};

/// Fewer completions than this suggests the session asked too much.
const LOW_COMPLETION_THRESHOLD: usize = 3;

/// More negative replies than this warrants caregiver follow-up.
const NEGATIVE_REPLY_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTally {
    pub fn from_interactions(interactions: &[Interaction]) -> Self {
        interactions.iter().fold(Self::default(), |mut tally, i| {
            match i.response_analysis.sentiment {
                Sentiment::Positive => tally.positive += 1,
                Sentiment::Negative => tally.negative += 1,
                Sentiment::Neutral => tally.neutral += 1,
            }
            tally
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedActivitySummary {
    pub title: String,
    pub completion_time: Timestamp,
    pub metrics: ReplyMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: ChatSessionId,
    pub chat_type: ChatType,
    pub duration_minutes: f64,
    pub total_activities: usize,
    pub total_interactions: usize,
    pub sentiment_summary: SentimentTally,
    pub completed_activities: Vec<CompletedActivitySummary>,
    pub overall_engagement: EngagementLevel,
    pub recommendations: Vec<String>,
}

impl SessionSummary {
    pub fn for_session(session: &ChatSession) -> Self {
        let interactions = session.interactions();
        let sentiment_summary = SentimentTally::from_interactions(interactions);
        let overall_engagement = engagement_score(interactions);
        let completed = session.completed_activities();

        Self {
            session_id: session.id(),
            chat_type: session.chat_type().clone(),
            duration_minutes: session.last_activity_time().minutes_since(&session.created_at()),
            total_activities: completed.len(),
            total_interactions: interactions.len(),
            sentiment_summary,
            completed_activities: completed
                .iter()
                .map(|a| CompletedActivitySummary {
                    title: a.activity_title.clone(),
                    completion_time: a.completion_time,
                    metrics: a.metrics,
                })
                .collect(),
            overall_engagement,
            recommendations: recommendations(
                overall_engagement,
                completed.len(),
                sentiment_summary.negative,
            ),
        }
    }

    pub fn metrics(&self) -> SessionMetrics {
        SessionMetrics {
            session_duration_minutes: self.duration_minutes,
            total_activities_completed: self.total_activities,
            total_interactions: self.total_interactions,
            engagement_score: self.overall_engagement,
            sentiment_distribution: self.sentiment_summary,
        }
    }
}

/// Headline numbers reported alongside a summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub session_duration_minutes: f64,
    pub total_activities_completed: usize,
    pub total_interactions: usize,
    pub engagement_score: EngagementLevel,
    pub sentiment_distribution: SentimentTally,
}

/// Average engagement weight over all interactions. No interactions is low.
pub fn engagement_score(interactions: &[Interaction]) -> EngagementLevel {
    if interactions.is_empty() {
        return EngagementLevel::Low;
    }
    let total: u32 = interactions
        .iter()
        .map(|i| i.response_analysis.engagement_level.weight())
        .sum();
    EngagementLevel::from_average(f64::from(total) / interactions.len() as f64)
}

pub fn recommendations(
    engagement: EngagementLevel,
    completed_count: usize,
    negative_count: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    if engagement == EngagementLevel::Low {
        out.push("Consider shorter, more frequent check-ins".to_string());
        out.push("Use more visual cues and simple language".to_string());
    }
    if completed_count < LOW_COMPLETION_THRESHOLD {
        out.push("Focus on fewer activities per session".to_string());
        out.push("Provide more encouragement and positive reinforcement".to_string());
    }
    if negative_count > NEGATIVE_REPLY_THRESHOLD {
        out.push("Follow up with caregiver about challenges".to_string());
        out.push("Consider adjusting treatment plan difficulty".to_string());
    }
    out
}
