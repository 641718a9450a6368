//! Keyword classifier for check-in replies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

impl EngagementLevel {
    /// Weight used when averaging engagement over a session.
    pub fn weight(self) -> u32 {
        match self {
            EngagementLevel::High => 3,
            EngagementLevel::Medium => 2,
            EngagementLevel::Low => 1,
        }
    }

    /// Engagement level for an average weight.
    pub fn from_average(average: f64) -> Self {
        if average >= 2.5 {
            EngagementLevel::High
        } else if average >= 1.5 {
            EngagementLevel::Medium
        } else {
            EngagementLevel::Low
        }
    }
}

/// Per-reply metrics kept with completion and interaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMetrics {
    pub sentiment: Sentiment,
    pub engagement_level: EngagementLevel,
    /// Length of the raw reply in characters.
    pub response_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub engagement_level: EngagementLevel,
    pub activity_completed: bool,
    pub needs_follow_up: bool,
    pub metrics: ReplyMetrics,
}

/// Keyword sets and word-count thresholds.
///
/// Loadable from configuration; absent keys keep the built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Replies with more words than this are highly engaged.
    pub high_engagement_words: usize,
    /// Replies with more words than this (and not high) are moderately engaged.
    pub medium_engagement_words: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }

        Self {
            positive: words(&[
                "yes", "good", "great", "fine", "okay", "sure", "done", "completed", "finished",
            ]),
            negative: words(&[
                "no", "bad", "difficult", "hard", "can't", "cannot", "won't", "didn't", "haven't",
                // Negations, so "not good" cannot complete an activity.
                "not", "nothing", "never", "don't",
            ]),
            high_engagement_words: 5,
            medium_engagement_words: 2,
        }
    }
}

/// Classifies free-text replies by keyword and length.
///
/// Total: every input yields a classification.
#[derive(Debug, Clone, Default)]
pub struct ResponseClassifier {
    config: ClassifierConfig,
}

impl ResponseClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, reply: &str) -> Classification {
        let text = normalize(reply);
        let tokens = tokenize(&text);

        let has_positive = self.config.positive.iter().any(|k| matches_keyword(&text, &tokens, k));
        let has_negative = self.config.negative.iter().any(|k| matches_keyword(&text, &tokens, k));

        let sentiment = if has_positive && !has_negative {
            Sentiment::Positive
        } else if has_negative {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        let word_count = reply.split_whitespace().count();
        let engagement_level = if word_count > self.config.high_engagement_words {
            EngagementLevel::High
        } else if word_count > self.config.medium_engagement_words {
            EngagementLevel::Medium
        } else {
            EngagementLevel::Low
        };

        Classification {
            sentiment,
            engagement_level,
            activity_completed: has_positive && !has_negative,
            needs_follow_up: has_negative || !has_positive,
            metrics: ReplyMetrics {
                sentiment,
                engagement_level,
                response_length: reply.chars().count(),
            },
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase().replace('’', "'")
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Single words match whole tokens; multi-word keywords match as a phrase.
fn matches_keyword(text: &str, tokens: &[&str], keyword: &str) -> bool {
    let keyword = normalize(keyword);
    let parts = tokenize(&keyword);
    match parts.as_slice() {
        [] => false,
        [word] => tokens.contains(word),
        _ => tokens.windows(parts.len()).any(|w| w == parts.as_slice()) || text.contains(&keyword),
    }
}
