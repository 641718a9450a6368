//! ChatSessionStatus enum for the lifecycle of check-in conversations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a check-in chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatSessionStatus {
    #[default]
    Active,
    Completed,
}

impl ChatSessionStatus {
    /// Returns true if the session still accepts patient messages.
    pub fn is_open(&self) -> bool {
        matches!(self, ChatSessionStatus::Active)
    }
}

impl fmt::Display for ChatSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChatSessionStatus::Active => "active",
            ChatSessionStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(ChatSessionStatus::default(), ChatSessionStatus::Active);
    }

    #[test]
    fn only_active_is_open() {
        assert!(ChatSessionStatus::Active.is_open());
        assert!(!ChatSessionStatus::Completed.is_open());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ChatSessionStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
