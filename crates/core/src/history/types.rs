use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::{CloudType, RawResult};

/// Where an upstream item stands in the acquisition flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryState {
    New,
    Found,
    Saved,
    Error,
}

impl HistoryState {
    /// Settled items are not searched again.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Found | Self::Saved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Found => "FOUND",
            Self::Saved => "SAVED",
            Self::Error => "ERROR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Self::New),
            "FOUND" => Some(Self::Found),
            "SAVED" => Some(Self::Saved),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for HistoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One acquisition history entry, keyed by upstream item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<CloudType>,
    pub state: HistoryState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub cloud_links: Vec<RawResult>,
    pub added_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(key: impl Into<String>, title: impl Into<String>, state: HistoryState) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            content: String::new(),
            cloud_type: None,
            state,
            image: None,
            cloud_links: Vec::new(),
            added_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_states() {
        assert!(HistoryState::Found.is_settled());
        assert!(HistoryState::Saved.is_settled());
        assert!(!HistoryState::New.is_settled());
        assert!(!HistoryState::Error.is_settled());
    }

    #[test]
    fn test_state_round_trips_through_str() {
        for state in [
            HistoryState::New,
            HistoryState::Found,
            HistoryState::Saved,
            HistoryState::Error,
        ] {
            assert_eq!(HistoryState::parse(state.as_str()), Some(state));
        }
        assert_eq!(HistoryState::parse("DONE"), None);
    }

    #[test]
    fn test_state_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&HistoryState::Found).unwrap(),
            "\"FOUND\""
        );
    }
}
