use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cloud storage provider a share link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudType {
    Tianyi,
    Quark,
    Aliyun,
    Baidu,
    Xunlei,
}

impl CloudType {
    pub const ALL: [CloudType; 5] = [
        CloudType::Tianyi,
        CloudType::Quark,
        CloudType::Aliyun,
        CloudType::Baidu,
        CloudType::Xunlei,
    ];

    /// Numeric code used by the search API.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Tianyi),
            2 => Some(Self::Quark),
            3 => Some(Self::Aliyun),
            4 => Some(Self::Baidu),
            5 => Some(Self::Xunlei),
            _ => None,
        }
    }

    /// Case-insensitive provider name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tianyi => "tianyi",
            Self::Quark => "quark",
            Self::Aliyun => "aliyun",
            Self::Baidu => "baidu",
            Self::Xunlei => "xunlei",
        }
    }

    /// Host fragment identifying this provider's share links.
    pub fn domain(&self) -> &'static str {
        match self {
            Self::Tianyi => "cloud.189.cn",
            Self::Quark => "pan.quark.cn",
            Self::Aliyun => "aliyundrive.com",
            Self::Baidu => "pan.baidu.com",
            Self::Xunlei => "pan.xunlei.com",
        }
    }

    /// Infer the provider of `link` among `candidates` by domain.
    pub fn infer_from_link(link: &str, candidates: &[CloudType]) -> Option<Self> {
        candidates
            .iter()
            .copied()
            .find(|t| link.contains(t.domain()))
    }
}

impl std::fmt::Display for CloudType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single share link inside a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<CloudType>,
    pub link: String,
}

impl CloudLink {
    pub fn new(cloud_type: Option<CloudType>, link: impl Into<String>) -> Self {
        Self {
            cloud_type,
            link: link.into(),
        }
    }
}

/// One search result as returned by a source, before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    /// Upstream message identifier. May be empty.
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cloud_links: Vec<CloudLink>,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend rejected credentials")]
    Unauthorized,

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// A backend that returns raw results for a keyword.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Search for `keyword`.
    async fn search(&self, keyword: &str) -> Result<Vec<RawResult>, SearchError>;

    /// Check that the backend is reachable and accepts our credentials.
    ///
    /// The default issues an empty search and discards the results.
    async fn check_connection(&self) -> Result<(), SearchError> {
        self.search("").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_type_codes_and_names() {
        assert_eq!(CloudType::from_code(1), Some(CloudType::Tianyi));
        assert_eq!(CloudType::from_code(2), Some(CloudType::Quark));
        assert_eq!(CloudType::from_code(99), None);
        assert_eq!(CloudType::from_name("Quark"), Some(CloudType::Quark));
        assert_eq!(CloudType::from_name("dropbox"), None);
    }

    #[test]
    fn test_infer_from_link_only_among_candidates() {
        let link = "https://cloud.189.cn/t/abc";
        assert_eq!(
            CloudType::infer_from_link(link, &[CloudType::Tianyi, CloudType::Quark]),
            Some(CloudType::Tianyi)
        );
        assert_eq!(CloudType::infer_from_link(link, &[CloudType::Quark]), None);
    }

    #[test]
    fn test_raw_result_deserializes_with_defaults() {
        let raw: RawResult = serde_json::from_str(
            r#"{"title": "流浪地球", "cloud_links": [{"link": "https://pan.quark.cn/s/1"}]}"#,
        )
        .unwrap();
        assert_eq!(raw.message_id, "");
        assert_eq!(raw.content, "");
        assert_eq!(raw.cloud_links[0].cloud_type, None);
    }

    #[tokio::test]
    async fn test_check_connection_issues_empty_search() {
        use crate::testing::MockResultSource;

        let source = MockResultSource::new();
        source.check_connection().await.unwrap();
        assert_eq!(source.recorded_searches().await, vec![String::new()]);

        source.set_next_error(SearchError::Unauthorized).await;
        assert!(matches!(
            source.check_connection().await,
            Err(SearchError::Unauthorized)
        ));
    }
}
