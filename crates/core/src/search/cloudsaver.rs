//! CloudSaver search backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CloudLink, CloudType, RawResult, ResultSource, SearchError};

fn default_timeout_secs() -> u32 {
    30
}

/// CloudSaver service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSaverConfig {
    /// Service root, e.g. `http://localhost:8008`.
    pub base_url: String,
    /// Bearer token issued by the service.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

/// [`ResultSource`] backed by a CloudSaver service.
pub struct CloudSaverClient {
    client: Client,
    base_url: String,
    token: String,
}

impl CloudSaverClient {
    pub fn new(config: CloudSaverConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SearchError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn build_search_url(&self, keyword: &str) -> String {
        format!(
            "{}/api/search?keyword={}",
            self.base_url,
            urlencoding::encode(keyword)
        )
    }
}

#[async_trait]
impl ResultSource for CloudSaverClient {
    fn name(&self) -> &str {
        "cloudsaver"
    }

    async fn search(&self, keyword: &str) -> Result<Vec<RawResult>, SearchError> {
        let url = self.build_search_url(keyword);
        debug!(keyword = keyword, "Searching CloudSaver");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else if e.is_connect() {
                    SearchError::ConnectionFailed(e.to_string())
                } else {
                    SearchError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SearchError::Unauthorized);
        }
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::ApiError(format!("Failed to read response: {}", e)))?;
        let results = parse_search_response(&body)?;

        debug!(
            keyword = keyword,
            results = results.len(),
            "CloudSaver search complete"
        );

        Ok(results)
    }
}

/// Parse a CloudSaver `/api/search` response body into raw results.
///
/// Requires `success == true` and `code == 0`. Resources from every channel
/// group are flattened in order. Link cloud types may be numeric codes,
/// provider names or absent.
pub fn parse_search_response(body: &str) -> Result<Vec<RawResult>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::ApiError(format!("Failed to parse response: {}", e)))?;

    if !response.success || response.code != 0 {
        return Err(SearchError::ApiError(format!(
            "search rejected: code={}, message={}",
            response.code,
            response.message.unwrap_or_default()
        )));
    }

    Ok(response
        .data
        .into_iter()
        .flat_map(|group| group.list)
        .map(|resource| RawResult {
            message_id: resource.message_id.map(id_to_string).unwrap_or_default(),
            title: resource.title.unwrap_or_default(),
            content: resource.content.unwrap_or_default(),
            cloud_links: resource
                .cloud_links
                .into_iter()
                .filter(|l| !l.link.is_empty())
                .map(|l| CloudLink::new(l.cloud_type.as_ref().and_then(cloud_type_of), l.link))
                .collect(),
        })
        .collect())
}

fn cloud_type_of(value: &serde_json::Value) -> Option<CloudType> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(CloudType::from_code),
        serde_json::Value::String(s) => s
            .parse::<i64>()
            .ok()
            .and_then(CloudType::from_code)
            .or_else(|| CloudType::from_name(s)),
        _ => None,
    }
}

fn id_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

// CloudSaver API response types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default = "default_code")]
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Vec<ChannelGroup>,
}

fn default_code() -> i64 {
    -1
}

#[derive(Debug, Deserialize)]
struct ChannelGroup {
    #[serde(default)]
    list: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Resource {
    message_id: Option<serde_json::Value>,
    title: Option<String>,
    content: Option<String>,
    #[serde(default)]
    cloud_links: Vec<ResourceLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceLink {
    cloud_type: Option<serde_json::Value>,
    #[serde(default)]
    link: String,
}
