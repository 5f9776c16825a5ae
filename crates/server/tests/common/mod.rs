//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with mock dependencies injected, so the HTTP surface can be exercised
//! without a CloudSaver service or TMDB.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cloudsaver_core::{
    testing::{MockMetadataLookup, MockResultSource},
    Acquirer, CandidateMatcher, Config, DatabaseConfig, FilterConfig, IdentityResolver,
    MediaFilter, SqliteHistoryStore,
};
use cloudsaver_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use cloudsaver_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// Provides an in-process router with fully controllable mocks for:
/// - Metadata lookups (MockMetadataLookup)
/// - Search results (MockResultSource)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_filter() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/filter", json!({
///         "query": { "title": "流浪地球", "media_type": "movie" },
///         "results": []
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock metadata lookup - configure resolvable titles
    pub lookup: Arc<MockMetadataLookup>,
    /// Mock result source - configure search results
    pub source: Arc<MockResultSource>,
    /// History store backing the router
    pub history: Arc<SqliteHistoryStore>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        // Create mocks
        let lookup = Arc::new(MockMetadataLookup::new());
        lookup
            .add_record(
                "流浪地球",
                fixtures::movie_record("流浪地球", 2019, "535167"),
            )
            .await;
        let source = Arc::new(MockResultSource::new());

        // Create config
        let config = Config {
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            filter: test_config.filter.clone(),
            ..Default::default()
        };

        let history = Arc::new(
            SqliteHistoryStore::new(&db_path).expect("Failed to create history store"),
        );

        let resolver = IdentityResolver::new(lookup.clone());
        let matcher = CandidateMatcher::new(Arc::new(resolver));
        let filter = Arc::new(MediaFilter::new(matcher, test_config.filter));

        let mut state = AppState::new(config, Arc::clone(&filter), history.clone());
        if test_config.enable_search_backend {
            let acquirer = Acquirer::new(source.clone(), filter, history.clone());
            state = state
                .with_source(source.clone())
                .with_acquirer(Arc::new(acquirer));
        }

        let router = create_router(Arc::new(state));

        Self {
            router,
            lookup,
            source,
            history,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Fetch a path and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Wire the mock result source for keyword search and acquisition
    pub enable_search_backend: bool,
    pub filter: FilterConfig,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            enable_search_backend: true,
            filter: FilterConfig::default(),
        }
    }
}

impl TestConfig {
    /// Create config without a search backend.
    pub fn without_search_backend() -> Self {
        Self {
            enable_search_backend: false,
            ..Default::default()
        }
    }
}
