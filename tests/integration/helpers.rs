//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use fileconv_core::config::AppConfig;

const BOUNDARY: &str = "fileconv-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Holds the artifact directory for the lifetime of the test
    pub output_dir: tempfile::TempDir,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: bytes::Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

impl TestApp {
    /// Create a test application with default settings.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application from `config`, storing artifacts in a
    /// fresh temporary directory.
    pub async fn with_config(mut config: AppConfig) -> Self {
        let output_dir = tempfile::tempdir().expect("Failed to create temp dir");
        config.storage.output_dir = output_dir.path().to_string_lossy().into_owned();

        let state = fileconv_api::build_state(config.clone())
            .await
            .expect("Failed to build state");
        let router = fileconv_api::build_app(state);

        Self {
            router,
            config,
            output_dir,
        }
    }

    /// Number of artifacts on disk.
    pub fn artifact_count(&self) -> usize {
        std::fs::read_dir(self.output_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Send a request and buffer the response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST a multipart upload with an optional file part and an optional
    /// `conversionType` part.
    pub async fn upload(
        &self,
        file: Option<(&str, &[u8])>,
        conversion_type: Option<&str>,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/api/convert/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(file, conversion_type)))
            .unwrap();
        self.send(request).await
    }
}

/// Encode a multipart/form-data body.
pub fn multipart_body(file: Option<(&str, &[u8])>, conversion_type: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((name, data)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(kind) = conversion_type {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"conversionType\"\r\n\r\n",
        );
        body.extend_from_slice(kind.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
