//! Conversion endpoint integration tests.

use http::{Request, StatusCode, header};
use serde_json::{Value, json};

use fileconv_core::config::AppConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_types() {
    let app = TestApp::new().await;

    let response = app.get("/api/convert/types").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    let types = body.as_array().unwrap();
    assert_eq!(types.len(), 7);
    assert_eq!(types[0], json!({"type": "CSV_TO_JSON", "description": "CSV to JSON"}));
    assert!(types.iter().any(|t| t["type"] == "JSON_TO_PDF"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/convert/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "File Converter API is running");
    assert!(response.json()["version"].is_string());
}

#[tokio::test]
async fn test_upload_and_download_csv_to_json() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            Some(("people.csv", b"name,age\nAlice,30\nBob,25\n")),
            Some("CSV_TO_JSON"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "File converted successfully");
    assert_eq!(body["originalFileName"], "people.csv");
    assert_eq!(body["conversionType"], "CSV_TO_JSON");

    let converted = body["convertedFileName"].as_str().unwrap().to_string();
    assert!(converted.starts_with("people_"));
    assert!(converted.ends_with(".json"));

    let download_url = body["downloadUrl"].as_str().unwrap();
    assert_eq!(download_url, format!("/api/convert/download/{converted}"));

    let download = app.get(download_url).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(
        download.headers[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"{converted}\"").as_str()
    );
    assert_eq!(download.headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["fileSizeBytes"], download.body.len() as u64);

    let value: Value = serde_json::from_slice(&download.body).unwrap();
    assert_eq!(
        value,
        json!([{"name": "Alice", "age": "30"}, {"name": "Bob", "age": "25"}])
    );
}

#[tokio::test]
async fn test_every_kind_converts_sample_input() {
    let app = TestApp::new().await;
    let samples: [(&str, &str, &[u8]); 7] = [
        ("CSV_TO_JSON", "a.csv", b"k,v\n1,2\n"),
        ("JSON_TO_CSV", "a.json", br#"[{"k":"1","v":"2"}]"#),
        ("JSON_TO_XML", "a.json", br#"{"k":"1"}"#),
        ("XML_TO_JSON", "a.xml", b"<root><k>1</k></root>"),
        ("CSV_TO_EXCEL", "a.csv", b"k,v\n1,2\n"),
        ("TEXT_TO_PDF", "a.txt", b"hello\nworld\n"),
        ("JSON_TO_PDF", "a.json", br#"[{"k":"1","v":"2"}]"#),
    ];

    for (kind, name, data) in samples {
        let response = app.upload(Some((name, data)), Some(kind)).await;
        assert_eq!(response.status, StatusCode::OK, "{kind}: {:?}", response.json());
        assert_eq!(response.json()["success"], true);
    }
    assert_eq!(app.artifact_count(), 7);
}

#[tokio::test]
async fn test_empty_file_rejected() {
    let app = TestApp::new().await;

    let response = app.upload(Some(("empty.csv", b"")), Some("CSV_TO_JSON")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "File is empty");
    assert_eq!(app.artifact_count(), 0);
}

#[tokio::test]
async fn test_unknown_conversion_type() {
    let app = TestApp::new().await;

    let response = app.upload(Some(("a.csv", b"a\n1\n")), Some("CSV_TO_YAML")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Conversion failed");
    assert!(body["errorDetails"].as_str().unwrap().contains("CSV_TO_YAML"));
}

#[tokio::test]
async fn test_empty_json_array_is_business_failure() {
    let app = TestApp::new().await;

    let response = app.upload(Some(("rows.json", b"[]")), Some("JSON_TO_CSV")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Conversion failed");
    assert_eq!(body["errorDetails"], "JSON array is empty");
    assert_eq!(body["conversionType"], "JSON_TO_CSV");
    assert_eq!(app.artifact_count(), 0);
}

#[tokio::test]
async fn test_malformed_xml() {
    let app = TestApp::new().await;

    let response = app.upload(Some(("bad.xml", b"<a><b></a>")), Some("XML_TO_JSON")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.json()["errorDetails"]
            .as_str()
            .unwrap()
            .starts_with("Malformed XML input")
    );
}

#[tokio::test]
async fn test_missing_parts() {
    let app = TestApp::new().await;

    let response = app.upload(None, Some("CSV_TO_JSON")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Invalid argument");

    let response = app.upload(Some(("a.csv", b"a\n1\n")), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn test_download_missing() {
    let app = TestApp::new().await;

    let response = app.get("/api/convert/download/never_made.json").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "File not found");
}

#[tokio::test]
async fn test_download_rejects_traversal() {
    let app = TestApp::new().await;

    let response = app.get("/api/convert/download/..%2FCargo.toml").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_upload() {
    let mut config = AppConfig::default();
    config.storage.max_upload_size_bytes = 1024;
    let app = TestApp::with_config(config).await;

    let data = vec![b'x'; 8 * 1024];
    let response = app.upload(Some(("big.txt", &data)), Some("TEXT_TO_PDF")).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);

    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "File size exceeds maximum allowed size");
    assert_eq!(body["error"], "Maximum upload size is 1024 bytes");
}

#[tokio::test]
async fn test_concurrent_uploads_same_name() {
    let app = TestApp::new().await;
    let data: &[u8] = b"k,v\na,1\n";

    let (first, second) = tokio::join!(
        app.upload(Some(("same.csv", data)), Some("CSV_TO_JSON")),
        app.upload(Some(("same.csv", data)), Some("CSV_TO_JSON")),
    );

    let a = first.json()["convertedFileName"].as_str().unwrap().to_string();
    let b = second.json()["convertedFileName"].as_str().unwrap().to_string();
    assert_ne!(a, b);

    for name in [a, b] {
        let response = app.get(&format!("/api/convert/download/{name}")).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/convert/health")
        .header(header::ORIGIN, "http://localhost:4200")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
