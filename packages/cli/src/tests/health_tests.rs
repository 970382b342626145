// ABOUTME: Tests for the health endpoint handler
// ABOUTME: Checks the reported service identity and timestamp format

use crate::api::health::health_check;

#[tokio::test]
async fn test_health_check_reports_service() {
    let value = health_check().await.0;

    assert_eq!(value["status"], "healthy");
    assert_eq!(value["service"], "prdforge");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    let timestamp = value["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}
