mod common;

use cloud_license::LicenseManager;
use common::{license_config, location_config, mount_authority, LICENSE_PATH, LOOKUP_PATH};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn check_sends_detected_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "Pune",
            "region": "Maharashtra",
            "country": "IN"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LICENSE_PATH))
        .and(query_param("key", "12345678"))
        .and(query_param("device", "device-42"))
        .and(query_param("project", "Demo Project"))
        .and(query_param("loc", "Maharashtra, IN"))
        .respond_with(ResponseTemplate::new(200).set_body_string("VALID|2999-01-01"))
        .expect(1)
        .mount(&server)
        .await;

    let manager = LicenseManager::new(license_config(&server), location_config(&server)).unwrap();
    let result = manager.check().await;

    assert!(result.valid);
}

#[tokio::test]
async fn location_failure_does_not_fail_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LICENSE_PATH))
        .and(query_param("loc", "India"))
        .respond_with(ResponseTemplate::new(200).set_body_string("VALID|2999-01-01"))
        .expect(1)
        .mount(&server)
        .await;

    let manager = LicenseManager::new(license_config(&server), location_config(&server)).unwrap();
    assert!(manager.check().await.valid);
}

#[tokio::test]
async fn expired_license_reports_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;
    mount_authority(&server, "VALID|2000-01-01").await;

    let manager = LicenseManager::new(license_config(&server), location_config(&server)).unwrap();
    let result = manager.check().await;

    assert!(!result.valid);
    assert_eq!(
        result.error_message().as_deref(),
        Some("License expired on 2000-01-01")
    );
}
