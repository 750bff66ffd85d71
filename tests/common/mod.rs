//! Shared test helpers for license tests.

#![allow(dead_code)]

use cloud_license::{LicenseConfig, LocationConfig, ValidationQuery};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LICENSE_PATH: &str = "/macros/exec";
pub const LOOKUP_PATH: &str = "/json";

pub fn license_config(server: &MockServer) -> LicenseConfig {
    LicenseConfig::new(format!("{}{}", server.uri(), LICENSE_PATH), "12345678", "Demo Project")
        .with_device_id("device-42")
        .with_timeout(Duration::from_secs(2))
}

pub fn location_config(server: &MockServer) -> LocationConfig {
    LocationConfig::default()
        .with_lookup_url(format!("{}{}", server.uri(), LOOKUP_PATH))
        .with_locale("en_IN.UTF-8")
        .with_timeout(Duration::from_secs(2))
}

pub fn query(key: &str) -> ValidationQuery {
    ValidationQuery {
        license_key: key.to_string(),
        device_id: "device-42".to_string(),
        project_name: "Demo Project".to_string(),
        location: "Maharashtra, IN".to_string(),
    }
}

/// Mounts a license authority answering every request with `body`
pub async fn mount_authority(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(LICENSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
