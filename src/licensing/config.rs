use crate::licensing::expiry::DateFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geolocation lookup service
pub const DEFAULT_LOOKUP_URL: &str = "https://ipinfo.io/json";

/// Per-request timeout for both endpoints
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Floor applied to every configured timeout
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Sentinel location when neither the lookup nor the system locale helps
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Device id used when no platform identifier can be obtained
pub const UNKNOWN_DEVICE: &str = "unknown-device";

/// Directory name under the platform data dir holding the persisted device id
pub const APP_DATA_DIR: &str = "cloud-license";

/// Default accepted expiry formats, tried in this order
pub fn default_date_formats() -> Vec<DateFormat> {
    vec![
        DateFormat::Zoned("%a %b %d %Y %H:%M:%S GMT%z (India Standard Time)".to_string()),
        DateFormat::Zoned("%a %b %d %Y %H:%M:%S GMT%z".to_string()),
        DateFormat::Date("%Y-%m-%d".to_string()),
        DateFormat::Local("%Y-%m-%dT%H:%M:%S".to_string()),
    ]
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_lookup_url() -> String {
    DEFAULT_LOOKUP_URL.to_string()
}

/// Settings for talking to the license authority.
///
/// The embedding application owns these values; nothing here is global.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LicenseConfig {
    /// License authority endpoint, queried with `key`, `device`, `project` and `loc`
    pub endpoint: String,
    pub license_key: String,
    pub project_name: String,
    /// Overrides the platform device id when set
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<DateFormat>,
}

impl LicenseConfig {
    pub fn new(
        endpoint: impl Into<String>,
        license_key: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            license_key: license_key.into(),
            project_name: project_name.into(),
            device_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            date_formats: default_date_formats(),
        }
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Replace the accepted expiry formats; order is significant
    pub fn with_date_formats(mut self, formats: Vec<DateFormat>) -> Self {
        self.date_formats = formats;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

/// Settings for the geolocation lookup.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LocationConfig {
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Locale tag such as `en_IN.UTF-8`; read from the environment when unset
    #[serde(default)]
    pub locale: Option<String>,
}

impl LocationConfig {
    pub fn with_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.lookup_url = url.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            locale: None,
        }
    }
}
