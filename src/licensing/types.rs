use crate::licensing::config::UNKNOWN_LOCATION;
use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Approximate location of the host, as reported by the lookup service
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct LocationInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
}

/// Lookup services send `null` for fields they could not resolve
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl LocationInfo {
    /// Location derived from the system locale only knows the country
    pub fn from_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Default::default()
        }
    }

    /// True when there is nothing to show besides the sentinel
    pub fn is_empty(&self) -> bool {
        self.region.trim().is_empty() && self.country.trim().is_empty()
    }

    /// `"{region}, {country}"`, or `"Unknown"` when both are empty
    pub fn display(&self) -> String {
        let composed = format!("{}, {}", self.region.trim(), self.country.trim());
        let trimmed = composed.trim_matches(|c: char| c == ',' || c.is_whitespace());

        if trimmed.is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Display for LocationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Everything the license authority is told about this check
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct ValidationQuery {
    pub license_key: String,
    pub device_id: String,
    pub project_name: String,
    pub location: String,
}

/// Outcome of a single license check
///
/// A valid result always carries its expiry and no error. Invalid results
/// carry the reason, and the stale expiry when the license has lapsed.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub expiry: Option<DateTime<Local>>,
    pub error: Option<LicenseError>,
}

impl ValidationResult {
    pub fn valid(expiry: DateTime<Local>) -> Self {
        Self {
            valid: true,
            expiry: Some(expiry),
            error: None,
        }
    }

    pub fn invalid(error: LicenseError) -> Self {
        Self {
            valid: false,
            expiry: None,
            error: Some(error),
        }
    }

    /// Expired license; the stale date is kept for diagnostics
    pub fn expired(expiry: DateTime<Local>) -> Self {
        Self {
            valid: false,
            expiry: Some(expiry),
            error: Some(LicenseError::Expired(expiry.format("%Y-%m-%d").to_string())),
        }
    }

    /// Human readable reason for an invalid result
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// Error types for licensing operations
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
pub enum LicenseError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Rejected by license authority: {0}")]
    Rejected(String),

    #[error("Unrecognized expiry date: {0}")]
    UnknownDateFormat(String),

    #[error("License expired on {0}")]
    Expired(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LicenseError {
    pub fn is_network(&self) -> bool {
        matches!(self, LicenseError::Network(_) | LicenseError::HttpStatus(_))
    }
}

impl From<reqwest::Error> for LicenseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LicenseError::Network(format!("request timed out: {}", err))
        } else if let Some(status) = err.status() {
            LicenseError::HttpStatus(status.as_u16())
        } else {
            LicenseError::Network(err.to_string())
        }
    }
}

impl Serialize for LicenseError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
