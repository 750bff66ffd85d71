use crate::licensing::config::LicenseConfig;
use crate::licensing::expiry::{self, DateFormat};
use crate::licensing::types::{LicenseError, ValidationQuery, ValidationResult};
use chrono::Local;

/// Build the license authority URL with every query value percent-escaped
pub fn build_url(endpoint: &str, query: &ValidationQuery) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };

    format!(
        "{}{}key={}&device={}&project={}&loc={}",
        endpoint,
        separator,
        urlencoding::encode(&query.license_key),
        urlencoding::encode(&query.device_id),
        urlencoding::encode(&query.project_name),
        urlencoding::encode(&query.location),
    )
}

/// HTTP client for the license authority
///
/// Every call is a fresh round trip; results are never cached.
pub struct LicenseValidator {
    client: reqwest::Client,
    endpoint: String,
    date_formats: Vec<DateFormat>,
}

impl LicenseValidator {
    pub fn new(config: &LicenseConfig) -> Result<Self, LicenseError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LicenseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            date_formats: config.date_formats.clone(),
        })
    }

    /// Ask the authority about `query`; any failure yields an invalid result
    pub async fn validate(&self, query: &ValidationQuery) -> ValidationResult {
        match self.fetch(query).await {
            Ok(body) => expiry::evaluate(&body, &self.date_formats, Local::now()),
            Err(e) => {
                tracing::warn!(error = %e, "License authority unreachable");
                ValidationResult::invalid(e)
            }
        }
    }

    async fn fetch(&self, query: &ValidationQuery) -> Result<String, LicenseError> {
        let url = build_url(&self.endpoint, query);
        tracing::debug!(endpoint = %self.endpoint, device = %query.device_id, "Checking license");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LicenseError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| LicenseError::Network(format!("Failed to read response: {}", e)))
    }
}
