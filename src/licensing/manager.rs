use crate::licensing::config::{LicenseConfig, LocationConfig, UNKNOWN_DEVICE};
use crate::licensing::device::get_device_id;
use crate::licensing::location::LocationResolver;
use crate::licensing::types::{LicenseError, LocationInfo, ValidationQuery, ValidationResult};
use crate::licensing::validator::LicenseValidator;

/// Entry point for the embedding application.
///
/// Runs one full check: locate the host, then ask the license authority.
/// What to show on an invalid result is up to the caller.
pub struct LicenseManager {
    config: LicenseConfig,
    resolver: LocationResolver,
    validator: LicenseValidator,
}

impl LicenseManager {
    pub fn new(config: LicenseConfig, location: LocationConfig) -> Result<Self, LicenseError> {
        let resolver = LocationResolver::new(location)?;
        let validator = LicenseValidator::new(&config)?;

        Ok(Self {
            config,
            resolver,
            validator,
        })
    }

    pub async fn check(&self) -> ValidationResult {
        let location = self.resolver.resolve().await;
        let query = self.query_for(&location, self.device_id());
        let result = self.validator.validate(&query).await;

        match (&result.expiry, result.valid) {
            (Some(expiry), true) => {
                tracing::info!(project = %query.project_name, "License valid until: {}", expiry.format("%Y-%m-%d"));
            }
            _ => {
                tracing::warn!(
                    project = %query.project_name,
                    reason = result.error_message().as_deref().unwrap_or("unknown"),
                    "Invalid license"
                );
            }
        }

        result
    }

    fn query_for(&self, location: &LocationInfo, device_id: String) -> ValidationQuery {
        ValidationQuery {
            license_key: self.config.license_key.clone(),
            device_id,
            project_name: self.config.project_name.clone(),
            location: location.display(),
        }
    }

    fn device_id(&self) -> String {
        if let Some(id) = configured_device_id(&self.config) {
            return id;
        }

        get_device_id().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not determine device id");
            UNKNOWN_DEVICE.to_string()
        })
    }
}

/// Device id from config, ignoring blank values
fn configured_device_id(config: &LicenseConfig) -> Option<String> {
    config
        .device_id
        .as_ref()
        .filter(|id| !id.trim().is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(config: LicenseConfig) -> LicenseManager {
        LicenseManager::new(config, LocationConfig::default()).unwrap()
    }

    #[test]
    fn test_query_uses_config_and_location() {
        let config = LicenseConfig::new("https://example.com/exec", "12345678", "Demo")
            .with_device_id("device-42");
        let device_id = configured_device_id(&config).unwrap();
        let query = manager(config).query_for(&LocationInfo::from_country("India"), device_id);

        assert_eq!(
            query,
            ValidationQuery {
                license_key: "12345678".to_string(),
                device_id: "device-42".to_string(),
                project_name: "Demo".to_string(),
                location: "India".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_location_is_unknown() {
        let config = LicenseConfig::new("https://example.com/exec", "K", "Demo");
        let query = manager(config).query_for(&LocationInfo::default(), "d".to_string());
        assert_eq!(query.location, "Unknown");
    }

    #[test]
    fn test_blank_device_override_is_ignored() {
        let blank = LicenseConfig::new("https://example.com/exec", "K", "Demo").with_device_id("  ");
        assert_eq!(configured_device_id(&blank), None);

        let unset = LicenseConfig::new("https://example.com/exec", "K", "Demo");
        assert_eq!(configured_device_id(&unset), None);

        let set = unset.with_device_id("device-42");
        assert_eq!(configured_device_id(&set), Some("device-42".to_string()));
    }
}
