use crate::licensing::config::LocationConfig;
use crate::licensing::types::{LicenseError, LocationInfo};
use std::env;

/// Environment variables consulted for the locale, most specific first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Best-effort location of the current host.
///
/// Asks the lookup service first and falls back to the territory of the
/// system locale. Never fails: the worst case is an empty `LocationInfo`,
/// which displays as `"Unknown"`.
pub struct LocationResolver {
    client: reqwest::Client,
    config: LocationConfig,
}

impl LocationResolver {
    pub fn new(config: LocationConfig) -> Result<Self, LicenseError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LicenseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub async fn resolve(&self) -> LocationInfo {
        let location = match self.lookup().await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(error = %e, url = %self.config.lookup_url, "Location lookup failed, using system locale");
                self.locale_fallback()
            }
        };

        tracing::info!(location = %location, "Auto-detected location");
        location
    }

    async fn lookup(&self) -> Result<LocationInfo, LicenseError> {
        let response = self
            .client
            .get(&self.config.lookup_url)
            .send()
            .await?
            .error_for_status()?;

        let info: LocationInfo = response
            .json()
            .await
            .map_err(|e| LicenseError::Malformed(format!("Failed to parse location: {}", e)))?;

        if info.is_empty() {
            return Err(LicenseError::Malformed("lookup returned no region or country".to_string()));
        }

        Ok(info)
    }

    fn locale_fallback(&self) -> LocationInfo {
        self.config
            .locale
            .clone()
            .or_else(system_locale)
            .as_deref()
            .and_then(country_from_locale)
            .map(LocationInfo::from_country)
            .unwrap_or_default()
    }
}

/// Locale tag of the process, e.g. `en_IN.UTF-8`
pub fn system_locale() -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// English country name for the territory of a locale tag.
///
/// Accepts POSIX (`en_IN.UTF-8@euro`) and BCP 47 (`en-IN`) tags. Territory
/// codes missing from the table come back as the upper-case code.
pub fn country_from_locale(tag: &str) -> Option<String> {
    let base = tag.split(['.', '@']).next().unwrap_or_default();
    let territory = base.split(['_', '-']).skip(1).find(|part| {
        (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
            || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
    })?;

    let code = territory.to_ascii_uppercase();
    Some(country_name(&code).map(str::to_string).unwrap_or(code))
}

fn country_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "AE" => "United Arab Emirates",
        "AR" => "Argentina",
        "AT" => "Austria",
        "AU" => "Australia",
        "BD" => "Bangladesh",
        "BE" => "Belgium",
        "BR" => "Brazil",
        "CA" => "Canada",
        "CH" => "Switzerland",
        "CN" => "China",
        "CZ" => "Czechia",
        "DE" => "Germany",
        "DK" => "Denmark",
        "EG" => "Egypt",
        "ES" => "Spain",
        "FI" => "Finland",
        "FR" => "France",
        "GB" => "United Kingdom",
        "GR" => "Greece",
        "HK" => "Hong Kong SAR",
        "ID" => "Indonesia",
        "IE" => "Ireland",
        "IL" => "Israel",
        "IN" => "India",
        "IT" => "Italy",
        "JP" => "Japan",
        "KE" => "Kenya",
        "KR" => "Korea",
        "LK" => "Sri Lanka",
        "MX" => "Mexico",
        "MY" => "Malaysia",
        "NG" => "Nigeria",
        "NL" => "Netherlands",
        "NO" => "Norway",
        "NP" => "Nepal",
        "NZ" => "New Zealand",
        "PH" => "Philippines",
        "PK" => "Pakistan",
        "PL" => "Poland",
        "PT" => "Portugal",
        "RU" => "Russia",
        "SA" => "Saudi Arabia",
        "SE" => "Sweden",
        "SG" => "Singapore",
        "TH" => "Thailand",
        "TR" => "Türkiye",
        "TW" => "Taiwan",
        "UA" => "Ukraine",
        "US" => "United States",
        "VN" => "Vietnam",
        "ZA" => "South Africa",
        _ => return None,
    };
    Some(name)
}
