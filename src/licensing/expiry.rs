//! Grammar of the license authority's reply and the expiry decision.
//!
//! The authority answers in plain text: `VALID|<expiry>` grants the license
//! until `<expiry>`, anything else denies it. Expiry strings are matched
//! against an ordered list of formats and the first full match wins.

use crate::licensing::types::{LicenseError, ValidationResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Leading token of a granting reply
pub const VALID_TOKEN: &str = "VALID";

/// Longest rejection message kept for diagnostics, in characters
const MAX_REASON_LEN: usize = 120;

/// A single accepted expiry format, in `chrono` strftime syntax.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "kind", content = "pattern", rename_all = "snake_case")]
pub enum DateFormat {
    /// Date and time with an explicit UTC offset (`%z`)
    Zoned(String),
    /// Date and time in the host's local time zone
    Local(String),
    /// Calendar date; the license runs until local midnight starting that day
    Date(String),
}

impl DateFormat {
    /// Parse the whole of `input`, or nothing
    pub fn parse(&self, input: &str) -> Option<DateTime<Local>> {
        match self {
            DateFormat::Zoned(pattern) => DateTime::parse_from_str(input, pattern)
                .ok()
                .map(|dt| dt.with_timezone(&Local)),
            DateFormat::Local(pattern) => NaiveDateTime::parse_from_str(input, pattern)
                .ok()
                .map(local_instant),
            DateFormat::Date(pattern) => NaiveDate::parse_from_str(input, pattern)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(local_instant),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            DateFormat::Zoned(p) | DateFormat::Local(p) | DateFormat::Date(p) => p,
        }
    }
}

/// Local wall-clock time to an instant; times skipped by a DST jump are read as UTC
fn local_instant(naive: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Try `formats` in declared order
pub fn parse_expiry(input: &str, formats: &[DateFormat]) -> Option<DateTime<Local>> {
    formats.iter().find_map(|format| format.parse(input))
}

/// Extract the expiry instant from a reply body.
///
/// Fails with `Rejected` when the authority answered with anything other
/// than `VALID`, `Malformed` when the reply is empty or lacks the expiry
/// field, and `UnknownDateFormat` when no format matches.
pub fn parse_body(body: &str, formats: &[DateFormat]) -> Result<DateTime<Local>, LicenseError> {
    let body = body.trim_end();
    if body.trim_start().is_empty() {
        return Err(LicenseError::Malformed("empty response body".to_string()));
    }

    // The token must open the body; leading whitespace is not a grant
    if !body.starts_with(VALID_TOKEN) {
        return Err(LicenseError::Rejected(rejection_reason(body)));
    }

    let mut fields = body.split('|');
    let token = fields.next().unwrap_or_default().trim_end();
    if token != VALID_TOKEN {
        return Err(LicenseError::Malformed(format!("unexpected token: {}", token)));
    }

    let expiry = fields
        .next()
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .ok_or_else(|| LicenseError::Malformed("missing expiry field".to_string()))?;

    parse_expiry(expiry, formats).ok_or_else(|| LicenseError::UnknownDateFormat(expiry.to_string()))
}

/// Decide validity of a reply as of `now`; the expiry instant itself is still valid
pub fn evaluate(body: &str, formats: &[DateFormat], now: DateTime<Local>) -> ValidationResult {
    match parse_body(body, formats) {
        Ok(expiry) if now <= expiry => ValidationResult::valid(expiry),
        Ok(expiry) => ValidationResult::expired(expiry),
        Err(err) => ValidationResult::invalid(err),
    }
}

fn rejection_reason(body: &str) -> String {
    let first_line = body.trim().lines().next().unwrap_or_default().trim();
    if first_line.chars().count() > MAX_REASON_LEN {
        let truncated: String = first_line.chars().take(MAX_REASON_LEN).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}
