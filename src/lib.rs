//! Remote license validation for embedded applications.
//!
//! A check locates the host ([`LocationResolver`]), asks the license
//! authority about the configured key ([`LicenseValidator`]) and hands the
//! caller a [`ValidationResult`]. [`LicenseManager`] runs both steps.

pub mod licensing;

pub use licensing::{
    DateFormat, LicenseConfig, LicenseError, LicenseManager, LicenseValidator, LocationConfig,
    LocationInfo, LocationResolver, ValidationQuery, ValidationResult,
};
