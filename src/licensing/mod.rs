// Licensing system module
// Location lookup, license authority client and the expiry decision

pub mod types;
pub mod config;
pub mod expiry;
pub mod device;
pub mod location;
pub mod validator;
pub mod manager;

pub use types::*;
pub use config::*;
pub use expiry::DateFormat;
pub use location::LocationResolver;
pub use validator::LicenseValidator;
pub use manager::LicenseManager;
