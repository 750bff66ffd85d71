use crate::licensing::config::APP_DATA_DIR;
use crate::licensing::types::LicenseError;
use std::path::{Path, PathBuf};

/// File holding a generated device id where no hardware id is available
const DEVICE_ID_FILE: &str = ".device_id";

/// Get platform-specific device ID
pub fn get_device_id() -> Result<String, LicenseError> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        match get_machine_device_id() {
            Ok(id) => return Ok(id),
            Err(e) => tracing::debug!(error = %e, "No machine id, using stored device id"),
        }
    }

    load_or_create_device_id(&default_device_id_path()?)
}

/// Hashed machine identifier (registry GUID, IOPlatformUUID, /etc/machine-id)
#[cfg(not(any(target_os = "ios", target_os = "android")))]
fn get_machine_device_id() -> Result<String, LicenseError> {
    use machineid_rs::{Encryption, HWIDComponent, IdBuilder};

    IdBuilder::new(Encryption::SHA256)
        .add_component(HWIDComponent::SystemID)
        .build(APP_DATA_DIR)
        .map_err(|e| LicenseError::Config(format!("Failed to read machine id: {}", e)))
}

fn default_device_id_path() -> Result<PathBuf, LicenseError> {
    let dir = dirs::data_local_dir()
        .ok_or_else(|| LicenseError::Config("Could not get local data directory".to_string()))?;

    Ok(dir.join(APP_DATA_DIR).join(DEVICE_ID_FILE))
}

/// Read the device id stored at `path`, or generate and store a new one
pub fn load_or_create_device_id(path: &Path) -> Result<String, LicenseError> {
    if let Ok(id) = std::fs::read_to_string(path) {
        let id = id.trim();
        if !id.is_empty() {
            return Ok(id.to_string());
        }
    }

    let device_id = uuid::Uuid::new_v4().to_string();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| LicenseError::Config(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    std::fs::write(path, &device_id)
        .map_err(|e| LicenseError::Config(format!("Failed to store device id: {}", e)))?;

    tracing::info!(path = %path.display(), "Generated new device id");
    Ok(device_id)
}
