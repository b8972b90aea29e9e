mod credentials;

pub use credentials::{CredentialStore, PortalCredentials};

use crate::error::{Result, SamvidhaError};
use std::path::PathBuf;

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = "samvidha";

/// Get the configuration directory path
/// Returns ~/.config/samvidha on Unix, ~/Library/Application Support/samvidha on macOS
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(CONFIG_DIR_NAME))
        .ok_or_else(|| SamvidhaError::config("Could not determine config directory"))
}

/// Get the data directory path for storing credentials and history
/// Returns ~/.local/share/samvidha on Unix, ~/Library/Application Support/samvidha on macOS
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(CONFIG_DIR_NAME))
        .ok_or_else(|| SamvidhaError::config("Could not determine data directory"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
