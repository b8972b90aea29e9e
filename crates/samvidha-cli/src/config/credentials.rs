use crate::error::{Result, SamvidhaError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CREDENTIALS_FILENAME: &str = "credentials.json";
const SERVICE_NAME: &str = "samvidha-cli";

/// Portal login credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalCredentials {
    pub username: String,
    pub password: String,
}

/// Manages credential storage for portal logins.
/// Supports file-based storage with optional keyring integration.
pub struct CredentialStore {
    profile: String,
    base_dir: PathBuf,
}

impl CredentialStore {
    /// Create a new credential store for the given profile
    pub fn new(profile: Option<String>) -> Result<Self> {
        let profile = profile.unwrap_or_else(|| "default".to_string());
        let base_dir = super::data_dir()?.join(&profile);
        super::ensure_dir(&base_dir)?;

        Ok(Self { profile, base_dir })
    }

    /// Create a credential store with a custom base directory (for testing)
    pub fn with_dir(profile: impl Into<String>, base_dir: PathBuf) -> Result<Self> {
        let profile = profile.into();
        let dir = base_dir.join(&profile);
        super::ensure_dir(&dir)?;

        Ok(Self {
            profile,
            base_dir: dir,
        })
    }

    /// Get the profile name
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Save credentials to storage
    pub fn save(&self, credentials: &PortalCredentials) -> Result<()> {
        let path = self.base_dir.join(CREDENTIALS_FILENAME);
        let json = serde_json::to_string_pretty(credentials)?;
        fs::write(&path, json)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Load credentials from storage
    pub fn load(&self) -> Result<Option<PortalCredentials>> {
        let path = self.base_dir.join(CREDENTIALS_FILENAME);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let credentials: PortalCredentials = serde_json::from_str(&json)?;
        Ok(Some(credentials))
    }

    /// Check if credentials exist
    pub fn has_credentials(&self) -> bool {
        self.base_dir.join(CREDENTIALS_FILENAME).exists()
    }

    /// Clear stored credentials
    pub fn clear(&self) -> Result<()> {
        let path = self.base_dir.join(CREDENTIALS_FILENAME);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Try to store the portal password in the system keyring
    /// Falls back silently if keyring is not available
    pub fn store_password_in_keyring(&self, password: &str) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE_NAME, &self.profile)
            .map_err(|e| SamvidhaError::Keyring(e.to_string()))?;

        entry
            .set_password(password)
            .map_err(|e| SamvidhaError::Keyring(e.to_string()))?;

        Ok(())
    }

    /// Try to load the portal password from the system keyring
    pub fn load_password_from_keyring(&self) -> Result<Option<String>> {
        let entry = keyring::Entry::new(SERVICE_NAME, &self.profile)
            .map_err(|e| SamvidhaError::Keyring(e.to_string()))?;

        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SamvidhaError::Keyring(e.to_string())),
        }
    }

    /// Delete the portal password from the system keyring
    pub fn delete_password_from_keyring(&self) -> Result<()> {
        let entry = keyring::Entry::new(SERVICE_NAME, &self.profile)
            .map_err(|e| SamvidhaError::Keyring(e.to_string()))?;

        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(SamvidhaError::Keyring(e.to_string())),
        }
    }
}
