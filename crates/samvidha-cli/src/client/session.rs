//! Login session construction
//!
//! A provider holds credentials, not a live session; every call to
//! [`SessionProvider::session`] builds a fresh client and logs it in.
//! Long-running commands get a clean cookie jar on each cycle that way.

use crate::client::portal::PortalClient;
use crate::config::PortalCredentials;
use crate::error::Result;

pub struct SessionProvider {
    credentials: PortalCredentials,
    base_url: Option<String>,
}

impl SessionProvider {
    pub fn new(credentials: PortalCredentials, base_url: Option<String>) -> Self {
        Self {
            credentials,
            base_url,
        }
    }

    /// Username the sessions will authenticate as
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Create a portal client and log it in
    pub async fn session(&self) -> Result<PortalClient> {
        let client = match &self.base_url {
            Some(base_url) => PortalClient::new_with_base_url(base_url)?,
            None => PortalClient::new()?,
        };
        client
            .login(&self.credentials.username, &self.credentials.password)
            .await?;
        Ok(client)
    }
}
