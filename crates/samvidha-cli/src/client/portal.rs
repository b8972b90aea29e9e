//! Samvidha portal HTTP client
//!
//! One cookie-backed session against the IARE Samvidha portal: a form
//! login plus one GET per scraped page. The portal speaks plain HTML, so
//! everything comes back as page text for the scrape layer to pick apart.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::Client;

use crate::error::{Result, SamvidhaError};

/// Production portal origin
pub const DEFAULT_BASE_URL: &str = "https://samvidha.iare.ac.in";

/// Login form endpoint, relative to the portal origin
const LOGIN_PATH: &str = "/pages/login/checkUser.php";

/// The portal serves empty pages to non-browser user agents
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// The scrapeable portal pages, addressed by their `action` query value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Attendance,
    Biometric,
    Register,
}

impl Resource {
    /// Value of the `action` query parameter selecting this page
    pub fn action(&self) -> &'static str {
        match self {
            Resource::Attendance => "stud_att_STD",
            Resource::Biometric => "std_bio",
            Resource::Register => "std_att_register",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Attendance => "attendance",
            Resource::Biometric => "biometric",
            Resource::Register => "register",
        };
        write!(f, "{}", name)
    }
}

/// HTTP session against the portal. Login state lives in the cookie jar,
/// so one client must be used for the login and every fetch after it.
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    /// Create a client against the production portal
    pub fn new() -> Result<Self> {
        Self::new_with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom portal origin (for testing)
    #[doc(hidden)]
    pub fn new_with_base_url(base_url: &str) -> Result<Self> {
        let cookie_jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(cookie_jar)
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(30))
            // The portal's TLS chain does not pass strict verification
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(SamvidhaError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit the login form. The portal answers 200 for bad credentials
    /// too; those only show up later as data-less pages, which the scrape
    /// layer reports as invalid credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        let form_data = [("username", username), ("password", password)];

        let response = self
            .client
            .post(&url)
            .form(&form_data)
            .send()
            .await
            .map_err(SamvidhaError::Http)?;

        if !response.status().is_success() {
            return Err(SamvidhaError::auth(format!(
                "Login rejected by portal with status {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch one portal page and return its HTML
    pub async fn fetch(&self, resource: Resource) -> Result<String> {
        let url = format!("{}/home", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("action", resource.action())])
            .send()
            .await
            .map_err(SamvidhaError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SamvidhaError::invalid_response(format!(
                "{} page returned status {}",
                resource, status
            )));
        }

        response.text().await.map_err(SamvidhaError::Http)
    }
}
