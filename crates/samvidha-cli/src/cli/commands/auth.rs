//! Authentication commands for samvidha-cli

use crate::client::SessionProvider;
use crate::config::{CredentialStore, PortalCredentials};
use crate::error::{Result, SamvidhaError};
use crate::scrape::ScrapeEngine;
use std::io::{self, Write};

/// Execute the login command
pub async fn login(
    username: Option<String>,
    profile: Option<String>,
    portal_url: Option<String>,
) -> Result<()> {
    let store = CredentialStore::new(profile)?;

    // Check if already logged in
    if store.has_credentials() {
        println!("Already logged in. Use 'samvidha auth logout' to log out first.");
        return Ok(());
    }

    // Get username
    let username = match username {
        Some(u) => u,
        None => {
            print!("Roll number: ");
            io::stdout().flush()?;
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            input.trim().to_string()
        }
    };

    // Get password
    let password = rpassword_prompt("Password: ")?;

    let credentials = PortalCredentials { username, password };

    println!("Logging in...");

    // The portal accepts any login form, so verify by scraping: only a
    // real session comes back with a student info block
    let provider = SessionProvider::new(credentials.clone(), portal_url);
    let client = provider.session().await?;
    let report = ScrapeEngine::new(client).run().await?;

    store.save(&credentials)?;
    // Mirror the password into the keyring when one is available
    let _ = store.store_password_in_keyring(&credentials.password);

    println!("Successfully logged in!");
    println!("Profile: {}", store.profile());
    if let Some(name) = report.student_info.name() {
        println!("Student: {}", name);
    }

    Ok(())
}

/// Execute the logout command
pub async fn logout(profile: Option<String>) -> Result<()> {
    let store = CredentialStore::new(profile)?;

    if !store.has_credentials() {
        println!("Not logged in.");
        return Ok(());
    }

    store.clear()?;
    // Also try to clear keyring (ignore errors)
    let _ = store.delete_password_from_keyring();

    println!("Successfully logged out.");
    Ok(())
}

/// Execute the status command
pub async fn status(profile: Option<String>) -> Result<()> {
    let store = CredentialStore::new(profile)?;

    if !store.has_credentials() {
        println!("Status: Not logged in");
        println!("Run 'samvidha auth login' to authenticate.");
        return Ok(());
    }

    match store.load()? {
        Some(credentials) => {
            println!("Status: Logged in");
            println!("Profile: {}", store.profile());
            println!("Username: {}", credentials.username);

            if let Ok(Some(_)) = store.load_password_from_keyring() {
                println!("Keyring: Password mirrored");
            }
        }
        None => {
            println!("Status: Credentials corrupted");
            println!("Run 'samvidha auth logout' then 'samvidha auth login' to fix.");
        }
    }

    Ok(())
}

/// Load stored credentials into a session provider
pub(crate) fn load_provider(
    profile: Option<String>,
    portal_url: Option<String>,
) -> Result<SessionProvider> {
    let store = CredentialStore::new(profile)?;
    let credentials = store.load()?.ok_or(SamvidhaError::NotAuthenticated)?;
    Ok(SessionProvider::new(credentials, portal_url))
}

/// Prompt for password without echoing
fn rpassword_prompt(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let password = rpassword::read_password()
        .map_err(|e| SamvidhaError::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))?;

    Ok(password)
}
