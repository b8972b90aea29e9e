use thiserror::Error;

/// Main error type for samvidha-cli
#[derive(Error, Debug)]
pub enum SamvidhaError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid credentials or unable to fetch data")]
    InvalidCredentials,

    #[error("Not logged in. Please run 'samvidha auth login' first.")]
    NotAuthenticated,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SamvidhaError>;

impl SamvidhaError {
    /// Create an authentication error from a message
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Format an error for end-user display
pub fn format_user_error(err: &SamvidhaError) -> String {
    match err {
        SamvidhaError::Http(e) if e.is_timeout() => {
            "The portal did not respond in time. Please try again later.".to_string()
        }
        SamvidhaError::Http(e) if e.is_connect() => {
            "Could not reach the portal. Check your network connection.".to_string()
        }
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SamvidhaError::Authentication("Login failed".to_string());
        assert_eq!(err.to_string(), "Authentication error: Login failed");
    }

    #[test]
    fn test_not_authenticated_error() {
        let err = SamvidhaError::NotAuthenticated;
        assert!(err.to_string().contains("samvidha auth login"));
    }

    #[test]
    fn test_invalid_credentials_error() {
        let err = SamvidhaError::InvalidCredentials;
        assert!(err.to_string().contains("Invalid credentials"));
    }

    #[test]
    fn test_error_constructors() {
        let auth_err = SamvidhaError::auth("test auth");
        assert!(matches!(auth_err, SamvidhaError::Authentication(_)));

        let config_err = SamvidhaError::config("test config");
        assert!(matches!(config_err, SamvidhaError::Config(_)));

        let response_err = SamvidhaError::invalid_response("bad response");
        assert!(matches!(response_err, SamvidhaError::InvalidResponse(_)));

        let param_err = SamvidhaError::invalid_param("bad param");
        assert!(matches!(param_err, SamvidhaError::InvalidParameter(_)));
    }

    #[test]
    fn test_format_user_error_passthrough() {
        let err = SamvidhaError::Database("locked".to_string());
        assert_eq!(format_user_error(&err), "Database error: locked");
    }
}
