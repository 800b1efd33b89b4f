use crate::auth::error::AuthError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_auth_error(&self, error: &AuthError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            AuthError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            AuthError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            AuthError::Http { status, .. } if *status == 401 => LogLevel::Error,
            AuthError::Http { status, .. } if *status == 403 => LogLevel::Error,
            AuthError::Decode(_) => LogLevel::Error,
            AuthError::InvalidResponse(_) => LogLevel::Error,
            AuthError::Aborted(_) => LogLevel::Error,

            // User typed the wrong code
            AuthError::InvalidCode => LogLevel::Warn,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
