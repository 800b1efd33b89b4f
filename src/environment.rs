use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the authentication backends the console can talk to.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Environment {
    /// In-process simulated backend. Accepts any six-digit code.
    #[default]
    Simulated,
    /// Local development backend.
    Local,
    /// Staging backend for pre-production testing.
    Staging,
    /// Production backend.
    Production,
}

impl Environment {
    /// Returns the auth service URL associated with the environment, if any.
    pub fn auth_url(&self) -> Option<String> {
        match self {
            Environment::Simulated => None,
            Environment::Local => Some("http://localhost:8088".to_string()),
            Environment::Staging => Some("https://auth.staging.propdeck.app".to_string()),
            Environment::Production => Some("https://auth.propdeck.app".to_string()),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simulated" | "mock" => Ok(Environment::Simulated),
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Simulated => write!(f, "Simulated"),
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.auth_url() {
            Some(url) => write!(f, "Environment::{}, URL: {}", self, url),
            None => write!(f, "Environment::{}", self),
        }
    }
}
