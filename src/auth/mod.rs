use crate::auth::error::AuthError;
use crate::auth::session::{AuthSession, DispatchId};
use crate::environment::Environment;
use crate::login::phone::PhoneNumber;

pub(crate) mod client;
pub use client::HttpAuthClient;
pub mod error;
pub mod session;
pub(crate) mod simulated;
pub use simulated::SimulatedAuthClient;

#[cfg(test)]
use mockall::automock;

/// Boundary between the login flow and whatever issues one-time passwords.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AuthClient: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Sends a one-time password to the given phone number.
    async fn request_otp(&self, phone: &PhoneNumber) -> Result<DispatchId, AuthError>;

    /// Exchanges a dispatched one-time password for a session.
    async fn verify_otp(&self, dispatch: &DispatchId, code: &str)
    -> Result<AuthSession, AuthError>;
}
