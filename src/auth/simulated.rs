//! In-process stand-in for an OTP service.
//!
//! Waits a fixed latency, then succeeds. Any six-digit code is accepted;
//! this adapter exists so the console runs without a backend and is not a
//! verification policy.

use crate::auth::AuthClient;
use crate::auth::error::AuthError;
use crate::auth::session::{AuthSession, DispatchId, SessionToken};
use crate::consts::cli_consts::auth::{SIMULATED_AUTHORITY, SIMULATED_SESSION_TTL_SECS};
use crate::consts::cli_consts::login::OTP_LENGTH;
use crate::environment::Environment;
use crate::login::phone::PhoneNumber;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SimulatedAuthClient {
    environment: Environment,
    latency: Duration,
    session_ttl: chrono::Duration,
}

impl SimulatedAuthClient {
    pub fn new(latency: Duration) -> Self {
        Self {
            environment: Environment::Simulated,
            latency,
            session_ttl: chrono::Duration::seconds(SIMULATED_SESSION_TTL_SECS),
        }
    }

    #[cfg(test)]
    pub fn with_session_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}

#[async_trait::async_trait]
impl AuthClient for SimulatedAuthClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn request_otp(&self, phone: &PhoneNumber) -> Result<DispatchId, AuthError> {
        tokio::time::sleep(self.latency).await;
        let dispatch = DispatchId::new(Uuid::new_v4().to_string());
        log::debug!("Simulated OTP dispatch to {} ({})", phone.masked(), dispatch);
        Ok(dispatch)
    }

    async fn verify_otp(
        &self,
        dispatch: &DispatchId,
        code: &str,
    ) -> Result<AuthSession, AuthError> {
        tokio::time::sleep(self.latency).await;
        if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AuthError::InvalidCode);
        }
        log::debug!("Simulated verification accepted for dispatch {}", dispatch);
        AuthSession::new(
            SessionToken::new(Uuid::new_v4().simple().to_string()),
            SIMULATED_AUTHORITY,
            Utc::now(),
            self.session_ttl,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("9876543210").unwrap()
    }

    #[tokio::test]
    async fn accepts_any_six_digit_code() {
        let client = SimulatedAuthClient::new(Duration::ZERO);
        let dispatch = client.request_otp(&phone()).await.unwrap();
        let session = client.verify_otp(&dispatch, "000000").await.unwrap();
        assert_eq!(session.authority, SIMULATED_AUTHORITY);
        assert!(!session.is_expired(Utc::now()));
    }

    #[tokio::test]
    async fn rejects_malformed_codes() {
        let client = SimulatedAuthClient::new(Duration::ZERO);
        let dispatch = client.request_otp(&phone()).await.unwrap();
        assert!(matches!(
            client.verify_otp(&dispatch, "12345").await,
            Err(AuthError::InvalidCode)
        ));
        assert!(matches!(
            client.verify_otp(&dispatch, "12a456").await,
            Err(AuthError::InvalidCode)
        ));
    }

    #[tokio::test(start_paused = true)]
    /// Responses arrive only after the configured latency.
    async fn dispatch_waits_for_latency() {
        let client = SimulatedAuthClient::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();
        client.request_otp(&phone()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn dispatch_ids_are_unique() {
        let client = SimulatedAuthClient::new(Duration::ZERO);
        let a = client.request_otp(&phone()).await.unwrap();
        let b = client.request_otp(&phone()).await.unwrap();
        assert_ne!(a, b);
    }
}
