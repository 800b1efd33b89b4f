//! HTTP Auth Client
//!
//! Talks JSON to a one-time password service for dispatch and verification.

use crate::auth::AuthClient;
use crate::auth::error::AuthError;
use crate::auth::session::{AuthSession, DispatchId, SessionToken};
use crate::consts::cli_consts::auth::http_timeout;
use crate::environment::Environment;
use crate::login::phone::PhoneNumber;
use chrono::Utc;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("propdeck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct RequestOtpBody<'a> {
    phone: &'a str,
}

#[derive(Debug, Deserialize)]
struct RequestOtpResponse {
    dispatch_id: String,
}

#[derive(Debug, Serialize)]
struct VerifyOtpBody<'a> {
    dispatch_id: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyOtpResponse {
    token: String,
    issuer: String,
    expires_in_secs: i64,
}

#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
    environment: Environment,
}

impl HttpAuthClient {
    pub fn new(environment: Environment, base_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = ClientBuilder::new()
            .connect_timeout(http_timeout())
            .timeout(http_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, AuthError> {
        if !response.status().is_success() {
            return Err(AuthError::from_response(response).await);
        }
        Ok(response)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }
}

#[async_trait::async_trait]
impl AuthClient for HttpAuthClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn request_otp(&self, phone: &PhoneNumber) -> Result<DispatchId, AuthError> {
        let body = RequestOtpBody {
            phone: phone.as_str(),
        };
        let response: RequestOtpResponse = self.post_json("v1/otp/request", &body).await?;
        log::debug!("OTP dispatched to {} ({})", phone.masked(), response.dispatch_id);
        Ok(DispatchId::new(response.dispatch_id))
    }

    async fn verify_otp(
        &self,
        dispatch: &DispatchId,
        code: &str,
    ) -> Result<AuthSession, AuthError> {
        let body = VerifyOtpBody {
            dispatch_id: dispatch.as_str(),
            code,
        };
        let response: VerifyOtpResponse = match self.post_json("v1/otp/verify", &body).await {
            Err(AuthError::Http { status, .. }) if matches!(status, 400 | 401 | 422) => {
                return Err(AuthError::InvalidCode);
            }
            other => other?,
        };
        AuthSession::from_ttl_secs(
            SessionToken::new(response.token),
            response.issuer,
            Utc::now(),
            response.expires_in_secs,
        )
    }
}
