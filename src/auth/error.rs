//! Error handling for the auth module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Failed to decode a JSON body from the server
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered with a body that cannot describe a session.
    #[error("Invalid response from auth server: {0}")]
    InvalidResponse(String),

    /// The task running the request ended without an answer.
    #[error("Auth request aborted: {0}")]
    Aborted(String),

    /// The backend refused the one-time password.
    #[error("The one-time password was rejected")]
    InvalidCode,
}

impl AuthError {
    pub async fn from_response(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        AuthError::Http { status, message }
    }
}
