//! Errors shown inline on the login screen.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("Please enter the complete 6-digit OTP")]
    IncompleteOtp,

    #[error("Invalid OTP. Please try again.")]
    InvalidOtp,

    #[error("Failed to send OTP: {0}")]
    DispatchFailed(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    #[error("Session expired. Please log in again.")]
    SessionExpired,
}
