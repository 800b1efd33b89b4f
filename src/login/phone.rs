//! Phone number capture.

use crate::consts::cli_consts::login::PHONE_DIGITS;
use crate::login::error::LoginError;
use std::fmt::{Display, Formatter};

/// Strips every non-digit from `raw` and keeps at most the first ten digits.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect()
}

/// A phone number of exactly ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses `raw` after normalization; the result must hold exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, LoginError> {
        let digits = normalize_phone(raw);
        if digits.len() != PHONE_DIGITS {
            return Err(LoginError::InvalidPhone);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All but the last four digits hidden, for logs.
    pub fn masked(&self) -> String {
        let visible = &self.0[PHONE_DIGITS - 4..];
        format!("{}{}", "*".repeat(PHONE_DIGITS - 4), visible)
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", &self.0[..5], &self.0[5..])
    }
}
