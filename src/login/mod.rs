//! Phone and one-time password login.

pub mod error;
pub mod flow;
pub mod otp;
pub mod phone;
pub mod timer;

pub use error::LoginError;
pub use flow::{AuthEvent, LoginCommand, LoginFlow};
