pub mod auth;
pub mod core;
