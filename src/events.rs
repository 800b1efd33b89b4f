//! Event System
//!
//! Activity events emitted by the login flow and the auth worker

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Source {
    /// The login interaction itself (validation, transitions).
    Login,
    /// Worker talking to the auth backend.
    AuthClient,
    /// The dashboard view router.
    Router,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Waiting,
    Navigation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn login_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Login, msg, event_type, log_level)
    }

    pub fn auth_client_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::AuthClient, msg, event_type, log_level)
    }

    pub fn router(msg: String) -> Self {
        Self::new(Source::Router, msg, EventType::Navigation, LogLevel::Info)
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
