//! CLI command messaging
//!
//! Tagged one-line output for `set-property`, `start` warnings and the
//! headless login loop.

use crate::login::LoginError;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Info => "\x1b[1;33m[INFO]\x1b[0m",
            Tag::Warn => "\x1b[1;91m[WARN]\x1b[0m",
            Tag::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            Tag::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

fn tagged(tag: Tag, title: &str, details: Option<&dyn Display>) -> String {
    match details {
        Some(details) => format!("{} {}\t {}", tag.label(), title, details),
        None => format!("{} {}", tag.label(), title),
    }
}

/// A login step refused its input or the backend answered with an error.
pub fn print_login_error(error: &LoginError) {
    println!("{}", tagged(Tag::Error, &error.to_string(), None));
}

/// Informational note from the headless login loop.
pub fn print_login_notice(notice: impl Display) {
    println!("{}", tagged(Tag::Info, "Login", Some(&notice)));
}

pub fn print_unknown_property(name: &str) {
    let details = format!("{} is not a known property; showing all properties", name);
    println!("{}", tagged(Tag::Warn, "Unknown property", Some(&details)));
}

pub fn print_default_property_saved(property: &str) {
    println!(
        "{}",
        tagged(Tag::Success, "Default property saved", Some(&property))
    );
}
