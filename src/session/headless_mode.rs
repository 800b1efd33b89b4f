//! Headless mode execution
//!
//! Drives the login flow from stdin, one line per step, and prints activity
//! to stdout.

use super::{
    SessionData,
    messages::{print_session_prompt, print_session_signed_in, print_session_starting},
};
use crate::auth::session::AuthSession;
use crate::consts::cli_consts::login::OTP_LENGTH;
use crate::events::Event;
use crate::login::{LoginCommand, LoginError, LoginFlow};
use crate::cli_messages::{print_login_error, print_login_notice};
use std::error::Error;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

/// What a line of input did to the flow.
#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Dispatch(LoginCommand),
    Invalid(LoginError),
    Notice(String),
    Continue,
}

/// Applies one line of input. On the phone step the line is the number; on
/// the OTP step it is either `resend`, `back`, or the code pasted into slot 0.
fn apply_line(flow: &mut LoginFlow, line: &str, now: Instant) -> LineOutcome {
    flow.tick(now);

    let command = if flow.phone_entry().is_some() {
        flow.set_phone_input(line);
        flow.submit_phone()
    } else if flow.otp_entry().is_some() {
        match line {
            "resend" => match flow.resend() {
                Some(command) => return LineOutcome::Dispatch(command),
                None => {
                    return LineOutcome::Notice(format!(
                        "Resend available in {}s",
                        flow.resend_remaining()
                    ));
                }
            },
            "back" => {
                flow.back();
                return LineOutcome::Continue;
            }
            code => {
                for slot in (0..OTP_LENGTH).rev() {
                    flow.input_otp(slot, "");
                }
                flow.paste_otp(0, code).or_else(|| flow.submit_otp())
            }
        }
    } else {
        None
    };

    match command {
        Some(command) => LineOutcome::Dispatch(command),
        None => flow
            .error()
            .cloned()
            .map_or(LineOutcome::Continue, LineOutcome::Invalid),
    }
}

fn print_prompt(flow: &LoginFlow) {
    if flow.phone_entry().is_some() {
        print_session_prompt("Phone number:");
    } else if let Some(entry) = flow.otp_entry() {
        print_session_prompt(&format!(
            "OTP sent to {} (or 'resend' / 'back'):",
            entry.phone().masked()
        ));
    }
}

fn print_event(event: &Event) {
    if event.should_display() {
        println!("{}", event);
    }
}

/// Runs the login in headless mode
///
/// # Returns
/// * `Ok(AuthSession)` - The user signed in
/// * `Err` - stdin closed or the auth worker went away first
pub async fn run_headless_mode(mut session: SessionData) -> Result<AuthSession, Box<dyn Error>> {
    print_session_starting("headless", &session.environment);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut flow = LoginFlow::new();

    loop {
        print_prompt(&flow);
        let Some(line) = lines.next_line().await? else {
            return Err("stdin closed before login completed".into());
        };

        let command = match apply_line(&mut flow, line.trim(), Instant::now()) {
            LineOutcome::Dispatch(command) => command,
            LineOutcome::Invalid(error) => {
                print_login_error(&error);
                continue;
            }
            LineOutcome::Notice(notice) => {
                print_login_notice(notice);
                continue;
            }
            LineOutcome::Continue => continue,
        };

        session.auth_worker.execute(command);

        // Wait for the outcome, echoing activity in the meantime.
        loop {
            tokio::select! {
                Some(event) = session.event_receiver.recv() => print_event(&event),
                Some(result) = session.auth_receiver.recv() => {
                    while let Ok(event) = session.event_receiver.try_recv() {
                        print_event(&event);
                    }
                    if let Some(auth) = flow.handle_auth_event(result, Instant::now()) {
                        print_session_signed_in(
                            &auth.authority,
                            &auth.expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                        );
                        return Ok(auth);
                    }
                    if let Some(error) = flow.error() {
                        print_login_error(error);
                    }
                    break;
                }
                else => return Err("auth worker stopped".into()),
            }
        }
    }
}
