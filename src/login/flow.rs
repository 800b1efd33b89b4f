//! Login interaction state machine
//!
//! ```text
//! [PhoneEntry] --submit(10 digits), dispatch ok--> [OtpEntry]
//! [OtpEntry]   --back-->                           [PhoneEntry]
//! [OtpEntry]   --submit(6 digits), verify ok-->    [Authenticated]
//! ```
//!
//! The flow never talks to the network. Operations that need the auth
//! backend return a [`LoginCommand`]; the caller executes it and feeds the
//! outcome back through [`LoginFlow::handle_auth_event`].

use crate::auth::error::AuthError;
use crate::auth::session::{AuthSession, DispatchId};
use crate::consts::cli_consts::login::{OTP_LENGTH, RESEND_COOLDOWN_SECS};
use crate::login::error::LoginError;
use crate::login::otp::{OtpCode, SlotInput};
use crate::login::phone::{PhoneNumber, normalize_phone};
use crate::login::timer::ResendTimer;
use std::time::Instant;

/// Tags a command so that its response can be matched to the request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Work the flow needs done by an auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginCommand {
    RequestOtp {
        request: RequestId,
        phone: PhoneNumber,
    },
    VerifyOtp {
        request: RequestId,
        dispatch: DispatchId,
        code: String,
    },
}

impl LoginCommand {
    pub fn request(&self) -> RequestId {
        match self {
            LoginCommand::RequestOtp { request, .. } | LoginCommand::VerifyOtp { request, .. } => {
                *request
            }
        }
    }
}

/// Outcome of a [`LoginCommand`].
#[derive(Debug)]
pub enum AuthEvent {
    OtpDispatched {
        request: RequestId,
        result: Result<DispatchId, AuthError>,
    },
    OtpVerified {
        request: RequestId,
        result: Result<AuthSession, AuthError>,
    },
}

impl AuthEvent {
    pub fn request(&self) -> RequestId {
        match self {
            AuthEvent::OtpDispatched { request, .. } | AuthEvent::OtpVerified { request, .. } => {
                *request
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneEntry {
    input: String,
}

impl PhoneEntry {
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    phone: PhoneNumber,
    dispatch: DispatchId,
    code: OtpCode,
    focus: usize,
    resend: ResendTimer,
}

impl OtpEntry {
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn resend_remaining(&self) -> u32 {
        self.resend.remaining()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    PhoneEntry(PhoneEntry),
    OtpEntry(OtpEntry),
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingKind {
    Dispatch(PhoneNumber),
    Resend,
    Verify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    request: RequestId,
    kind: PendingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFlow {
    step: LoginStep,
    error: Option<LoginError>,
    pending: Option<Pending>,
    next_request: u64,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFlow {
    pub fn new() -> Self {
        Self {
            step: LoginStep::PhoneEntry(PhoneEntry::default()),
            error: None,
            pending: None,
            next_request: 0,
        }
    }

    /// A fresh flow that opens with `error` already shown.
    pub fn with_error(error: LoginError) -> Self {
        Self {
            error: Some(error),
            ..Self::new()
        }
    }

    pub fn error(&self) -> Option<&LoginError> {
        self.error.as_ref()
    }

    /// True while a command is in flight. All controls are inert meanwhile.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.step, LoginStep::Authenticated)
    }

    pub fn phone_entry(&self) -> Option<&PhoneEntry> {
        match &self.step {
            LoginStep::PhoneEntry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn otp_entry(&self) -> Option<&OtpEntry> {
        match &self.step {
            LoginStep::OtpEntry(entry) => Some(entry),
            _ => None,
        }
    }

    fn phone_entry_mut(&mut self) -> Option<&mut PhoneEntry> {
        if self.pending.is_some() {
            return None;
        }
        match &mut self.step {
            LoginStep::PhoneEntry(entry) => Some(entry),
            _ => None,
        }
    }

    fn otp_entry_mut(&mut self) -> Option<&mut OtpEntry> {
        if self.pending.is_some() {
            return None;
        }
        match &mut self.step {
            LoginStep::OtpEntry(entry) => Some(entry),
            _ => None,
        }
    }

    fn begin(&mut self, kind: PendingKind) -> RequestId {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.pending = Some(Pending { request, kind });
        request
    }

    // -------------------------------------------------------------------------
    // Phone step
    // -------------------------------------------------------------------------

    /// Replaces the phone input with the normalized form of `raw`.
    pub fn set_phone_input(&mut self, raw: &str) {
        if let Some(entry) = self.phone_entry_mut() {
            entry.input = normalize_phone(raw);
        }
    }

    pub fn push_phone_char(&mut self, c: char) {
        if let Some(entry) = self.phone_entry() {
            let raw = format!("{}{}", entry.input, c);
            self.set_phone_input(&raw);
        }
    }

    pub fn pop_phone_char(&mut self) {
        if let Some(entry) = self.phone_entry_mut() {
            entry.input.pop();
        }
    }

    pub fn submit_phone(&mut self) -> Option<LoginCommand> {
        let entry = self.phone_entry_mut()?;
        match PhoneNumber::parse(&entry.input) {
            Err(error) => {
                self.error = Some(error);
                None
            }
            Ok(phone) => {
                self.error = None;
                let request = self.begin(PendingKind::Dispatch(phone.clone()));
                Some(LoginCommand::RequestOtp { request, phone })
            }
        }
    }

    // -------------------------------------------------------------------------
    // OTP step
    // -------------------------------------------------------------------------

    /// Writes into one slot, advancing focus on a digit. A digit landing in
    /// the last slot with every slot filled submits the code.
    pub fn input_otp(&mut self, slot: usize, text: &str) -> Option<LoginCommand> {
        let entry = self.otp_entry_mut()?;
        let auto_submit = match entry.code.input(slot, text) {
            SlotInput::Accepted if slot < OTP_LENGTH - 1 => {
                entry.focus = slot + 1;
                false
            }
            SlotInput::Accepted => entry.code.is_complete(),
            SlotInput::Cleared => {
                entry.focus = slot;
                false
            }
            SlotInput::Rejected => false,
        };
        if auto_submit { self.submit_otp() } else { None }
    }

    /// Types into the focused slot.
    pub fn type_otp_char(&mut self, c: char) -> Option<LoginCommand> {
        let focus = self.otp_entry()?.focus;
        self.input_otp(focus, &c.to_string())
    }

    /// Backspace on the focused slot. An empty slot only moves focus left.
    pub fn backspace_otp(&mut self) {
        let Some(entry) = self.otp_entry_mut() else {
            return;
        };
        let focus = entry.focus;
        if entry.code.slot(focus).is_some() {
            entry.code.input(focus, "");
        } else if focus > 0 {
            entry.focus = focus - 1;
        }
    }

    /// Clipboard paste. Only slot 0 spreads the digits across the code; any
    /// other slot treats the text as ordinary input.
    pub fn paste_otp(&mut self, slot: usize, text: &str) -> Option<LoginCommand> {
        if slot != 0 {
            return self.input_otp(slot, text);
        }
        let entry = self.otp_entry_mut()?;
        let written = entry.code.paste(text);
        if written == 0 {
            return None;
        }
        entry.focus = (written - 1).min(OTP_LENGTH - 1);
        if written == OTP_LENGTH {
            self.submit_otp()
        } else {
            None
        }
    }

    /// Routes a paste to whichever input currently has focus.
    pub fn paste(&mut self, text: &str) -> Option<LoginCommand> {
        match &self.step {
            LoginStep::PhoneEntry(entry) => {
                let raw = format!("{}{}", entry.input, text);
                self.set_phone_input(&raw);
                None
            }
            LoginStep::OtpEntry(entry) => {
                let focus = entry.focus;
                self.paste_otp(focus, text)
            }
            LoginStep::Authenticated => None,
        }
    }

    pub fn focus_otp(&mut self, slot: usize) {
        if let Some(entry) = self.otp_entry_mut() {
            entry.focus = slot.min(OTP_LENGTH - 1);
        }
    }

    pub fn focus_previous(&mut self) {
        if let Some(focus) = self.otp_entry().map(|entry| entry.focus) {
            self.focus_otp(focus.saturating_sub(1));
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(focus) = self.otp_entry().map(|entry| entry.focus) {
            self.focus_otp(focus + 1);
        }
    }

    pub fn submit_otp(&mut self) -> Option<LoginCommand> {
        let entry = self.otp_entry_mut()?;
        match entry.code.value() {
            None => {
                self.error = Some(LoginError::IncompleteOtp);
                None
            }
            Some(code) => {
                let dispatch = entry.dispatch.clone();
                self.error = None;
                let request = self.begin(PendingKind::Verify);
                Some(LoginCommand::VerifyOtp {
                    request,
                    dispatch,
                    code,
                })
            }
        }
    }

    /// Requests a new code. Does nothing while the cooldown is running.
    pub fn resend(&mut self) -> Option<LoginCommand> {
        let entry = self.otp_entry_mut()?;
        if entry.resend.is_running() {
            return None;
        }
        entry.code.clear();
        let phone = entry.phone.clone();
        self.error = None;
        let request = self.begin(PendingKind::Resend);
        Some(LoginCommand::RequestOtp { request, phone })
    }

    /// Returns to the phone step with an empty number.
    pub fn back(&mut self) {
        if self.otp_entry_mut().is_some() {
            self.step = LoginStep::PhoneEntry(PhoneEntry::default());
            self.error = None;
        }
    }

    pub fn resend_remaining(&self) -> u32 {
        self.otp_entry()
            .map(OtpEntry::resend_remaining)
            .unwrap_or(0)
    }

    /// Drives the resend countdown.
    pub fn tick(&mut self, now: Instant) {
        if let LoginStep::OtpEntry(entry) = &mut self.step {
            entry.resend.advance(now);
        }
    }

    // -------------------------------------------------------------------------
    // Backend responses
    // -------------------------------------------------------------------------

    /// Applies a backend response. Returns the session exactly once, on the
    /// transition into [`LoginStep::Authenticated`].
    pub fn handle_auth_event(&mut self, event: AuthEvent, now: Instant) -> Option<AuthSession> {
        let pending = match &self.pending {
            Some(pending) if pending.request == event.request() => pending.clone(),
            _ => {
                log::debug!("Discarding stale auth response {:?}", event.request());
                return None;
            }
        };
        self.pending = None;

        match (pending.kind, event) {
            (PendingKind::Dispatch(phone), AuthEvent::OtpDispatched { result, .. }) => {
                match result {
                    Ok(dispatch) => {
                        self.error = None;
                        self.step = LoginStep::OtpEntry(OtpEntry {
                            phone,
                            dispatch,
                            code: OtpCode::new(),
                            focus: 0,
                            resend: ResendTimer::started(RESEND_COOLDOWN_SECS, now),
                        });
                    }
                    Err(e) => self.error = Some(LoginError::DispatchFailed(e.to_string())),
                }
                None
            }
            (PendingKind::Resend, AuthEvent::OtpDispatched { result, .. }) => {
                match result {
                    Ok(dispatch) => {
                        if let LoginStep::OtpEntry(entry) = &mut self.step {
                            entry.dispatch = dispatch;
                            entry.focus = 0;
                            entry.resend = ResendTimer::started(RESEND_COOLDOWN_SECS, now);
                        }
                    }
                    Err(e) => self.error = Some(LoginError::DispatchFailed(e.to_string())),
                }
                None
            }
            (PendingKind::Verify, AuthEvent::OtpVerified { result, .. }) => match result {
                Ok(session) => {
                    self.error = None;
                    self.step = LoginStep::Authenticated;
                    Some(session)
                }
                Err(AuthError::InvalidCode) => {
                    self.error = Some(LoginError::InvalidOtp);
                    if let LoginStep::OtpEntry(entry) = &mut self.step {
                        entry.code.clear();
                        entry.focus = 0;
                    }
                    None
                }
                Err(e) => {
                    self.error = Some(LoginError::VerificationFailed(e.to_string()));
                    None
                }
            },
            (kind, event) => {
                log::warn!("Auth response {:?} does not answer {:?}", event, kind);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionToken;
    use std::time::Duration;

    fn session() -> AuthSession {
        AuthSession::new(
            SessionToken::new("token"),
            "test",
            chrono::Utc::now(),
            chrono::Duration::hours(1),
        )
        .unwrap()
    }

    fn dispatched(flow: &mut LoginFlow, command: LoginCommand, now: Instant) {
        flow.handle_auth_event(
            AuthEvent::OtpDispatched {
                request: command.request(),
                result: Ok(DispatchId::new("dispatch-1")),
            },
            now,
        );
    }

    /// A flow sitting on the OTP step with the countdown started at `now`.
    fn at_otp_step(now: Instant) -> LoginFlow {
        let mut flow = LoginFlow::new();
        flow.set_phone_input("9876543210");
        let command = flow.submit_phone().unwrap();
        dispatched(&mut flow, command, now);
        flow
    }

    fn filled(flow: &LoginFlow) -> Vec<Option<char>> {
        flow.otp_entry().unwrap().code().slots().to_vec()
    }

    #[test]
    fn phone_input_is_normalized_on_change() {
        let mut flow = LoginFlow::new();
        flow.set_phone_input("(987) 654-32109999");
        assert_eq!(flow.phone_entry().unwrap().input(), "9876543210");
        flow.push_phone_char('x');
        flow.push_phone_char('1');
        assert_eq!(flow.phone_entry().unwrap().input(), "9876543210");
    }

    #[test]
    fn short_phone_sets_error_and_stays() {
        let mut flow = LoginFlow::new();
        for input in ["", "123", "987654321"] {
            flow.set_phone_input(input);
            assert!(flow.submit_phone().is_none());
            assert_eq!(flow.error(), Some(&LoginError::InvalidPhone));
            assert!(flow.phone_entry().is_some());
            assert!(!flow.is_loading());
        }
    }

    #[test]
    fn valid_phone_requests_otp_and_clears_error() {
        let mut flow = LoginFlow::new();
        flow.set_phone_input("12");
        flow.submit_phone();
        flow.set_phone_input("9876543210");
        let command = flow.submit_phone().unwrap();
        assert!(flow.error().is_none());
        assert!(flow.is_loading());
        match &command {
            LoginCommand::RequestOtp { phone, .. } => assert_eq!(phone.as_str(), "9876543210"),
            other => panic!("unexpected command {other:?}"),
        }
        // Controls are inert until the response lands.
        assert!(flow.submit_phone().is_none());
    }

    #[test]
    fn dispatch_success_enters_otp_step_with_cooldown() {
        let now = Instant::now();
        let flow = at_otp_step(now);
        let entry = flow.otp_entry().unwrap();
        assert_eq!(entry.resend_remaining(), 30);
        assert_eq!(entry.focus(), 0);
        assert!(flow.error().is_none());
        assert!(!flow.is_loading());
    }

    #[test]
    fn dispatch_failure_stays_on_phone_step() {
        let mut flow = LoginFlow::new();
        flow.set_phone_input("9876543210");
        let command = flow.submit_phone().unwrap();
        flow.handle_auth_event(
            AuthEvent::OtpDispatched {
                request: command.request(),
                result: Err(AuthError::Http {
                    status: 503,
                    message: "down".into(),
                }),
            },
            Instant::now(),
        );
        assert!(flow.phone_entry().is_some());
        assert!(matches!(flow.error(), Some(LoginError::DispatchFailed(_))));
        assert!(!flow.is_loading());
    }

    #[test]
    fn typing_advances_focus_and_last_slot_submits() {
        let mut flow = at_otp_step(Instant::now());
        for (slot, digit) in ["1", "2", "3", "4", "5"].iter().enumerate() {
            assert!(flow.input_otp(slot, digit).is_none());
            assert_eq!(flow.otp_entry().unwrap().focus(), slot + 1);
        }
        let command = flow.input_otp(5, "6").unwrap();
        match command {
            LoginCommand::VerifyOtp { code, dispatch, .. } => {
                assert_eq!(code, "123456");
                assert_eq!(dispatch.as_str(), "dispatch-1");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(flow.is_loading());
    }

    #[test]
    fn last_slot_without_full_code_does_not_submit() {
        let mut flow = at_otp_step(Instant::now());
        assert!(flow.input_otp(5, "6").is_none());
        assert_eq!(flow.otp_entry().unwrap().focus(), 0);
        assert!(flow.error().is_none());
    }

    #[test]
    fn non_digit_input_is_ignored() {
        let mut flow = at_otp_step(Instant::now());
        assert!(flow.input_otp(0, "a").is_none());
        assert_eq!(filled(&flow), vec![None; 6]);
        assert_eq!(flow.otp_entry().unwrap().focus(), 0);
        assert!(flow.error().is_none());
    }

    #[test]
    fn paste_fills_all_slots_and_submits() {
        let mut flow = at_otp_step(Instant::now());
        let command = flow.paste_otp(0, "123456").unwrap();
        assert_eq!(
            filled(&flow),
            vec![
                Some('1'),
                Some('2'),
                Some('3'),
                Some('4'),
                Some('5'),
                Some('6')
            ]
        );
        assert!(matches!(command, LoginCommand::VerifyOtp { .. }));
    }

    #[test]
    fn partial_paste_focuses_last_filled_slot() {
        let mut flow = at_otp_step(Instant::now());
        assert!(flow.paste_otp(0, "12 3").is_none());
        assert_eq!(flow.otp_entry().unwrap().focus(), 2);
        assert!(!flow.is_loading());
    }

    #[test]
    fn empty_paste_changes_nothing() {
        let mut flow = at_otp_step(Instant::now());
        flow.focus_otp(0);
        assert!(flow.paste_otp(0, "abc").is_none());
        assert_eq!(filled(&flow), vec![None; 6]);
        assert_eq!(flow.otp_entry().unwrap().focus(), 0);
    }

    #[test]
    /// Paste outside slot 0 keeps only the first character.
    fn paste_on_other_slot_is_plain_input() {
        let mut flow = at_otp_step(Instant::now());
        assert!(flow.paste_otp(3, "789").is_none());
        assert_eq!(filled(&flow)[3], Some('7'));
        assert_eq!(filled(&flow)[4], None);
        assert_eq!(flow.otp_entry().unwrap().focus(), 4);
    }

    #[test]
    fn backspace_on_empty_slot_moves_focus_only() {
        let mut flow = at_otp_step(Instant::now());
        flow.input_otp(0, "1");
        flow.input_otp(1, "2");
        assert_eq!(flow.otp_entry().unwrap().focus(), 2);
        flow.backspace_otp();
        assert_eq!(flow.otp_entry().unwrap().focus(), 1);
        assert_eq!(filled(&flow)[..2], [Some('1'), Some('2')]);
        // A second backspace clears the now-focused filled slot.
        flow.backspace_otp();
        assert_eq!(filled(&flow)[1], None);
        assert_eq!(flow.otp_entry().unwrap().focus(), 1);
    }

    #[test]
    fn backspace_on_first_empty_slot_is_noop() {
        let mut flow = at_otp_step(Instant::now());
        flow.backspace_otp();
        assert_eq!(flow.otp_entry().unwrap().focus(), 0);
    }

    #[test]
    fn incomplete_submit_sets_error() {
        let mut flow = at_otp_step(Instant::now());
        flow.paste_otp(0, "123");
        assert!(flow.submit_otp().is_none());
        assert_eq!(flow.error(), Some(&LoginError::IncompleteOtp));
        assert!(!flow.is_loading());
    }

    #[test]
    fn resend_is_noop_during_cooldown() {
        let now = Instant::now();
        let mut flow = at_otp_step(now);
        flow.paste_otp(0, "12");
        flow.tick(now + Duration::from_secs(29));
        assert_eq!(flow.resend_remaining(), 1);
        assert!(flow.resend().is_none());
        assert_eq!(filled(&flow)[..2], [Some('1'), Some('2')]);
    }

    #[test]
    fn resend_after_cooldown_clears_and_restarts_timer() {
        let now = Instant::now();
        let mut flow = at_otp_step(now);
        flow.paste_otp(0, "12");
        flow.submit_otp();
        assert!(flow.error().is_some());

        let later = now + Duration::from_secs(30);
        flow.tick(later);
        assert_eq!(flow.resend_remaining(), 0);

        let command = flow.resend().unwrap();
        assert_eq!(filled(&flow), vec![None; 6]);
        assert!(flow.error().is_none());
        assert!(flow.is_loading());

        flow.handle_auth_event(
            AuthEvent::OtpDispatched {
                request: command.request(),
                result: Ok(DispatchId::new("dispatch-2")),
            },
            later,
        );
        let entry = flow.otp_entry().unwrap();
        assert_eq!(entry.resend_remaining(), 30);
        assert_eq!(entry.focus(), 0);

        // The new dispatch id is used for verification.
        match flow.paste_otp(0, "654321").unwrap() {
            LoginCommand::VerifyOtp { dispatch, .. } => assert_eq!(dispatch.as_str(), "dispatch-2"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn back_returns_to_empty_phone_step() {
        let now = Instant::now();
        let mut flow = at_otp_step(now);
        flow.paste_otp(0, "12");
        flow.submit_otp();
        flow.back();
        assert_eq!(flow.phone_entry().unwrap().input(), "");
        assert!(flow.error().is_none());
        assert_eq!(flow.resend_remaining(), 0);
    }

    #[test]
    fn verified_code_yields_session_once() {
        let mut flow = at_otp_step(Instant::now());
        let command = flow.paste_otp(0, "123456").unwrap();
        let event = AuthEvent::OtpVerified {
            request: command.request(),
            result: Ok(session()),
        };
        assert!(flow.handle_auth_event(event, Instant::now()).is_some());
        assert!(flow.is_authenticated());

        let replay = AuthEvent::OtpVerified {
            request: command.request(),
            result: Ok(session()),
        };
        assert!(flow.handle_auth_event(replay, Instant::now()).is_none());
    }

    #[test]
    fn rejected_code_clears_slots() {
        let mut flow = at_otp_step(Instant::now());
        let command = flow.paste_otp(0, "123456").unwrap();
        flow.handle_auth_event(
            AuthEvent::OtpVerified {
                request: command.request(),
                result: Err(AuthError::InvalidCode),
            },
            Instant::now(),
        );
        assert_eq!(flow.error(), Some(&LoginError::InvalidOtp));
        assert_eq!(filled(&flow), vec![None; 6]);
        assert_eq!(flow.otp_entry().unwrap().focus(), 0);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut flow = LoginFlow::new();
        flow.set_phone_input("9876543210");
        let command = flow.submit_phone().unwrap();
        let stale = AuthEvent::OtpDispatched {
            request: RequestId(command.request().0 + 7),
            result: Ok(DispatchId::new("other")),
        };
        assert!(flow.handle_auth_event(stale, Instant::now()).is_none());
        assert!(flow.is_loading());
        assert!(flow.phone_entry().is_some());
    }

    #[test]
    fn countdown_stops_when_leaving_otp_step() {
        let now = Instant::now();
        let mut flow = at_otp_step(now);
        flow.back();
        flow.tick(now + Duration::from_secs(5));
        assert_eq!(flow.resend_remaining(), 0);
        assert!(flow.phone_entry().is_some());
    }
}
