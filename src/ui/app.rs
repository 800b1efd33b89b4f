//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::auth::session::AuthSession;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::consts::cli_consts::ui::{poll_interval, splash_duration};
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::login::{AuthEvent, LoginCommand, LoginError, LoginFlow};
use crate::ui::dashboard::{DashboardSource, DashboardState, render_dashboard};
use crate::ui::login::render_login;
use crate::ui::splash::render_splash;
use crate::workers::auth::AuthWorker;
use crate::workers::core::EventSender;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone, Default)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Property selected when a dashboard first mounts.
    pub default_property: Option<String>,
}

impl UIConfig {
    pub fn new(with_background_color: bool, default_property: Option<String>) -> Self {
        Self {
            with_background_color,
            default_property,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Phone and OTP entry.
    Login(Box<LoginFlow>),
    /// Property dashboards, only reachable with a live session.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The auth backend in use.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Executes login commands off the UI thread.
    auth_worker: AuthWorker,

    /// Receives outcomes of login commands.
    auth_receiver: mpsc::Receiver<AuthEvent>,

    /// Receives activity events from workers.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Emits activity events originating on the UI thread.
    events: EventSender,

    /// Activity that arrives before a dashboard is mounted.
    backlog: VecDeque<WorkerEvent>,

    source: Arc<dyn DashboardSource>,

    ui_config: UIConfig,

    should_quit: bool,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        auth_worker: AuthWorker,
        auth_receiver: mpsc::Receiver<AuthEvent>,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        events: EventSender,
        ui_config: UIConfig,
        source: Arc<dyn DashboardSource>,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            auth_worker,
            auth_receiver,
            event_receiver,
            events,
            backlog: VecDeque::new(),
            source,
            ui_config,
            should_quit: false,
        }
    }

    pub fn current_screen(&self) -> &Screen {
        &self.current_screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn leave_splash(&mut self) {
        if matches!(self.current_screen, Screen::Splash) {
            self.current_screen = Screen::Login(Box::new(LoginFlow::new()));
        }
    }

    fn dispatch(&self, command: Option<LoginCommand>) {
        if let Some(command) = command {
            log::debug!("Dispatching login command {:?}", command.request());
            self.auth_worker.execute(command);
        }
    }

    fn enter_dashboard(&mut self, session: AuthSession) {
        self.events.try_send_event(WorkerEvent::login_with_level(
            format!("Signed in via {}", session.authority),
            EventType::Success,
            LogLevel::Info,
        ));
        let mut state = DashboardState::new(
            session,
            self.environment.clone(),
            self.start_time,
            &self.ui_config,
            self.source.clone(),
        );
        for event in self.backlog.drain(..) {
            state.add_event(event);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    fn expire_session(&mut self) {
        self.events.try_send_event(WorkerEvent::login_with_level(
            LoginError::SessionExpired.to_string(),
            EventType::Error,
            LogLevel::Warn,
        ));
        self.current_screen =
            Screen::Login(Box::new(LoginFlow::with_error(LoginError::SessionExpired)));
    }

    /// Drains worker channels and advances timers.
    pub fn poll_background(&mut self, now: Instant) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match &mut self.current_screen {
                Screen::Dashboard(state) => state.add_event(event),
                _ => {
                    if self.backlog.len() >= MAX_ACTIVITY_LOGS {
                        self.backlog.pop_front();
                    }
                    self.backlog.push_back(event);
                }
            }
        }

        while let Ok(event) = self.auth_receiver.try_recv() {
            let session = match &mut self.current_screen {
                Screen::Login(flow) => flow.handle_auth_event(event, now),
                _ => {
                    log::debug!("Dropping auth response {:?} outside login", event.request());
                    None
                }
            };
            if let Some(session) = session {
                self.enter_dashboard(session);
            }
        }

        let expired = match &mut self.current_screen {
            Screen::Splash => false,
            Screen::Login(flow) => {
                flow.tick(now);
                false
            }
            Screen::Dashboard(state) => {
                state.update();
                state.is_session_expired(Utc::now())
            }
        };
        if expired {
            self.expire_session();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match &mut self.current_screen {
            Screen::Splash => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.should_quit = true;
                } else {
                    self.leave_splash();
                }
            }
            Screen::Login(flow) => {
                let (command, quit) = handle_login_key(flow, key);
                self.should_quit |= quit;
                self.dispatch(command);
            }
            Screen::Dashboard(state) => {
                self.should_quit |= handle_dashboard_key(state, key);
            }
        }
    }

    /// Bracketed paste from the terminal.
    pub fn handle_paste(&mut self, text: &str) {
        match &mut self.current_screen {
            Screen::Splash => {}
            Screen::Login(flow) => {
                let command = flow.paste(text);
                self.dispatch(command);
            }
            Screen::Dashboard(state) => {
                if state.is_searching() {
                    text.chars()
                        .filter(|c| !c.is_control())
                        .for_each(|c| state.push_search_char(c));
                }
            }
        }
    }
}

/// Returns the command to run, if any, and whether to quit.
fn handle_login_key(flow: &mut LoginFlow, key: KeyEvent) -> (Option<LoginCommand>, bool) {
    if flow.phone_entry().is_some() {
        match key.code {
            KeyCode::Esc => return (None, true),
            KeyCode::Char(c) if c.is_ascii_digit() => flow.push_phone_char(c),
            KeyCode::Backspace => flow.pop_phone_char(),
            KeyCode::Enter => return (flow.submit_phone(), false),
            _ => {}
        }
    } else if flow.otp_entry().is_some() {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => return (flow.type_otp_char(c), false),
            KeyCode::Char('r') => return (flow.resend(), false),
            KeyCode::Char('b') | KeyCode::Esc => flow.back(),
            KeyCode::Backspace => flow.backspace_otp(),
            KeyCode::Left => flow.focus_previous(),
            KeyCode::Right => flow.focus_next(),
            KeyCode::Enter => return (flow.submit_otp(), false),
            _ => {}
        }
    }
    (None, false)
}

/// Returns whether to quit.
fn handle_dashboard_key(state: &mut DashboardState, key: KeyEvent) -> bool {
    if state.is_searching() {
        match key.code {
            KeyCode::Esc => {
                state.clear_search();
                state.end_search();
            }
            KeyCode::Enter => state.end_search(),
            KeyCode::Backspace => state.pop_search_char(),
            KeyCode::Char(c) => state.push_search_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::Right => state.next_tab(),
        KeyCode::BackTab | KeyCode::Left => state.previous_tab(),
        KeyCode::Char(']') => state.cycle_property(true),
        KeyCode::Char('[') => state.cycle_property(false),
        KeyCode::Char('a') => {
            state.set_property(None);
        }
        KeyCode::Char('/') => state.begin_search(),
        KeyCode::Char('c') => state.clear_search(),
        _ => {}
    }
    false
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    // UI event loop
    loop {
        app.poll_background(Instant::now());
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit {
            return Ok(());
        }

        // Handle splash-to-login transition
        if matches!(app.current_screen, Screen::Splash) && splash_start.elapsed() >= splash_duration()
        {
            app.leave_splash();
            continue;
        }

        if event::poll(poll_interval())? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match &app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Login(flow) => render_login(
            f,
            flow,
            &app.environment,
            app.ui_config.with_background_color,
        ),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
