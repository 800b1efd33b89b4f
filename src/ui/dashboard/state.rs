//! Dashboard state management
//!
//! The view router: which dashboard is mounted, which property is selected,
//! and the mounted dashboard's local search filter.

use crate::auth::session::AuthSession;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::ui::app::UIConfig;
use crate::ui::dashboard::data::{DashboardSource, Row, Tab, Table, filter_rows};

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;

#[derive(Debug)]
pub struct DashboardState {
    /// Session that unlocked the dashboards.
    pub session: AuthSession,
    /// The auth backend the session came from.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,

    source: Arc<dyn DashboardSource>,
    active_tab: Tab,
    /// `None` shows every property.
    selected_property: Option<&'static str>,
    search: String,
    search_mode: bool,
}

impl DashboardState {
    pub fn new(
        session: AuthSession,
        environment: Environment,
        start_time: Instant,
        ui_config: &UIConfig,
        source: Arc<dyn DashboardSource>,
    ) -> Self {
        let mut state = Self {
            session,
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            source,
            active_tab: Tab::default(),
            selected_property: None,
            search: String::new(),
            search_mode: false,
        };
        if let Some(name) = &ui_config.default_property {
            state.set_property(Some(name));
        }
        state
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn selected_property(&self) -> Option<&'static str> {
        self.selected_property
    }

    pub fn properties(&self) -> &[&'static str] {
        self.source.properties()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        self.search_mode
    }

    /// Mounts `tab`. The previous dashboard's search filter does not survive.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.active_tab {
            return;
        }
        self.active_tab = tab;
        self.search.clear();
        self.search_mode = false;
        self.add_to_activity_log(Event::router(format!("Opened {}", tab)));
    }

    pub fn next_tab(&mut self) {
        let tabs: Vec<Tab> = Tab::iter().collect();
        let index = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.select_tab(tabs[(index + 1) % tabs.len()]);
    }

    pub fn previous_tab(&mut self) {
        let tabs: Vec<Tab> = Tab::iter().collect();
        let index = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.select_tab(tabs[(index + tabs.len() - 1) % tabs.len()]);
    }

    /// Property change handed to every dashboard. Unknown names select all
    /// properties. Returns whether `name` was recognised.
    pub fn set_property(&mut self, name: Option<&str>) -> bool {
        let resolved = name.and_then(|name| {
            self.source
                .properties()
                .iter()
                .copied()
                .find(|p| p.eq_ignore_ascii_case(name))
        });
        self.show_property(resolved);
        name.is_none() || resolved.is_some()
    }

    /// Steps through "all properties" followed by each property in turn.
    pub fn cycle_property(&mut self, forward: bool) {
        let properties = self.source.properties();
        // Position 0 is "all properties".
        let slots = properties.len() + 1;
        let current = self
            .selected_property
            .and_then(|p| properties.iter().position(|q| *q == p))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let next = next.checked_sub(1).map(|i| properties[i]);
        self.show_property(next);
    }

    fn show_property(&mut self, property: Option<&'static str>) {
        if property == self.selected_property {
            return;
        }
        self.selected_property = property;
        let label = property.unwrap_or("all properties");
        self.add_to_activity_log(Event::router(format!("Showing {}", label)));
    }

    pub fn begin_search(&mut self) {
        self.search_mode = true;
    }

    pub fn end_search(&mut self) {
        self.search_mode = false;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn current_table(&self) -> &Table {
        self.source.table(self.active_tab)
    }

    /// Rows of the mounted dashboard after property and search filtering.
    pub fn visible_rows(&self) -> Vec<&Row> {
        filter_rows(self.current_table(), self.selected_property, &self.search)
    }

    pub fn is_session_expired(&self, now: DateTime<Utc>) -> bool {
        self.session.is_expired(now)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }
}
