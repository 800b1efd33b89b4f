//! Dashboard main renderer

use super::components::{footer, header, info_panel, logs, table};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(main_chunks[1]);

    info_panel::render_info_panel(f, content_chunks[0], state);
    table::render_table_panel(f, content_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{AuthSession, SessionToken};
    use crate::environment::Environment;
    use crate::ui::app::UIConfig;
    use crate::ui::dashboard::data::{SampleData, Tab};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use std::time::Instant;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_selected_dashboard_rows() {
        let session = AuthSession::new(
            SessionToken::new("t"),
            "propdeck-simulator",
            chrono::Utc::now(),
            chrono::Duration::hours(1),
        )
        .unwrap();
        let mut state = DashboardState::new(
            session,
            Environment::Simulated,
            Instant::now(),
            &UIConfig::new(false, Some("Marigold Commons".to_string())),
            Arc::new(SampleData),
        );
        state.select_tab(Tab::CityManagement);

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, &state)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("CITY MANAGEMENT (1 of 4)"));
        assert!(text.contains("Pune"));
        assert!(!text.contains("Mumbai"));
    }
}
