//! Dashboard info panel component
//!
//! Renders the property list and session details

use super::super::state::DashboardState;
use super::super::utils::format_duration_short;
use crate::environment::Environment;

use chrono::Utc;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    let all_selected = state.selected_property().is_none();
    info_lines.push(property_line("All Properties", all_selected));
    for property in state.properties() {
        let selected = state.selected_property() == Some(*property);
        info_lines.push(property_line(property, selected));
    }

    info_lines.push(Line::from(""));

    let env_color = match state.environment {
        Environment::Simulated => Color::Yellow,
        Environment::Production => Color::Green,
        Environment::Local | Environment::Staging => Color::LightBlue,
    };
    info_lines.push(Line::from(vec![Span::styled(
        format!("Env: {}", state.environment),
        Style::default().fg(env_color),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Issuer: {}", state.session.authority),
        Style::default().fg(Color::Cyan),
    )]));

    let remaining = state.session.remaining(Utc::now()).num_seconds();
    let session_color = if remaining < 300 {
        Color::LightRed
    } else {
        Color::LightGreen
    };
    info_lines.push(Line::from(vec![Span::styled(
        format!("Session: {}", format_duration_short(remaining)),
        Style::default().fg(session_color),
    )]));

    let uptime = state.start_time.elapsed().as_secs() as i64;
    info_lines.push(Line::from(vec![Span::styled(
        format!("Uptime: {}", format_duration_short(uptime)),
        Style::default().fg(Color::LightCyan),
    )]));

    let info_block = Block::default()
        .title("PROPERTIES")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}

fn property_line(name: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {}", name),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("  {}", name),
            Style::default().fg(Color::Gray),
        ))
    }
}
