//! Login screen module
//!
//! Phone entry and OTP entry share one centred card.

use crate::consts::cli_consts::login::OTP_LENGTH;
use crate::environment::Environment;
use crate::login::LoginFlow;
use crate::login::flow::{OtpEntry, PhoneEntry};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 16;

/// Renders whichever login step is active.
pub fn render_login(
    f: &mut Frame,
    flow: &LoginFlow,
    environment: &Environment,
    with_background_color: bool,
) {
    if with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let area = centered(f.area(), CARD_WIDTH, CARD_HEIGHT);

    let mut lines = Vec::new();
    if let Some(entry) = flow.phone_entry() {
        phone_lines(&mut lines, entry, flow.is_loading());
    } else if let Some(entry) = flow.otp_entry() {
        otp_lines(&mut lines, entry, flow.is_loading());
    } else if flow.is_authenticated() {
        lines.push(Line::from(Span::styled(
            "Signed in",
            Style::default().fg(Color::LightGreen),
        )));
    }

    lines.push(Line::from(""));
    if let Some(error) = flow.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .title(" PROPDECK LOGIN ")
        .title_bottom(Line::from(format!(" {} ", environment)).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let card = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(card, area);
}

fn phone_lines(lines: &mut Vec<Line<'static>>, entry: &PhoneEntry, loading: bool) {
    lines.push(Line::from(Span::styled(
        "Enter your phone number",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let input = if entry.input().is_empty() {
        Span::styled("__________", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("{}_", entry.input()),
            Style::default().fg(Color::LightYellow),
        )
    };
    lines.push(Line::from(vec![
        Span::styled("+91 ", Style::default().fg(Color::Gray)),
        input,
    ]));
    lines.push(Line::from(""));

    if loading {
        lines.push(waiting_line("Sending OTP..."));
    } else {
        lines.push(hint_line("[Enter] Send OTP | [Esc] Quit"));
    }
}

fn otp_lines(lines: &mut Vec<Line<'static>>, entry: &OtpEntry, loading: bool) {
    lines.push(Line::from(Span::styled(
        format!("Enter the code sent to {}", entry.phone().masked()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let mut slots = Vec::with_capacity(OTP_LENGTH * 2);
    for (index, slot) in entry.code().slots().iter().enumerate() {
        let text = format!("[{}]", slot.unwrap_or(' '));
        let style = if index == entry.focus() && !loading {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::LightYellow)
        };
        slots.push(Span::styled(text, style));
        slots.push(Span::raw(" "));
    }
    lines.push(Line::from(slots));
    lines.push(Line::from(""));

    if loading {
        lines.push(waiting_line("Please wait..."));
        return;
    }

    let remaining = entry.resend_remaining();
    if remaining > 0 {
        lines.push(Line::from(Span::styled(
            format!("Resend OTP in {}s", remaining),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(hint_line("[R] Resend OTP"));
    }
    lines.push(hint_line("[Enter] Verify | [←→] Move | [B] Change number"));
}

fn waiting_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn hint_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    card
}
