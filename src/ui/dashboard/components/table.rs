//! Dashboard table component
//!
//! Renders the mounted dashboard's rows after filtering

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Row, Table};

pub fn render_table_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let table = state.current_table();
    let rows = state.visible_rows();

    let header = Row::new(
        std::iter::once("Property")
            .chain(table.columns.iter().copied())
            .map(|title| Cell::from(title).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::LightBlue))
    .bottom_margin(1);

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(
                std::iter::once(row.property)
                    .chain(row.cells.iter().copied())
                    .map(Cell::from),
            )
        })
        .collect();

    // Property column first, remaining columns share the rest evenly.
    let column_count = table.columns.len() as u32;
    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(18))
        .chain((0..column_count).map(|_| Constraint::Ratio(1, column_count.max(1))))
        .collect();

    let search_title = if state.is_searching() {
        Span::styled(
            format!(" search: {}_ ", state.search()),
            Style::default().fg(Color::LightYellow),
        )
    } else if !state.search().is_empty() {
        Span::styled(
            format!(" filter: {} ", state.search()),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::raw("")
    };

    let title = Line::from(vec![
        Span::raw(format!(
            "{} ({} of {})",
            table.title.to_uppercase(),
            rows.len(),
            table.rows.len()
        )),
        search_title,
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let widget = Table::new(body, widths)
        .header(header)
        .block(block)
        .column_spacing(2);

    f.render_widget(widget, area);
}
