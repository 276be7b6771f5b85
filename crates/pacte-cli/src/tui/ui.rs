use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::app::App;
use crate::display::preview_line;

/// Render the selector frame.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // table
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    render_table(f, app, chunks[0]);
    render_hints(f, chunks[1]);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Time", "Type", "File", "Preview"].map(|h| {
        Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
    }));

    let rows = app.operations.iter().map(|op| {
        Row::new([
            Cell::from(app.time_label(op)),
            Cell::from(op.kind.as_str()).style(Style::default().fg(Color::Yellow)),
            Cell::from(op.target_file_name()).style(Style::default().fg(Color::Cyan)),
            Cell::from(preview_line(op)),
        ])
    });

    let widths = [
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Percentage(30),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Undo an operation ({}) ", app.operations.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_hints(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let hints = Line::from(vec![
        Span::styled(" ↑/↓ j/k", key),
        Span::raw(" move  "),
        Span::styled("Enter", key),
        Span::raw(" undo  "),
        Span::styled("Esc/q", key),
        Span::raw(" cancel"),
    ]);
    f.render_widget(Paragraph::new(hints), area);
}
