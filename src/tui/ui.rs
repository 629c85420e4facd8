//! TUI rendering with ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::TuiState;
use super::widget::{ButtonStyle, HoldButtonWidget};
use crate::hold::Phase;

/// Draw the whole screen and return where the button landed.
pub fn draw(f: &mut Frame, state: &TuiState) -> Rect {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(f, chunks[0]);
    let button_area = draw_body(f, chunks[1], state);
    draw_footer(f, chunks[2], state);
    button_area
}

/// Draw the title bar.
fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "Hold Down Button",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .centered()
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(header, area);
}

/// Draw the counter above the button.
fn draw_body(f: &mut Frame, area: Rect, state: &TuiState) -> Rect {
    let (_, button_height) = state.style.size(state.button.label());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1), // Counter
            Constraint::Length(1),
            Constraint::Length(button_height),
            Constraint::Fill(1),
        ])
        .split(area);

    let counter = Paragraph::new(Line::from(Span::styled(
        state.count.get().to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .centered();
    f.render_widget(counter, chunks[1]);

    let button_area = button_area(chunks[3], &state.style, state.button.label());
    f.render_widget(HoldButtonWidget::new(&state.button, &state.style), button_area);
    button_area
}

/// Centre the button inside `area`, clipped to it.
pub fn button_area(area: Rect, style: &ButtonStyle, label: &str) -> Rect {
    let (width, height) = style.size(label);
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the footer bar.
fn draw_footer(f: &mut Frame, area: Rect, state: &TuiState) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::DarkGray);

    let mut help = vec![
        Span::styled(" q", key),
        Span::styled(" quit  ", hint),
        Span::styled("mouse", key),
        Span::styled(" hold the button  ", hint),
    ];
    if state.keyboard_enhanced {
        help.push(Span::styled("space", key));
        help.push(Span::styled(" hold  ", hint));
    }

    let status = match state.button.phase() {
        Phase::Idle => "idle".to_string(),
        Phase::Holding => format!("{:.0}%", state.button.session().progress() * 100.0),
        Phase::Completed => "done".to_string(),
    };
    help.push(Span::styled("│ ", hint));
    help.push(Span::styled(status, Style::default().fg(Color::Cyan)));

    let footer = Paragraph::new(Line::from(help)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(footer, area);
}
