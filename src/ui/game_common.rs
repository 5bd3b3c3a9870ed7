//! Shared UI building blocks: status bar, info panel frame and centered
//! overlays.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Status line above a row of (key, action) hints, both centered.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    let mut lines = vec![Line::styled(
        status_text.to_string(),
        Style::default().fg(status_color),
    )];

    let hints: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(key.to_string(), Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    if !hints.is_empty() {
        lines.push(Line::from(hints));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Bordered panel with a title. Returns the inner area.
pub fn render_panel_frame(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Rect of at most `width` x `height` centered in `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Centered bordered modal over whatever is already drawn in `area`.
pub fn render_modal(
    frame: &mut Frame,
    area: Rect,
    border_color: Color,
    width: u16,
    lines: Vec<Line<'_>>,
) {
    // Two border rows plus content
    let height = lines.len() as u16 + 2;
    let modal = centered_rect(area, width, height);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).border_style(
        Style::default()
            .fg(border_color)
            .add_modifier(Modifier::BOLD),
    );
    let inner = block.inner(modal);
    frame.render_widget(block, modal);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Game-over box: title, final score and the restart hint.
pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    score: u32,
    high_score: u32,
    restart_hint: &str,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if score > 0 && score >= high_score {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default().fg(Color::Cyan),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("High score: {}", high_score),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        restart_hint,
        Style::default().fg(Color::Yellow),
    )));

    render_modal(frame, area, Color::Red, 30, lines);
}
