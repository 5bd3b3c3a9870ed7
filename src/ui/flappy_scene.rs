//! Play area rendering: sky, pipes, ground and the bird, scaled from the
//! 400x600 logical canvas to whatever cell grid is available.

use gestureflap::core::constants::*;
use gestureflap::simulation::GameState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::game_common::{render_game_over_overlay, render_panel_frame, render_status_bar};
use super::GameView;

const PIPE_COLOR: Color = Color::Green;
const PIPE_HIGHLIGHT: Color = Color::LightGreen;
const GROUND_COLOR: Color = Color::Rgb(222, 184, 135);
const BIRD_COLOR: Color = Color::Yellow;

/// What occupies one display cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Sky,
    Pipe,
    PipeLip,
    Ground,
    Bird,
}

/// Render the game panel: play area plus a 2-line status bar.
pub fn render_flappy(frame: &mut Frame, area: Rect, view: &GameView) {
    let inner = render_panel_frame(frame, area, " Flappy Fist ", Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(2)])
        .split(inner);

    render_play_area(frame, chunks[0], view.state);
    render_status(frame, chunks[1], view);

    if view.state.is_game_over() {
        render_game_over_overlay(
            frame,
            chunks[0],
            view.state.score,
            view.stats.high_score.get(),
            "Close fist to restart",
        );
    }
}

fn render_play_area(frame: &mut Frame, area: Rect, state: &GameState) {
    let grid = play_area_cells(state, area.width as usize, area.height as usize);
    let bird_glyph = bird_glyph(state.bird.rotation);

    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        Cell::Sky => Span::raw(" "),
                        Cell::Pipe => Span::styled("█", Style::default().fg(PIPE_COLOR)),
                        Cell::PipeLip => Span::styled("▓", Style::default().fg(PIPE_HIGHLIGHT)),
                        Cell::Ground => Span::styled("▒", Style::default().fg(GROUND_COLOR)),
                        Cell::Bird => Span::styled(
                            bird_glyph,
                            Style::default().fg(BIRD_COLOR).add_modifier(Modifier::BOLD),
                        ),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Bird sprite by tilt: nose up while rising, down while diving.
pub fn bird_glyph(rotation: f64) -> &'static str {
    if rotation < -10.0 {
        "▲"
    } else if rotation > 20.0 {
        "▼"
    } else {
        "►"
    }
}

/// Rasterize the snapshot into `width` x `height` cells.
///
/// Each cell samples the canvas at its center. The bird always occupies the
/// cell containing its center, even when the grid is coarser than the bird.
pub fn play_area_cells(state: &GameState, width: usize, height: usize) -> Vec<Vec<Cell>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let x_scale = CANVAS_WIDTH / width as f64;
    let y_scale = CANVAS_HEIGHT / height as f64;
    // Rows covered by the lip drawn at each end of the gap
    let lip = y_scale.max(BIRD_HALF);

    let mut grid = vec![vec![Cell::Sky; width]; height];
    for (row, cells) in grid.iter_mut().enumerate() {
        let y = (row as f64 + 0.5) * y_scale;
        for (col, cell) in cells.iter_mut().enumerate() {
            let x = (col as f64 + 0.5) * x_scale;
            if y >= GROUND_Y {
                *cell = Cell::Ground;
                continue;
            }
            for pipe in &state.pipes {
                if x < pipe.x || x >= pipe.trailing_edge() {
                    continue;
                }
                if y < pipe.gap_top - lip || y >= pipe.gap_bottom() + lip {
                    *cell = Cell::Pipe;
                } else if y < pipe.gap_top || y >= pipe.gap_bottom() {
                    *cell = Cell::PipeLip;
                }
            }
        }
    }

    let bird_col = (state.bird.x / x_scale) as usize;
    let bird_row = (state.bird.y / y_scale) as usize;
    if bird_row < height && bird_col < width {
        grid[bird_row][bird_col] = Cell::Bird;
    }
    grid
}

fn render_status(frame: &mut Frame, area: Rect, view: &GameView) {
    let state = view.state;
    let (text, color) = if state.is_game_over() {
        (format!("Crashed with {} points", state.score), Color::Red)
    } else {
        (
            format!(
                "Score: {}   Best: {}   Flaps: {}",
                state.score,
                view.stats.high_score.get(),
                state.flap_count
            ),
            Color::Green,
        )
    };
    render_status_bar(frame, area, &text, color, view.controls);
}
