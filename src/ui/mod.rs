//! Terminal rendering. Everything here is a pure function of a [`GameView`];
//! nothing feeds back into the simulation.

pub mod flappy_scene;
pub mod game_common;
pub mod gesture_panel;

use gestureflap::controller::SessionStats;
use gestureflap::gesture::{GestureReading, LandmarkSet};
use gestureflap::simulation::GameState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use game_common::{render_modal, render_panel_frame};

/// Everything the renderer needs for one frame.
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub stats: &'a SessionStats,
    pub reading: GestureReading,
    pub landmarks: Option<&'a LandmarkSet>,
    /// Where landmarks come from ("keyboard", "replay").
    pub source: &'a str,
    pub controls: &'a [(&'a str, &'a str)],
    pub show_instructions: bool,
}

/// Width of the right-hand column (hand view + scores).
const SIDE_PANEL_WIDTH: u16 = 32;

pub fn draw(frame: &mut Frame, view: &GameView) {
    let size = frame.size();

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(size);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(h_chunks[1]);

    flappy_scene::render_flappy(frame, h_chunks[0], view);
    gesture_panel::render_gesture_panel(frame, side[0], view.reading, view.landmarks, view.source);
    render_score_panel(frame, side[1], view.stats);

    if view.show_instructions {
        render_instructions(frame, size);
    }
}

fn render_score_panel(frame: &mut Frame, area: Rect, stats: &SessionStats) {
    let inner = render_panel_frame(frame, area, " Scores ", Color::DarkGray);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let row = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!(" {:<12}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let lines = vec![
        row("Score", stats.score.to_string(), Color::Green),
        row("High score", stats.high_score.get().to_string(), Color::Rgb(255, 165, 0)),
        row("Games", stats.games_played.to_string(), Color::White),
        row("Restarts", stats.restarts.to_string(), Color::White),
        row(
            "Last game",
            stats
                .last_final_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            Color::White,
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_instructions(frame: &mut Frame, area: Rect) {
    let key = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(Span::styled(
            "Flappy Fist - Gesture Control",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![key("Close your fist"), Span::raw(" -> bird flaps up")]),
        Line::from(vec![key("Open your hand"), Span::raw(" -> bird falls")]),
        Line::from("Fly through the gaps between the pipes."),
        Line::from("Each pipe you pass scores a point."),
        Line::from("After a crash, close your fist to restart."),
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard: [Space] fist  [h] hide hand  [q] quit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Press any key to start]",
            Style::default().fg(Color::Green),
        )),
    ];

    render_modal(frame, area, Color::Yellow, 52, lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestureflap::gesture::{classify, read_gesture, Landmark};
    use gestureflap::simulation::Phase;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(view: &GameView) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_running_game() {
        let state = GameState::new();
        let stats = SessionStats::default();
        let hand = LandmarkSet::synthetic(Landmark::new(0.5, 0.5), 0.03);
        let view = GameView {
            state: &state,
            stats: &stats,
            reading: read_gesture(Some(&hand)),
            landmarks: Some(&hand),
            source: "keyboard",
            controls: &[("[Space]", "Fist")],
            show_instructions: false,
        };
        assert_eq!(classify(Some(&hand)).as_str(), "FIST");

        let text = screen_text(&view);
        assert!(text.contains("FIST - FLAPPING!"));
        assert!(text.contains("Score: 0"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_draw_game_over_and_instructions() {
        let mut state = GameState::new();
        state.phase = Phase::GameOver;
        state.score = 4;
        let stats = SessionStats::default();
        let view = GameView {
            state: &state,
            stats: &stats,
            reading: GestureReading::NO_HAND,
            landmarks: None,
            source: "replay",
            controls: &[],
            show_instructions: false,
        };
        let text = screen_text(&view);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Close fist to restart"));
        assert!(text.contains("NO HAND"));

        let view = GameView {
            show_instructions: true,
            ..view
        };
        assert!(screen_text(&view).contains("Press any key to start"));
    }
}
