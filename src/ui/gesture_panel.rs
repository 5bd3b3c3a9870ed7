//! Camera-side panel: the tracked hand skeleton (mirrored like a selfie
//! view), the current gesture label and the fingertip distance gauge.

use gestureflap::core::constants::{FIST_THRESHOLD, OPEN_THRESHOLD};
use gestureflap::gesture::{Gesture, GestureReading, LandmarkSet, HAND_CONNECTIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use super::game_common::render_panel_frame;

/// Distance mapped to a full gauge.
const GAUGE_MAX_DISTANCE: f64 = 0.3;

pub fn gesture_color(gesture: Gesture) -> Color {
    match gesture {
        Gesture::Fist => Color::Green,
        Gesture::Open => Color::Yellow,
        Gesture::Neutral => Color::Rgb(255, 165, 0),
        Gesture::NoHand => Color::Red,
    }
}

pub fn render_gesture_panel(
    frame: &mut Frame,
    area: Rect,
    reading: GestureReading,
    landmarks: Option<&LandmarkSet>,
    source: &str,
) {
    let inner = render_panel_frame(
        frame,
        area,
        &format!(" Hand ({}) ", source),
        gesture_color(reading.gesture),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Skeleton
            Constraint::Length(1), // Indicator
            Constraint::Length(1), // Gauge
        ])
        .split(inner);

    let grid = skeleton_cells(landmarks, chunks[0].width as usize, chunks[0].height as usize);
    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|c| match c {
                        SkeletonCell::Empty => Span::raw(" "),
                        SkeletonCell::Bone => Span::styled("·", Style::default().fg(Color::Green)),
                        SkeletonCell::Joint => Span::styled("●", Style::default().fg(Color::Green)),
                        SkeletonCell::Wrist => Span::styled("●", Style::default().fg(Color::Red)),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let indicator = Paragraph::new(Line::from(Span::styled(
        reading.gesture.indicator(),
        Style::default()
            .fg(gesture_color(reading.gesture))
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(indicator, chunks[1]);

    let (ratio, label) = match reading.avg_distance {
        Some(d) => (
            (d / GAUGE_MAX_DISTANCE).clamp(0.0, 1.0),
            format!("{:.3} (fist<{} open>{})", d, FIST_THRESHOLD, OPEN_THRESHOLD),
        ),
        None => (0.0, "no reading".to_string()),
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gesture_color(reading.gesture)))
        .label(label)
        .ratio(ratio);
    frame.render_widget(gauge, chunks[2]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonCell {
    Empty,
    Bone,
    Joint,
    Wrist,
}

/// Rasterize the hand, mirrored horizontally, into `width` x `height` cells.
pub fn skeleton_cells(
    landmarks: Option<&LandmarkSet>,
    width: usize,
    height: usize,
) -> Vec<Vec<SkeletonCell>> {
    let mut grid = vec![vec![SkeletonCell::Empty; width]; height];
    let Some(landmarks) = landmarks else {
        return grid;
    };
    if width == 0 || height == 0 {
        return grid;
    }

    let to_cell = |index: usize| -> (i64, i64) {
        let p = landmarks.points()[index].mirrored();
        let col = (p.x.clamp(0.0, 1.0) * (width - 1) as f64).round() as i64;
        let row = (p.y.clamp(0.0, 1.0) * (height - 1) as f64).round() as i64;
        (col, row)
    };

    for (a, b) in HAND_CONNECTIONS {
        let (x0, y0) = to_cell(a);
        let (x1, y1) = to_cell(b);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for i in 0..=steps {
            let col = x0 + (x1 - x0) * i / steps;
            let row = y0 + (y1 - y0) * i / steps;
            grid[row as usize][col as usize] = SkeletonCell::Bone;
        }
    }

    for index in 0..landmarks.points().len() {
        let (col, row) = to_cell(index);
        grid[row as usize][col as usize] = if index == 0 {
            SkeletonCell::Wrist
        } else {
            SkeletonCell::Joint
        };
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestureflap::gesture::{HandLandmark, Landmark, LANDMARK_COUNT};

    #[test]
    fn test_no_hand_draws_nothing() {
        let grid = skeleton_cells(None, 10, 5);
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().flatten().all(|c| *c == SkeletonCell::Empty));
    }

    #[test]
    fn test_wrist_is_mirrored() {
        let set = LandmarkSet::new([Landmark::new(0.5, 0.5); LANDMARK_COUNT])
            .with(HandLandmark::Wrist, Landmark::new(0.0, 1.0));
        let grid = skeleton_cells(Some(&set), 11, 11);
        // x = 0 lands on the right edge once mirrored
        assert_eq!(grid[10][10], SkeletonCell::Wrist);
        assert_eq!(grid[5][5], SkeletonCell::Joint);
        assert_eq!(grid[10][0], SkeletonCell::Empty);
    }

    #[test]
    fn test_gesture_colors_are_distinct() {
        let colors = [Gesture::Fist, Gesture::Open, Gesture::Neutral, Gesture::NoHand]
            .map(gesture_color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
