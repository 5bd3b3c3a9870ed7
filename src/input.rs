//! Keyboard stand-in for the camera.
//!
//! Terminals deliver key presses but no key releases, so a press closes the
//! emulated fist for [`KEY_HOLD_MS`]. That outlasts the repeat delay, so a
//! held key stays one continuous fist and cannot fake a fresh one. The emulated hand is turned into synthetic landmarks so the
//! same classifier path runs as with a real tracker.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use gestureflap::core::constants::KEY_HOLD_MS;
use gestureflap::gesture::{Landmark, LandmarkSet};

/// Fingertip spread of the emulated closed hand.
const FIST_SPREAD: f64 = 0.03;
/// Fingertip spread of the emulated open hand.
const OPEN_SPREAD: f64 = 0.25;

/// UI-agnostic actions from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    /// Space / Up / Enter: close the fist.
    Fist,
    /// `h`: show or hide the emulated hand.
    ToggleHand,
    /// `q` / Esc.
    Quit,
    Other,
}

pub fn map_key(key: KeyEvent) -> AppInput {
    if key.kind == KeyEventKind::Release {
        return AppInput::Other;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => AppInput::Fist,
        KeyCode::Char('h') | KeyCode::Char('H') => AppInput::ToggleHand,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppInput::Quit,
        _ => AppInput::Other,
    }
}

/// [`KEY_HOLD_MS`] in frames at `fps`, rounded up.
pub fn key_hold_frames(fps: u32) -> u32 {
    let frames = (KEY_HOLD_MS * u64::from(fps.max(1))).div_ceil(1000);
    u32::try_from(frames).unwrap_or(u32::MAX)
}

/// Emulated hand driven by key presses.
#[derive(Debug, Clone)]
pub struct KeyboardHand {
    hold_frames: u32,
    frames_per_press: u32,
    visible: bool,
}

impl KeyboardHand {
    pub fn new(fps: u32) -> Self {
        Self {
            hold_frames: 0,
            frames_per_press: key_hold_frames(fps),
            visible: true,
        }
    }

    /// Close the fist, or keep it closed if a repeat arrives in time.
    pub fn press_fist(&mut self) {
        self.hold_frames = self.frames_per_press;
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Landmarks for the next frame, `None` while the hand is hidden.
    pub fn next_frame(&mut self) -> Option<LandmarkSet> {
        if !self.visible {
            self.hold_frames = 0;
            return None;
        }
        let spread = if self.hold_frames > 0 {
            self.hold_frames -= 1;
            FIST_SPREAD
        } else {
            OPEN_SPREAD
        };
        Some(LandmarkSet::synthetic(Landmark::new(0.5, 0.55), spread))
    }
}
