//! Fist / open-hand classification from a single frame of landmarks.
//!
//! The classifier averages the distance from the palm center to the four
//! fingertips. A curled hand pulls every tip toward the palm, an open hand
//! spreads them out. No per-frame history is kept; edge detection on the
//! label is left to the consumer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::landmarks::{HandLandmark, LandmarkSet};
use crate::core::constants::{FIST_THRESHOLD, OPEN_THRESHOLD};

/// Discrete gesture label produced once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    /// No hand in the frame (or unusable landmark data).
    #[default]
    #[serde(rename = "NONE")]
    NoHand,
    Fist,
    Open,
    Neutral,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoHand => "NONE",
            Self::Fist => "FIST",
            Self::Open => "OPEN",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Status line shown next to the camera view.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Fist => "FIST - FLAPPING!",
            Self::Open => "OPEN - FALLING",
            Self::Neutral => "NEUTRAL",
            Self::NoHand => "NO HAND",
        }
    }

    pub fn is_fist(&self) -> bool {
        matches!(self, Self::Fist)
    }
}

/// Classification result together with the measurement behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureReading {
    pub gesture: Gesture,
    /// Average palm-to-fingertip distance, `None` when no hand was usable.
    pub avg_distance: Option<f64>,
}

impl GestureReading {
    pub const NO_HAND: GestureReading = GestureReading {
        gesture: Gesture::NoHand,
        avg_distance: None,
    };
}

/// Average distance from the palm center to the four fingertips.
///
/// Returns `None` if any of the involved coordinates is not finite.
pub fn average_fingertip_distance(landmarks: &LandmarkSet) -> Option<f64> {
    let palm = landmarks.get(HandLandmark::PALM_CENTER);
    if !palm.is_finite() {
        return None;
    }

    let mut total = 0.0;
    for tip in HandLandmark::FINGERTIPS {
        let tip = landmarks.get(tip);
        if !tip.is_finite() {
            return None;
        }
        total += palm.distance(tip);
    }
    Some(total / HandLandmark::FINGERTIPS.len() as f64)
}

/// Map an average fingertip distance to a label.
pub fn gesture_for_distance(avg_distance: f64) -> Gesture {
    if avg_distance < FIST_THRESHOLD {
        Gesture::Fist
    } else if avg_distance > OPEN_THRESHOLD {
        Gesture::Open
    } else {
        Gesture::Neutral
    }
}

/// Classify one frame and keep the measured distance.
pub fn read_gesture(landmarks: Option<&LandmarkSet>) -> GestureReading {
    match landmarks.and_then(average_fingertip_distance) {
        Some(avg_distance) => GestureReading {
            gesture: gesture_for_distance(avg_distance),
            avg_distance: Some(avg_distance),
        },
        None => GestureReading::NO_HAND,
    }
}

/// Classify one frame of landmarks.
pub fn classify(landmarks: Option<&LandmarkSet>) -> Gesture {
    read_gesture(landmarks).gesture
}

/// Remembers the last label so label changes can be observed and logged.
#[derive(Debug, Clone, Default)]
pub struct GestureMonitor {
    current: GestureReading,
    previous: Gesture,
    transitions: u64,
}

impl Default for GestureReading {
    fn default() -> Self {
        Self::NO_HAND
    }
}

impl GestureMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a frame, record it and return the new label.
    pub fn observe(&mut self, landmarks: Option<&LandmarkSet>) -> Gesture {
        let reading = read_gesture(landmarks);
        self.previous = self.current.gesture;
        self.current = reading;
        if self.changed() {
            self.transitions += 1;
            debug!(
                from = self.previous.as_str(),
                to = reading.gesture.as_str(),
                avg_distance = ?reading.avg_distance,
                "gesture changed"
            );
        }
        reading.gesture
    }

    pub fn current(&self) -> Gesture {
        self.current.gesture
    }

    pub fn reading(&self) -> GestureReading {
        self.current
    }

    pub fn previous(&self) -> Gesture {
        self.previous
    }

    /// Whether the last observed frame changed the label.
    pub fn changed(&self) -> bool {
        self.previous != self.current.gesture
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
