//! Hand landmark data as delivered by an upstream hand tracker.
//!
//! A detected hand is 21 points in normalized image coordinates: x and y in
//! [0, 1], origin at the top-left of the source frame, x not mirrored.

use serde::{Deserialize, Serialize};

/// Number of landmarks in one detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// The 21 hand landmarks, in tracker index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// Index into a [`LandmarkSet`] (0-20).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Middle-finger knuckle, used as the palm center.
    pub const PALM_CENTER: HandLandmark = HandLandmark::MiddleMcp;

    /// Tips of the four non-thumb fingers.
    pub const FINGERTIPS: [HandLandmark; 4] = [
        HandLandmark::IndexTip,
        HandLandmark::MiddleTip,
        HandLandmark::RingTip,
        HandLandmark::PinkyTip,
    ];
}

/// Skeleton edges as landmark index pairs, for drawing.
pub const HAND_CONNECTIONS: [(usize, usize); 23] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (0, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (0, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (5, 9),
    (9, 13),
    (13, 17),
];

/// One landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in the normalized plane.
    pub fn distance(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Horizontally mirrored copy, for selfie-style display.
    pub fn mirrored(&self) -> Landmark {
        Landmark::new(1.0 - self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A complete set of 21 landmarks for one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a set from a tracker result. Returns `None` unless exactly 21
    /// points are supplied.
    pub fn from_points(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Copy with one landmark replaced.
    pub fn with(mut self, landmark: HandLandmark, point: Landmark) -> Self {
        self.points[landmark.index()] = point;
        self
    }

    /// Stylized upright hand centered on `palm` whose four fingertips sit
    /// `spread` away from the palm center. Used to synthesize tracker output
    /// when no camera is available.
    pub fn synthetic(palm: Landmark, spread: f64) -> Self {
        let mut points = [palm; LANDMARK_COUNT];
        points[HandLandmark::Wrist.index()] = Landmark::new(palm.x, palm.y + 0.15);

        // Knuckle offsets and finger angles (radians from vertical), index
        // to pinky. The middle knuckle is the palm center itself.
        let knuckles = [-0.03, 0.0, 0.03, 0.055];
        let angles: [f64; 4] = [-0.3, 0.0, 0.25, 0.5];
        for (finger, (dx, angle)) in knuckles.iter().zip(angles).enumerate() {
            let base = 5 + finger * 4;
            let knuckle = Landmark::new(palm.x + dx, palm.y);
            // Tip lands exactly `spread` from the palm center
            let tip = Landmark::new(palm.x + spread * angle.sin(), palm.y - spread * angle.cos());
            for joint in 0..3 {
                let t = joint as f64 / 3.0;
                points[base + joint] = Landmark::new(
                    knuckle.x + (tip.x - knuckle.x) * t,
                    knuckle.y + (tip.y - knuckle.y) * t,
                );
            }
            points[base + 3] = tip;
        }

        // Thumb off to the side
        for joint in 0..4 {
            let t = (joint + 1) as f64 / 4.0;
            points[1 + joint] = Landmark::new(palm.x - 0.06 * t, palm.y + 0.05 - 0.05 * t);
        }

        Self { points }
    }
}
