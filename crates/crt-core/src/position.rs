use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Normalized beam displacement from the screen centre.
///
/// Each axis is a fraction of the screen, nominally within
/// `[-max_deflection, +max_deflection]`. Positive `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamPosition {
    pub x: f64,
    pub y: f64,
}

const EPSILON: f64 = 1e-9;

impl BeamPosition {
    pub const CENTER: BeamPosition = BeamPosition { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to `[-limit, +limit]`.
    pub fn clamped(&self, limit: f64) -> Self {
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }

    /// True when both axes lie within `[-limit, +limit]`.
    pub fn within(&self, limit: f64) -> bool {
        self.x.abs() <= limit && self.y.abs() <= limit
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Approximate equality using epsilon comparison
    pub fn approx_eq(&self, other: &BeamPosition) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl From<DVec2> for BeamPosition {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<BeamPosition> for DVec2 {
    fn from(p: BeamPosition) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl Add for BeamPosition {
    type Output = BeamPosition;
    fn add(self, rhs: BeamPosition) -> BeamPosition {
        BeamPosition::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for BeamPosition {
    type Output = BeamPosition;
    fn sub(self, rhs: BeamPosition) -> BeamPosition {
        BeamPosition::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for BeamPosition {
    type Output = BeamPosition;
    fn mul(self, rhs: f64) -> BeamPosition {
        BeamPosition::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for BeamPosition {
    type Output = BeamPosition;
    fn neg(self) -> BeamPosition {
        BeamPosition::new(-self.x, -self.y)
    }
}
