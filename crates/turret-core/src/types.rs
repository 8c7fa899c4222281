//! Fundamental geometric and simulation types.
//!
//! The playfield uses screen coordinates: x grows to the right, y grows
//! downward, and every position is the top-left corner of a bounding box.

use serde::{Deserialize, Serialize};

/// 2D position on the playfield (units, top-left corner of the entity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (units per millisecond). Negative y moves upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Width and height of a bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub position: Position,
    pub size: Size,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks the simulation has advanced while playing.
    pub tick: u64,
    /// Elapsed playing time in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (units/ms).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Bounds {
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }

    /// Strict AABB overlap: each box's near edge lies before the other's far
    /// edge on both axes. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

impl SimTime {
    /// Advance by one tick of `delta_ms` milliseconds.
    pub fn advance(&mut self, delta_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += delta_ms;
    }
}
