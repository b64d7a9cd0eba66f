#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, AddAssign};

use serde::Deserialize;

/// A point in surface coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    #[must_use]
    pub fn offset(self, delta: Delta) -> Self {
        Self { x: self.x + delta.dx, y: self.y + delta.dy }
    }
}

/// Pointer movement accumulated between two viewport writes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Return the current value and reset `self` to zero.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl Add for Delta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { dx: self.dx + rhs.dx, dy: self.dy + rhs.dy }
    }
}

impl AddAssign for Delta {
    fn add_assign(&mut self, rhs: Self) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero, negative or not a number.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}
