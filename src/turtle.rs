//! Turtle state and the primitive drawing commands.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The drawing cursor.
///
/// Heading is in radians with `0` facing canvas-right and positive angles
/// turning counter-clockwise. Canvas `y` grows downward, so moving "up" on
/// screen decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Current canvas-space position.
    pub position: DVec2,

    /// Current heading. Accumulates without normalization.
    pub angle: f64,

    /// Whether forward moves leave a trail.
    pub pen_down: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            angle: 0.0,
            pen_down: true,
        }
    }
}

impl Cursor {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            ..Default::default()
        }
    }

    /// Unit vector of the current heading in canvas space.
    pub fn heading(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), -self.angle.sin())
    }

    /// Moves `length` units along the current heading.
    pub fn move_forward(&mut self, length: f64) {
        self.position += self.heading() * length;
    }

    /// Turns counter-clockwise by `delta` radians.
    pub fn rotate_ccw(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Turns clockwise by `delta` radians.
    pub fn rotate_cw(&mut self, delta: f64) {
        self.angle -= delta;
    }
}

/// Operations the turtle can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Resume drawing (`D`).
    PenDown,
    /// Stop drawing (`U`).
    PenUp,
    /// Step forward, drawing if the pen is down (`F`, `G`, `H`).
    MoveForward,
    /// Turn counter-clockwise by the configured angle (`+`).
    RotateCcw,
    /// Turn clockwise by the configured angle (`-`).
    RotateCw,
    /// Save the cursor onto the stack (`[`).
    StorePosition,
    /// Jump back to the most recently saved cursor (`]`).
    GotoStoredPosition,
    /// Structural placeholder with no effect (`X`, `Y`, `Z`).
    NoAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn forward_at_zero_heading_moves_right() {
        let mut cursor = Cursor::new(0.0, 0.0);
        cursor.move_forward(10.0);
        assert_eq!(cursor.position, DVec2::new(10.0, 0.0));
    }

    #[test]
    fn counter_clockwise_quarter_turn_moves_up() {
        let mut cursor = Cursor::new(0.0, 0.0);
        cursor.rotate_ccw(FRAC_PI_2);
        cursor.move_forward(10.0);
        assert!(cursor.position.x.abs() < 1e-9);
        assert!((cursor.position.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn angle_accumulates_unbounded() {
        let mut cursor = Cursor::default();
        for _ in 0..8 {
            cursor.rotate_ccw(PI);
        }
        cursor.rotate_cw(FRAC_PI_2);
        assert!((cursor.angle - (8.0 * PI - FRAC_PI_2)).abs() < 1e-9);
    }
}
