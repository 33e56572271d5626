//! Player ship tracker — last-value semantics over pointer input.

use starfall_core::types::{Bounds, Position};

/// The player's ship. Rides a fixed horizontal baseline; only x ever
/// changes, following the latest pointer position.
#[derive(Debug)]
pub struct ShipTracker {
    pos: Position,
}

impl ShipTracker {
    /// Seed at the canvas center so a position exists before the first
    /// pointer event.
    pub fn new(bounds: Bounds, hero_y: f64) -> Self {
        Self {
            pos: Position::new(bounds.width / 2.0, hero_y),
        }
    }

    pub fn pointer_moved(&mut self, x: f64) {
        self.pos.x = x;
    }

    pub fn position(&self) -> Position {
        self.pos
    }
}
