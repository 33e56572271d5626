//! World snapshot — the complete visible state produced once per tick.
//!
//! The snapshot is the only object a render sink ever sees. It is
//! assembled atomically from the latest value of every track and never
//! partially updated.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Atomic per-tick composite of all tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stars: Vec<StarView>,
    pub ship: ShipView,
    pub enemies: Vec<EnemyView>,
    pub hero_shots: Vec<ShotView>,
    pub score: ScoreView,
    /// Events that occurred since the previous tick.
    pub events: Vec<GameEvent>,
}

/// A background star.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StarView {
    pub pos: Position,
    /// Cell size; doubles as fall speed per tick.
    pub size: f64,
}

/// The player's ship. Exactly one exists for the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Position,
}

/// A projectile, hero- or enemy-owned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotView {
    pub pos: Position,
}

/// An enemy with the shots it still owns. Dead enemies are not drawn but
/// linger until their battery empties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Position,
    pub is_dead: bool,
    pub shots: Vec<ShotView>,
}

/// Running score for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub value: u64,
    /// Virtual time of the last kill applied.
    pub at_ms: u64,
}
