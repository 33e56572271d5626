//! Events emitted by the simulation.

use serde::{Deserialize, Serialize};

/// A confirmed kill, sent through the pipeline's own kill channel to the
/// score track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Base value awarded for the kill.
    pub value: u64,
    /// Virtual time of the kill; the bonus rule compares consecutive
    /// timestamps.
    pub at_ms: u64,
}

/// Presentation events carried on the snapshot for front-end feedback
/// (log lines, effects). Never consumed by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new enemy entered the field.
    EnemySpawned { x: f64 },
    /// A hero shot destroyed an enemy at this position.
    EnemyDestroyed { x: f64, y: f64 },
}
