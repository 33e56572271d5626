//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Pipeline lifecycle state. `Ended` is terminal and absorbing: there is
/// no restart, and no further snapshots are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Ended,
}

/// Which raw input surface produced a fire trigger. The fire gate merges
/// both sources; provenance only matters at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerSource {
    /// Pointer click.
    Pointer,
    /// One of the two designated fire keys.
    Key,
}
