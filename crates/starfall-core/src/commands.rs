//! Input commands sent from the I/O surface to the pipeline.
//!
//! Commands are queued and drained at the next dispatch boundary.

use serde::{Deserialize, Serialize};

use crate::enums::TriggerSource;

/// All input the core consumes. Everything else (quit keys, terminal
/// resize) is handled by the front-end and never reaches the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputCommand {
    /// The pointer moved to a canvas x coordinate.
    PointerMoved { x: f64 },
    /// A fire trigger occurred; payload is provenance only.
    FireTriggered { source: TriggerSource },
}
