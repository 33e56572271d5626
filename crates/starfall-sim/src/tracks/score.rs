//! Score accumulation with the rapid-kill bonus.

use std::sync::mpsc::Receiver;

use starfall_core::constants::{RAPID_KILL_BONUS, RAPID_KILL_WINDOW_SECS};
use starfall_core::events::ScoreEvent;

/// Accumulated score. The value only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub value: u64,
    /// Virtual time of the last applied kill.
    pub at_ms: u64,
}

/// Owns the receiving end of the kill channel; hit resolution holds the
/// sending end.
#[derive(Debug)]
pub struct ScoreTrack {
    state: ScoreState,
    kills: Receiver<ScoreEvent>,
}

impl ScoreTrack {
    /// Seeded at zero with the clock origin as its timestamp, so an
    /// opening kill inside the bonus window still earns the bonus.
    pub fn new(kills: Receiver<ScoreEvent>) -> Self {
        Self {
            state: ScoreState::default(),
            kills,
        }
    }

    /// Drain pending kill events in arrival order.
    pub fn drain(&mut self) {
        while let Ok(event) = self.kills.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ScoreEvent) {
        let gap_secs = event.at_ms.saturating_sub(self.state.at_ms) / 1000;
        let bonus = if gap_secs < RAPID_KILL_WINDOW_SECS {
            RAPID_KILL_BONUS
        } else {
            0
        };
        self.state.value += event.value + bonus;
        self.state.at_ms = event.at_ms;
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }
}
