//! Fire gate — merges raw trigger sources and samples them at a fixed
//! cadence into timestamped firing signals.
//!
//! Both trigger sources collapse into one armed latch; the sampling timer
//! turns at most one latched trigger per window into a new signal.
//! Downstream compares signal timestamps against the last one it applied,
//! which bounds memory to a single remembered sample instead of a full
//! distinct-set.

use log::debug;

use starfall_core::enums::TriggerSource;

/// A timestamped firing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiringSignal {
    pub at_ms: u64,
}

#[derive(Debug)]
pub struct FireGate {
    /// True when a raw trigger arrived since the previous sample.
    armed: bool,
    latest: Option<FiringSignal>,
}

impl FireGate {
    /// Starts armed: the seed trigger guarantees a firing signal exists
    /// from the first sample onward.
    pub fn new() -> Self {
        Self {
            armed: true,
            latest: None,
        }
    }

    /// A raw trigger from either source.
    pub fn trigger(&mut self, source: TriggerSource) {
        debug!("fire trigger from {source:?}");
        self.armed = true;
    }

    /// Take a sample at `now_ms`. A fresh trigger within the window
    /// produces a new signal; otherwise the previous signal stands.
    pub fn sample(&mut self, now_ms: u64) -> Option<FiringSignal> {
        if self.armed {
            self.armed = false;
            self.latest = Some(FiringSignal { at_ms: now_ms });
        }
        self.latest
    }

    pub fn latest(&self) -> Option<FiringSignal> {
        self.latest
    }
}

impl Default for FireGate {
    fn default() -> Self {
        Self::new()
    }
}
