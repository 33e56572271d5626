//! Virtual-time timer scheduler — the event-source multiplexer.
//!
//! Every periodic activity (frame ticks, fire sampling, enemy spawning,
//! and each enemy's own shot timer) is an entry in one deadline-ordered
//! heap over a virtual millisecond clock. Coincident deadlines fire in
//! scheduling order, so multi-timer coincidences are deterministic.
//! Sampling semantics, not buffering: firings are delivered when the
//! driver asks for the next one; nothing queues behind a slow consumer.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Handle for a scheduled timer; the only way to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What a firing means to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Frame tick: advance the world and sample a snapshot.
    Tick,
    /// Sample the fire gate.
    FireSample,
    /// Spawn a new enemy and run the cull pass.
    EnemySpawn,
    /// A specific enemy's shot timer.
    EnemyShot(hecs::Entity),
}

/// One firing delivered to the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Firing {
    pub id: TimerId,
    pub kind: TimerKind,
    pub at_ms: u64,
}

#[derive(Debug)]
struct Entry {
    deadline_ms: u64,
    /// Tie-break for coincident deadlines: lower sequence fires first.
    seq: u64,
    id: TimerId,
    kind: TimerKind,
    period_ms: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline_ms == other.deadline_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline_ms, self.seq).cmp(&(other.deadline_ms, other.seq))
    }
}

/// Deadline-ordered heap of periodic timers. Every timer has exactly one
/// pending entry; a fired entry is rescheduled one period later unless the
/// timer was cancelled in the meantime.
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Reverse<Entry>>,
    /// Lazily-removed timers: entries are dropped when they reach the top.
    cancelled: HashSet<TimerId>,
    next_id: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a periodic timer whose first firing is at `first_ms` and
    /// which then repeats every `period_ms`.
    pub fn schedule(&mut self, kind: TimerKind, first_ms: u64, period_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.push(Entry {
            deadline_ms: first_ms,
            seq: 0, // overwritten by push
            id,
            kind,
            period_ms,
        });
        id
    }

    /// Cancel a timer. Takes effect before its next firing.
    pub fn cancel(&mut self, id: TimerId) {
        self.cancelled.insert(id);
    }

    /// Drop every timer at once (pipeline teardown).
    pub fn cancel_all(&mut self) {
        self.heap.clear();
        self.cancelled.clear();
    }

    /// Deadline of the next live firing, pruning cancelled entries.
    pub fn next_deadline(&mut self) -> Option<u64> {
        loop {
            let entry = self.heap.peek()?;
            if self.cancelled.contains(&entry.0.id) {
                let entry = self.heap.pop()?;
                self.cancelled.remove(&entry.0.id);
                continue;
            }
            return Some(entry.0.deadline_ms);
        }
    }

    /// Pop the earliest live firing, rescheduling its timer one period
    /// later.
    pub fn pop_next(&mut self) -> Option<Firing> {
        loop {
            let Reverse(entry) = self.heap.pop()?;
            if self.cancelled.remove(&entry.id) {
                continue;
            }
            let firing = Firing {
                id: entry.id,
                kind: entry.kind,
                at_ms: entry.deadline_ms,
            };
            self.push(Entry {
                deadline_ms: entry.deadline_ms + entry.period_ms,
                ..entry
            });
            return Some(firing);
        }
    }

    /// Number of timers still live (tests).
    pub fn active_count(&self) -> usize {
        self.heap
            .iter()
            .filter(|e| !self.cancelled.contains(&e.0.id))
            .count()
    }

    fn push(&mut self, mut entry: Entry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_deadlines_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Tick, 40, 40);
        scheduler.schedule(TimerKind::FireSample, 40, 200);

        let first = scheduler.pop_next().unwrap();
        let second = scheduler.pop_next().unwrap();
        assert_eq!(first.kind, TimerKind::Tick);
        assert_eq!(second.kind, TimerKind::FireSample);
        assert_eq!(first.at_ms, 40);
        assert_eq!(second.at_ms, 40);
    }

    #[test]
    fn test_periodic_reschedule() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Tick, 40, 40);

        for expected in [40, 80, 120, 160] {
            let firing = scheduler.pop_next().unwrap();
            assert_eq!(firing.at_ms, expected);
        }
        assert_eq!(scheduler.next_deadline(), Some(200));
    }

    #[test]
    fn test_cancel_takes_effect_before_next_firing() {
        let mut scheduler = Scheduler::new();
        let tick = scheduler.schedule(TimerKind::Tick, 40, 40);
        let sample = scheduler.schedule(TimerKind::FireSample, 200, 200);

        assert_eq!(scheduler.pop_next().unwrap().id, tick);
        scheduler.cancel(tick);

        // Only the sample timer remains live.
        assert_eq!(scheduler.next_deadline(), Some(200));
        let firing = scheduler.pop_next().unwrap();
        assert_eq!(firing.id, sample);
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_cancel_all_empties_the_wheel() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Tick, 40, 40);
        scheduler.schedule(TimerKind::EnemySpawn, 1500, 1500);

        scheduler.cancel_all();
        assert_eq!(scheduler.next_deadline(), None);
        assert!(scheduler.pop_next().is_none());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_interleaved_periods() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Tick, 40, 40);
        scheduler.schedule(TimerKind::FireSample, 200, 200);

        let mut firings = Vec::new();
        while let Some(firing) = scheduler.pop_next() {
            if firing.at_ms > 200 {
                break;
            }
            firings.push((firing.at_ms, firing.kind));
        }

        assert_eq!(
            firings,
            vec![
                (40, TimerKind::Tick),
                (80, TimerKind::Tick),
                (120, TimerKind::Tick),
                (160, TimerKind::Tick),
                // The sample entry has waited since t=0; the tick entry was
                // rescheduled at t=160 and therefore fires after it.
                (200, TimerKind::FireSample),
                (200, TimerKind::Tick),
            ]
        );
    }
}
