//! Snapshot assembly: reads every track and builds the per-tick view.
//!
//! This module is read-only — it never mutates a track.

use starfall_core::enums::GamePhase;
use starfall_core::events::GameEvent;
use starfall_core::state::{EnemyView, ScoreView, ShipView, ShotView, StarView, WorldSnapshot};
use starfall_core::types::{Position, SimTime};

use crate::tracks::enemies::{Battery, Vitality};
use crate::tracks::score::ScoreState;
use crate::tracks::{EnemyTrack, HeroShotTrack, ShipTracker, StarField};

/// Build a complete snapshot from the latest state of every track.
pub fn build_snapshot(
    time: SimTime,
    phase: GamePhase,
    starfield: &StarField,
    ship: &ShipTracker,
    enemies: &EnemyTrack,
    hero_shots: &HeroShotTrack,
    score: ScoreState,
    events: Vec<GameEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time,
        phase,
        stars: build_stars(starfield),
        ship: ShipView {
            pos: ship.position(),
        },
        enemies: build_enemies(enemies),
        hero_shots: hero_shots
            .shots()
            .iter()
            .map(|&pos| ShotView { pos })
            .collect(),
        score: ScoreView {
            value: score.value,
            at_ms: score.at_ms,
        },
        events,
    }
}

fn build_stars(starfield: &StarField) -> Vec<StarView> {
    starfield
        .stars()
        .iter()
        .map(|star| StarView {
            pos: star.pos,
            size: star.size,
        })
        .collect()
}

/// Build enemy views in insertion order, batteries included.
fn build_enemies(track: &EnemyTrack) -> Vec<EnemyView> {
    track
        .order()
        .iter()
        .filter_map(|&entity| {
            let pos = track.arena().get::<&Position>(entity).ok()?;
            let vitality = track.arena().get::<&Vitality>(entity).ok()?;
            let battery = track.arena().get::<&Battery>(entity).ok()?;
            Some(EnemyView {
                pos: *pos,
                is_dead: vitality.is_dead,
                shots: battery.shots.iter().map(|&pos| ShotView { pos }).collect(),
            })
        })
        .collect()
}
