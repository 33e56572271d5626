//! Collision detection and hit resolution.

use std::sync::mpsc::Sender;

use log::debug;

use starfall_core::constants::{COLLISION_HALF_EXTENT, RETIRED_SHOT_POS};
use starfall_core::events::{GameEvent, ScoreEvent};
use starfall_core::state::WorldSnapshot;
use starfall_core::types::Position;

use crate::tracks::{EnemyTrack, HeroShotTrack};

/// Axis-aligned box test with the fixed half-extent. The same threshold
/// applies to every entity pair; exactly at the boundary is a miss.
pub fn collides(a: &Position, b: &Position) -> bool {
    (a.x - b.x).abs() < COLLISION_HALF_EXTENT && (a.y - b.y).abs() < COLLISION_HALF_EXTENT
}

/// Resolve hero-shot hits for this tick. Each shot scans living enemies
/// in insertion order; the first collision marks that enemy dead, emits a
/// kill on the score channel, and retires the shot off-screen for the
/// next filter pass. A shot kills at most one enemy.
pub fn resolve_hits(
    hero_shots: &mut HeroShotTrack,
    enemies: &mut EnemyTrack,
    kills: &Sender<ScoreEvent>,
    score_increase: u64,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    for shot in hero_shots.shots_mut() {
        for index in 0..enemies.len() {
            let target = enemies.order()[index];
            if enemies.is_dead(target) {
                continue;
            }
            let Some(pos) = enemies.position(target) else {
                continue;
            };
            if !collides(shot, &pos) {
                continue;
            }

            enemies.mark_dead(target);
            let _ = kills.send(ScoreEvent {
                value: score_increase,
                at_ms: now_ms,
            });
            events.push(GameEvent::EnemyDestroyed { x: pos.x, y: pos.y });
            debug!("enemy destroyed at ({}, {})", pos.x, pos.y);

            shot.x = RETIRED_SHOT_POS;
            shot.y = RETIRED_SHOT_POS;
            break;
        }
    }
}

/// Game-over predicate, evaluated on the assembled snapshot: the ship
/// touching any enemy (dead hulls included) or any enemy shot ends the
/// game.
pub fn is_game_over(snapshot: &WorldSnapshot) -> bool {
    let ship = &snapshot.ship.pos;
    snapshot.enemies.iter().any(|enemy| {
        collides(ship, &enemy.pos) || enemy.shots.iter().any(|shot| collides(ship, &shot.pos))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::state::{EnemyView, ShipView, ShotView};

    #[test]
    fn test_collides_within_the_box() {
        assert!(collides(
            &Position::new(100.0, 100.0),
            &Position::new(110.0, 105.0)
        ));
    }

    #[test]
    fn test_collides_misses_outside_the_box() {
        assert!(!collides(
            &Position::new(100.0, 100.0),
            &Position::new(140.0, 100.0)
        ));
    }

    #[test]
    fn test_collides_boundary_is_exclusive() {
        // Exactly at the half-extent on either axis is a miss.
        assert!(!collides(
            &Position::new(100.0, 100.0),
            &Position::new(120.0, 100.0)
        ));
        assert!(!collides(
            &Position::new(100.0, 100.0),
            &Position::new(100.0, 120.0)
        ));
        assert!(collides(
            &Position::new(100.0, 100.0),
            &Position::new(119.9, 119.9)
        ));
    }

    #[test]
    fn test_game_over_on_enemy_contact() {
        let mut snapshot = WorldSnapshot {
            ship: ShipView {
                pos: Position::new(400.0, 570.0),
            },
            ..Default::default()
        };
        assert!(!is_game_over(&snapshot));

        snapshot.enemies.push(EnemyView {
            pos: Position::new(390.0, 585.0),
            is_dead: false,
            shots: Vec::new(),
        });
        assert!(is_game_over(&snapshot));
    }

    #[test]
    fn test_game_over_on_enemy_shot_contact() {
        let snapshot = WorldSnapshot {
            ship: ShipView {
                pos: Position::new(400.0, 570.0),
            },
            enemies: vec![EnemyView {
                pos: Position::new(100.0, 100.0),
                is_dead: false,
                shots: vec![ShotView {
                    pos: Position::new(405.0, 560.0),
                }],
            }],
            ..Default::default()
        };
        assert!(is_game_over(&snapshot));
    }

    #[test]
    fn test_dead_hull_still_ends_the_game() {
        let snapshot = WorldSnapshot {
            ship: ShipView {
                pos: Position::new(400.0, 570.0),
            },
            enemies: vec![EnemyView {
                pos: Position::new(410.0, 575.0),
                is_dead: true,
                shots: Vec::new(),
            }],
            ..Default::default()
        };
        assert!(is_game_over(&snapshot));
    }
}
