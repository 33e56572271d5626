//! Enemy lifecycle — periodic spawning, per-enemy shot sub-timers, and
//! the cull pass that ties each sub-timer's lifetime to arena membership.
//!
//! Enemies live in a hecs arena: the stable entity handle keys both the
//! sub-timer map and the explicit insertion order that hit resolution and
//! snapshots scan.

use std::collections::HashMap;

use hecs::{Entity, World};
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::constants::{
    ENEMY_DRIFT, ENEMY_JITTER, ENEMY_SHOT_MAX_MS, ENEMY_SHOT_MIN_MS, ENEMY_SPAWN_Y,
};
use starfall_core::types::{Bounds, Position};

use crate::scheduler::{Scheduler, TimerId, TimerKind};

/// Shots an enemy has fired and still owns. They outlive their owner's
/// death but not its removal from the arena.
#[derive(Debug, Clone, Default)]
pub struct Battery {
    pub shots: Vec<Position>,
}

/// One-way death flag, set on the first hero-shot hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vitality {
    pub is_dead: bool,
}

pub struct EnemyTrack {
    arena: World,
    /// Insertion order; scans follow it so first-match hit resolution is
    /// deterministic.
    order: Vec<Entity>,
    shot_timers: HashMap<Entity, TimerId>,
    despawn_buffer: Vec<Entity>,
    bounds: Bounds,
}

impl EnemyTrack {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            arena: World::new(),
            order: Vec::new(),
            shot_timers: HashMap::new(),
            despawn_buffer: Vec::new(),
            bounds,
        }
    }

    /// Spawn one enemy above the canvas, start its shot sub-timer with a
    /// randomized period, then run the cull pass over the whole
    /// collection.
    pub fn spawn(
        &mut self,
        rng: &mut ChaCha8Rng,
        scheduler: &mut Scheduler,
        now_ms: u64,
    ) -> Position {
        let pos = Position::new(
            rng.gen_range(0..self.bounds.width as u32) as f64,
            ENEMY_SPAWN_Y,
        );
        let entity = self
            .arena
            .spawn((pos, Battery::default(), Vitality::default()));
        self.order.push(entity);

        let period_ms = rng.gen_range(ENEMY_SHOT_MIN_MS..=ENEMY_SHOT_MAX_MS);
        let timer = scheduler.schedule(TimerKind::EnemyShot(entity), now_ms + period_ms, period_ms);
        self.shot_timers.insert(entity, timer);
        debug!("enemy spawned at x={} firing every {period_ms}ms", pos.x);

        self.cull(scheduler);
        pos
    }

    /// An enemy's sub-timer fired: a living enemy shoots from its current
    /// position; the battery is filtered to visible shots either way, so
    /// a dead owner's shots still drain.
    pub fn fire_shot(&mut self, entity: Entity) {
        let bounds = self.bounds;
        if let Ok((pos, vitality, battery)) = self
            .arena
            .query_one_mut::<(&Position, &Vitality, &mut Battery)>(entity)
        {
            if !vitality.is_dead {
                battery.shots.push(*pos);
            }
            battery.shots.retain(|shot| bounds.is_visible(shot));
        }
    }

    /// Advance one tick: living enemies drift down with lateral jitter
    /// (dead ones freeze in place); every battery's shots keep falling,
    /// dead owner or not.
    pub fn advance(&mut self, rng: &mut ChaCha8Rng, shot_speed: f64) {
        for &entity in &self.order {
            if let Ok((pos, vitality)) = self
                .arena
                .query_one_mut::<(&mut Position, &Vitality)>(entity)
            {
                if !vitality.is_dead {
                    pos.y += ENEMY_DRIFT;
                    pos.x += rng.gen_range(-ENEMY_JITTER..=ENEMY_JITTER) as f64;
                }
            }
        }
        for (_entity, battery) in self.arena.query_mut::<&mut Battery>() {
            for shot in &mut battery.shots {
                shot.y += shot_speed;
            }
        }
    }

    /// Cull pass: retain enemies that are visible and not (dead with an
    /// empty battery). Culled enemies leave the arena and their sub-timer
    /// is cancelled, never the one without the other.
    pub fn cull(&mut self, scheduler: &mut Scheduler) {
        let bounds = self.bounds;
        self.despawn_buffer.clear();
        for &entity in &self.order {
            if let Ok((pos, vitality, battery)) = self
                .arena
                .query_one_mut::<(&Position, &Vitality, &Battery)>(entity)
            {
                let spent = vitality.is_dead && battery.shots.is_empty();
                if !bounds.is_visible(pos) || spent {
                    self.despawn_buffer.push(entity);
                }
            }
        }

        for entity in self.despawn_buffer.drain(..) {
            let _ = self.arena.despawn(entity);
            if let Some(timer) = self.shot_timers.remove(&entity) {
                scheduler.cancel(timer);
            }
            debug!("enemy culled");
        }

        let arena = &self.arena;
        self.order.retain(|entity| arena.contains(*entity));
    }

    /// Flip the one-way death flag.
    pub fn mark_dead(&mut self, entity: Entity) {
        if let Ok(vitality) = self.arena.query_one_mut::<&mut Vitality>(entity) {
            vitality.is_dead = true;
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities in insertion order.
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    /// Read-only arena access for snapshot assembly.
    pub fn arena(&self) -> &World {
        &self.arena
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.arena.get::<&Position>(entity).map(|pos| *pos).ok()
    }

    /// Treats an unknown entity as dead, which makes scans skip it.
    pub fn is_dead(&self, entity: Entity) -> bool {
        self.arena
            .get::<&Vitality>(entity)
            .map(|vitality| vitality.is_dead)
            .unwrap_or(true)
    }

    #[cfg(test)]
    pub fn has_shot_timer(&self, entity: Entity) -> bool {
        self.shot_timers.contains_key(&entity)
    }

    #[cfg(test)]
    pub fn set_position(&mut self, entity: Entity, pos: Position) {
        if let Ok(stored) = self.arena.query_one_mut::<&mut Position>(entity) {
            *stored = pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup() -> (EnemyTrack, Scheduler, ChaCha8Rng) {
        (
            EnemyTrack::new(Bounds::new(800.0, 600.0)),
            Scheduler::new(),
            ChaCha8Rng::seed_from_u64(9),
        )
    }

    #[test]
    fn test_spawn_registers_sub_timer() {
        let (mut track, mut scheduler, mut rng) = setup();
        let pos = track.spawn(&mut rng, &mut scheduler, 1500);

        assert_eq!(track.len(), 1);
        assert_eq!(pos.y, ENEMY_SPAWN_Y);
        assert!(pos.x >= 0.0 && pos.x < 800.0);
        let entity = track.order()[0];
        assert!(track.has_shot_timer(entity));
        assert_eq!(scheduler.active_count(), 1);

        // The sub-timer period is randomized within its band.
        let firing = scheduler.pop_next().unwrap();
        assert_eq!(firing.kind, TimerKind::EnemyShot(entity));
        let delay = firing.at_ms - 1500;
        assert!((ENEMY_SHOT_MIN_MS..=ENEMY_SHOT_MAX_MS).contains(&delay));
    }

    #[test]
    fn test_living_enemy_shoots_from_current_position() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let entity = track.order()[0];
        track.set_position(entity, Position::new(250.0, 90.0));

        track.fire_shot(entity);
        let shots = track.arena().get::<&Battery>(entity).unwrap().shots.clone();
        assert_eq!(shots, vec![Position::new(250.0, 90.0)]);
    }

    #[test]
    fn test_dead_enemy_stops_shooting_but_battery_drains() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let entity = track.order()[0];
        track.set_position(entity, Position::new(250.0, 90.0));

        track.fire_shot(entity);
        track.mark_dead(entity);
        track.fire_shot(entity);
        assert_eq!(
            track.arena().get::<&Battery>(entity).unwrap().shots.len(),
            1
        );

        // The surviving shot keeps falling and is filtered once it leaves
        // the canvas, even though its owner is dead.
        for _ in 0..40 {
            track.advance(&mut rng, 15.0);
        }
        track.fire_shot(entity);
        assert!(track.arena().get::<&Battery>(entity).unwrap().shots.is_empty());
    }

    #[test]
    fn test_dead_enemy_freezes_in_place() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let entity = track.order()[0];
        track.set_position(entity, Position::new(250.0, 90.0));
        track.mark_dead(entity);

        for _ in 0..10 {
            track.advance(&mut rng, 15.0);
        }
        assert_eq!(track.position(entity), Some(Position::new(250.0, 90.0)));
    }

    #[test]
    fn test_living_enemy_drifts_down_with_bounded_jitter() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let entity = track.order()[0];
        track.set_position(entity, Position::new(400.0, 0.0));

        track.advance(&mut rng, 15.0);
        let pos = track.position(entity).unwrap();
        assert_eq!(pos.y, ENEMY_DRIFT);
        assert!((pos.x - 400.0).abs() <= ENEMY_JITTER as f64);
    }

    #[test]
    fn test_dead_enemy_lingers_until_battery_empties() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let entity = track.order()[0];
        track.set_position(entity, Position::new(250.0, 90.0));

        track.fire_shot(entity);
        track.mark_dead(entity);

        // Dead but holding a live shot: retained.
        track.cull(&mut scheduler);
        assert_eq!(track.len(), 1);

        // Drain the battery off the bottom edge, then cull again.
        for _ in 0..40 {
            track.advance(&mut rng, 15.0);
        }
        track.fire_shot(entity);
        track.cull(&mut scheduler);

        assert!(track.is_empty());
        assert!(!track.arena().contains(entity));
        assert!(!track.has_shot_timer(entity));
        // Its sub-timer fires no more.
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_off_screen_enemy_culled_with_sub_timer() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let entity = track.order()[0];
        track.set_position(entity, Position::new(400.0, 641.0));

        track.cull(&mut scheduler);
        assert!(track.is_empty());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_spawn_culls_the_rest_of_the_collection() {
        let (mut track, mut scheduler, mut rng) = setup();
        track.spawn(&mut rng, &mut scheduler, 0);
        let stale = track.order()[0];
        track.set_position(stale, Position::new(400.0, 700.0));

        // The next spawn's filter pass removes the off-screen enemy.
        track.spawn(&mut rng, &mut scheduler, 1500);
        assert_eq!(track.len(), 1);
        assert!(!track.arena().contains(stale));
    }
}
