//! Game pipeline — the reactive composition core.
//!
//! `GamePipeline` owns the scheduler, every track, the seeded RNG, the
//! input queue, and both ends of the kill channel. Input arrives through
//! a queued-command boundary and is drained at the next dispatch; each
//! timer firing is handled synchronously by the track that owns it, and
//! frame ticks sample every track's latest value into one snapshot.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Sender};

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::commands::InputCommand;
use starfall_core::constants::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, ENEMY_FREQ_MS, GAME_SPEED_MS, HERO_MARGIN, SCORE_INCREASE,
    SHOOTING_FREQ_MS, SHOOTING_SPEED,
};
use starfall_core::enums::GamePhase;
use starfall_core::events::{GameEvent, ScoreEvent};
use starfall_core::state::WorldSnapshot;
use starfall_core::types::{Bounds, SimTime};

use crate::collision;
use crate::scheduler::{Scheduler, TimerKind};
use crate::snapshot;
use crate::tracks::score::ScoreState;
use crate::tracks::{EnemyTrack, FireGate, HeroShotTrack, ScoreTrack, ShipTracker, StarField};

/// Configuration for starting a new game. Every value is fixed at
/// startup; nothing is runtime-mutable.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Canvas dimensions.
    pub bounds: Bounds,
    /// RNG seed for determinism. Same seed = same game.
    pub seed: u64,
    /// Frame tick period (virtual ms).
    pub tick_ms: u64,
    /// Fire-trigger sampling period (virtual ms).
    pub fire_sample_ms: u64,
    /// Enemy spawn period (virtual ms).
    pub enemy_spawn_ms: u64,
    /// Shot travel per tick.
    pub shot_speed: f64,
    /// Base score per kill.
    pub score_increase: u64,
    /// Ship baseline offset from the bottom edge.
    pub hero_margin: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            seed: 42,
            tick_ms: GAME_SPEED_MS,
            fire_sample_ms: SHOOTING_FREQ_MS,
            enemy_spawn_ms: ENEMY_FREQ_MS,
            shot_speed: SHOOTING_SPEED,
            score_increase: SCORE_INCREASE,
            hero_margin: HERO_MARGIN,
        }
    }
}

/// The reactive composition core. Running until the first lethal contact,
/// then Ended forever.
pub struct GamePipeline {
    config: GameConfig,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    time: SimTime,
    phase: GamePhase,
    input_queue: VecDeque<InputCommand>,
    starfield: StarField,
    ship: ShipTracker,
    fire_gate: FireGate,
    hero_shots: HeroShotTrack,
    enemies: EnemyTrack,
    score: ScoreTrack,
    kills: Sender<ScoreEvent>,
    events: Vec<GameEvent>,
}

impl GamePipeline {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let hero_y = config.bounds.height - config.hero_margin;

        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Tick, config.tick_ms, config.tick_ms);
        scheduler.schedule(
            TimerKind::FireSample,
            config.fire_sample_ms,
            config.fire_sample_ms,
        );
        scheduler.schedule(
            TimerKind::EnemySpawn,
            config.enemy_spawn_ms,
            config.enemy_spawn_ms,
        );

        let (kills, kill_feed) = mpsc::channel();
        info!(
            "pipeline started: {}x{} canvas, seed {}",
            config.bounds.width, config.bounds.height, config.seed
        );

        Self {
            starfield: StarField::new(config.bounds, &mut rng),
            ship: ShipTracker::new(config.bounds, hero_y),
            fire_gate: FireGate::new(),
            hero_shots: HeroShotTrack::new(config.bounds, hero_y),
            enemies: EnemyTrack::new(config.bounds),
            score: ScoreTrack::new(kill_feed),
            config,
            scheduler,
            rng,
            time: SimTime::default(),
            phase: GamePhase::Running,
            input_queue: VecDeque::new(),
            kills,
            events: Vec::new(),
        }
    }

    /// Queue an input command for processing at the next dispatch.
    pub fn queue_input(&mut self, command: InputCommand) {
        self.input_queue.push_back(command);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn now_ms(&self) -> u64 {
        self.time.elapsed_ms
    }

    /// Final-score access for front-ends after the last frame.
    pub fn score(&self) -> ScoreState {
        self.score.state()
    }

    /// Virtual deadline of the next firing; `None` once the game ended.
    pub fn next_deadline_ms(&mut self) -> Option<u64> {
        if self.phase == GamePhase::Ended {
            return None;
        }
        self.scheduler.next_deadline()
    }

    /// Dispatch the next firing. Returns a snapshot only when the firing
    /// was a frame tick and the game survived it.
    pub fn advance(&mut self) -> Option<WorldSnapshot> {
        if self.phase == GamePhase::Ended {
            return None;
        }
        self.process_inputs();

        let firing = self.scheduler.pop_next()?;
        self.time.elapsed_ms = firing.at_ms;

        match firing.kind {
            TimerKind::Tick => return self.on_tick(),
            TimerKind::FireSample => {
                let signal = self.fire_gate.sample(firing.at_ms);
                self.hero_shots
                    .on_fire_sample(signal, self.ship.position().x);
            }
            TimerKind::EnemySpawn => {
                let pos = self
                    .enemies
                    .spawn(&mut self.rng, &mut self.scheduler, firing.at_ms);
                self.events.push(GameEvent::EnemySpawned { x: pos.x });
            }
            TimerKind::EnemyShot(entity) => self.enemies.fire_shot(entity),
        }
        None
    }

    /// Drive the pipeline until it produces a frame. `None` means the
    /// game has ended.
    pub fn next_frame(&mut self) -> Option<WorldSnapshot> {
        while self.phase == GamePhase::Running {
            if let Some(frame) = self.advance() {
                return Some(frame);
            }
        }
        None
    }

    fn process_inputs(&mut self) {
        while let Some(command) = self.input_queue.pop_front() {
            match command {
                InputCommand::PointerMoved { x } => self.ship.pointer_moved(x),
                InputCommand::FireTriggered { source } => self.fire_gate.trigger(source),
            }
        }
    }

    /// One frame tick: advance every track, resolve hits, settle the
    /// score, then sample everything into a snapshot and evaluate the
    /// terminal condition.
    fn on_tick(&mut self) -> Option<WorldSnapshot> {
        self.time.tick += 1;

        self.starfield.advance();
        self.enemies.advance(&mut self.rng, self.config.shot_speed);
        self.hero_shots.advance(self.config.shot_speed);
        collision::resolve_hits(
            &mut self.hero_shots,
            &mut self.enemies,
            &self.kills,
            self.config.score_increase,
            self.time.elapsed_ms,
            &mut self.events,
        );
        self.score.drain();

        let events = std::mem::take(&mut self.events);
        let frame = snapshot::build_snapshot(
            self.time,
            self.phase,
            &self.starfield,
            &self.ship,
            &self.enemies,
            &self.hero_shots,
            self.score.state(),
            events,
        );

        if collision::is_game_over(&frame) {
            info!(
                "game over at tick {} ({}ms) with score {}",
                self.time.tick,
                self.time.elapsed_ms,
                self.score.state().value
            );
            self.phase = GamePhase::Ended;
            self.scheduler.cancel_all();
            return None;
        }

        debug!(
            "tick {}: {} enemies, {} hero shots",
            self.time.tick,
            self.enemies.len(),
            self.hero_shots.shots().len()
        );
        Some(frame)
    }
}
