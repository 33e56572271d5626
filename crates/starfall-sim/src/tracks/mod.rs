//! Independently updating tracks.
//!
//! Each track owns its accumulated state and reacts to the event sources
//! that feed it; the pipeline samples their latest values into snapshots.

pub mod enemies;
pub mod fire_gate;
pub mod hero_shots;
pub mod score;
pub mod ship;
pub mod starfield;

pub use enemies::EnemyTrack;
pub use fire_gate::FireGate;
pub use hero_shots::HeroShotTrack;
pub use score::ScoreTrack;
pub use ship::ShipTracker;
pub use starfield::StarField;
