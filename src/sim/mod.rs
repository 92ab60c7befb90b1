//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per rendered frame, delta clamped at the boundary
//! - Seeded RNG only
//! - Stable entity order (spawn order, culled with `retain`)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{PassOutcome, score_and_collide};
pub use rect::Rect;
pub use spawn::SIGN_TEMPLATES;
pub use state::{
    Ending, EndingStage, GameEvent, GameState, Obstacle, ObstacleKind, Particle, Phase,
    PlayerBody, Sign,
};
pub use tick::tick;
