//! Decorative particle systems
//!
//! Hearts burst from the pair's joined hands on every accepted jump and die
//! when their lifetime runs out. Confetti is spawned once at the win
//! transition and, instead of dying, recycles to a random position above the
//! field for as long as the ending runs. Neither system touches gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::*;

const HEART_GRAVITY: f32 = 420.0;

/// Emit one burst of hearts at the hand position.
pub fn spawn_heart_burst(state: &mut GameState) {
    let origin = state.player.hand_pos();
    for _ in 0..state.tuning.heart_burst {
        let vx = state.rng.random_range(-70.0..=70.0);
        let vy = state.rng.random_range(-260.0..=-120.0);
        state.hearts.push(Particle {
            pos: origin,
            vel: Vec2::new(vx, vy),
            age: 0.0,
            lifetime: state.rng.random_range(0.7..=1.1),
            rot: state.rng.random_range(-0.5..=0.5),
            rot_vel: state.rng.random_range(-3.0..=3.0),
            size: state.rng.random_range(5.0..=9.0),
        });
    }
}

/// Simple gravity plus linear drift; expired hearts are culled.
pub fn step_hearts(state: &mut GameState, dt: f32) {
    for heart in &mut state.hearts {
        heart.vel.y += HEART_GRAVITY * dt;
        heart.pos += heart.vel * dt;
        heart.rot += heart.rot_vel * dt;
        heart.age += dt;
    }
    state.hearts.retain(|h| h.age <= h.lifetime);
}

/// One-shot bulk spawn at the win transition, scattered above the field.
pub fn spawn_confetti(state: &mut GameState) {
    state.confetti.clear();
    for _ in 0..state.tuning.confetti_count {
        let x = state.rng.random_range(0.0..=FIELD_WIDTH);
        let y = state.rng.random_range(-FIELD_HEIGHT..=0.0);
        let piece = confetti_piece(state, x, y);
        state.confetti.push(piece);
    }
}

/// Constant fall plus rotation; a piece that leaves the bottom reappears at a
/// random position above the field rather than being destroyed. Only called
/// while the ending runs.
pub fn step_confetti(state: &mut GameState, dt: f32) {
    for i in 0..state.confetti.len() {
        let piece = &mut state.confetti[i];
        piece.pos += piece.vel * dt;
        piece.rot += piece.rot_vel * dt;
        if piece.pos.y > FIELD_HEIGHT + 20.0 {
            let x = state.rng.random_range(0.0..=FIELD_WIDTH);
            let y = state.rng.random_range(-120.0..=-20.0);
            state.confetti[i] = confetti_piece(state, x, y);
        }
    }
}

fn confetti_piece(state: &mut GameState, x: f32, y: f32) -> Particle {
    Particle {
        pos: Vec2::new(x, y),
        vel: Vec2::new(
            state.rng.random_range(-30.0..=30.0),
            state.rng.random_range(120.0..=260.0),
        ),
        age: 0.0,
        lifetime: f32::MAX,
        rot: state.rng.random_range(0.0..=std::f32::consts::TAU),
        rot_vel: state.rng.random_range(-4.0..=4.0),
        size: state.rng.random_range(4.0..=8.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(11);
        state.start();
        state
    }

    #[test]
    fn test_heart_burst_size_and_origin() {
        let mut state = running_state();
        spawn_heart_burst(&mut state);
        assert_eq!(state.hearts.len(), state.tuning.heart_burst);
        let origin = state.player.hand_pos();
        for h in &state.hearts {
            assert_eq!(h.pos, origin);
            assert!(h.vel.y < 0.0); // bursts go up
        }
    }

    #[test]
    fn test_hearts_fade_then_die() {
        let mut state = running_state();
        spawn_heart_burst(&mut state);
        step_hearts(&mut state, 0.033);
        let first = &state.hearts[0];
        assert!(first.alpha() < 1.0);
        assert!(first.alpha() > 0.0);

        // Step past the longest possible lifetime
        for _ in 0..60 {
            step_hearts(&mut state, 0.033);
        }
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_confetti_recycles_instead_of_dying() {
        let mut state = running_state();
        spawn_confetti(&mut state);
        let count = state.confetti.len();
        assert_eq!(count, state.tuning.confetti_count);

        // Long enough for every piece to cross the field at least once
        for _ in 0..2000 {
            step_confetti(&mut state, 0.033);
        }
        assert_eq!(state.confetti.len(), count);
        for piece in &state.confetti {
            assert!(piece.pos.y <= FIELD_HEIGHT + 20.0 + 260.0 * 0.033);
        }
    }
}
