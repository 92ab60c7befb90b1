//! Per-frame simulation step
//!
//! The host calls [`tick`] once per rendered frame with a wall-clock delta.
//! The delta is clamped here, so a stalled tab cannot produce a physics jump,
//! and a non-finite or negative first delta collapses to zero. Idle, Paused
//! and Lost are full suspensions: nothing advances, no timers elapse.

use super::collision::{PassOutcome, score_and_collide};
use super::particles;
use super::spawn::advance_spawners;
use super::state::{Ending, EndingStage, GameEvent, GameState, Phase};
use crate::consts::*;
use crate::{ease_out_cubic, lerp};

/// Advance the session by one host-supplied delta (seconds).
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_DT)
    } else {
        0.0
    };

    match state.phase {
        Phase::Idle | Phase::Paused | Phase::Lost => {}
        Phase::Running => tick_running(state, dt),
        Phase::Ending => tick_ending(state, dt),
    }
}

fn tick_running(state: &mut GameState, dt: f32) {
    state.elapsed += dt;

    // Stepwise speed-up; monotone within the attempt
    let t = &state.tuning;
    let steps = (state.elapsed / t.speed_step_secs).floor();
    state.scroll_speed = (t.scroll_speed + steps * t.speed_step).min(t.scroll_speed_max);

    step_player(state, dt);
    advance_spawners(state, dt);
    advance_entities(state, dt);
    particles::step_hearts(state, dt);

    match score_and_collide(state) {
        PassOutcome::None => {}
        PassOutcome::Won => begin_ending(state),
        PassOutcome::Lost => begin_lost(state),
    }
}

/// Vertical kinematics with a ground clamp. The jump budget refills only on
/// the airborne-to-grounded transition, never while resting on the ground.
fn step_player(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    player.vy += state.tuning.gravity * dt;
    player.y += player.vy * dt;

    let rest_y = GROUND_Y - PLAYER_H;
    if player.y >= rest_y {
        player.y = rest_y;
        player.vy = 0.0;
        if !player.grounded {
            player.grounded = true;
            player.jumps_left = MAX_JUMPS;
        }
    }
}

/// Translate and cull obstacles and signs. Signs scroll at a fraction of
/// field speed as a depth cue. `retain` keeps survivor order stable.
fn advance_entities(state: &mut GameState, dt: f32) {
    let scroll = state.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.rect.x -= scroll * dt;
    }
    state.obstacles.retain(|o| o.rect.right() > OBSTACLE_CULL_X);

    let sign_speed = scroll * state.tuning.sign_parallax;
    for sign in &mut state.signs {
        sign.x -= sign_speed * dt;
        sign.ttl -= dt;
    }
    let grace = state.tuning.sign_ttl_grace;
    state
        .signs
        .retain(|s| s.right() > SIGN_CULL_X && s.ttl > -grace);
}

fn begin_lost(state: &mut GameState) {
    state.phase = Phase::Lost;
    state.player.alive = false;
    state.events.push(GameEvent::Lost);
    log::info!("session lost at score {}", state.score);
}

/// Enter the scripted ending: the field empties, confetti rains, and the pair
/// walks to the door.
fn begin_ending(state: &mut GameState) {
    state.phase = Phase::Ending;
    state.obstacles.clear();
    state.signs.clear();
    state.hearts.clear();
    particles::spawn_confetti(state);
    state.ending = Some(Ending {
        stage: EndingStage::Approach,
        t: 0.0,
        door_open: 0.0,
        start_x: state.player.x,
    });
    log::info!("win threshold reached, ending timeline started");
}

fn tick_ending(state: &mut GameState, dt: f32) {
    particles::step_confetti(state, dt);

    let Some(ending) = state.ending.as_mut() else {
        return;
    };
    ending.t += dt;

    match ending.stage {
        EndingStage::Approach => {
            let frac = ease_out_cubic(ending.t / state.tuning.approach_secs);
            state.player.x = lerp(ending.start_x, DOOR_X, frac);
            if ending.t >= state.tuning.approach_secs {
                state.player.x = DOOR_X;
                ending.stage = EndingStage::DoorOpen;
                ending.t = 0.0;
            }
        }
        EndingStage::DoorOpen => {
            ending.door_open = ease_out_cubic(ending.t / state.tuning.door_secs);
            state
                .events
                .push(GameEvent::EndingProgress(ending.door_open));
            if ending.t >= state.tuning.door_secs {
                ending.door_open = 1.0;
                ending.stage = EndingStage::Reveal;
                ending.t = 0.0;
                state.events.push(GameEvent::Won);
                log::info!("ending reveal reached");
            }
        }
        // Held until an explicit restart; confetti keeps recycling above.
        EndingStage::Reveal => {}
    }
}
