//! Timer-driven procedural spawning
//!
//! Two independent countdowns: one for obstacles (resampled from a range that
//! tightens with elapsed session time) and one for signs (fixed interval,
//! at most one live sign). Both are primed with short initial delays so the
//! field is not empty right after start.

use rand::Rng;

use super::rect::Rect;
use super::state::{GameState, Obstacle, ObstacleKind, Sign};
use crate::consts::*;

/// Route instructions, cycled in order. The cursor increments on every spawn
/// and wraps by modulo, so the sequence repeats for long sessions.
pub const SIGN_TEMPLATES: [&str; 5] = [
    "Hop on bus 705 toward River Gate",
    "Transfer to line 2 at Central Station",
    "Ride three stops, get off at City Hall",
    "Exit 4, then two blocks straight ahead",
    "Taxi stand is right by the north plaza",
];

/// Advance both spawn countdowns; called once per running tick.
pub fn advance_spawners(state: &mut GameState, dt: f32) {
    state.obstacle_timer -= dt;
    if state.obstacle_timer <= 0.0 {
        spawn_obstacle(state);
        state.obstacle_timer = next_obstacle_gap(state);
    }

    state.sign_timer -= dt;
    if state.sign_timer <= 0.0 {
        if state.signs.is_empty() {
            spawn_sign(state);
        }
        // A live sign defers the next attempt rather than starving it: the
        // timer resets either way.
        state.sign_timer = state.tuning.sign_interval;
    }
}

/// Resample the obstacle countdown. The upper bound tightens as the session
/// runs (the difficulty ramp) but the pre-jitter interval is clamped to the
/// floor, so jitter can never produce a sub-minimum gap.
fn next_obstacle_gap(state: &mut GameState) -> f32 {
    let t = &state.tuning;
    let hi = (t.obstacle_gap_max - state.elapsed * t.gap_tighten_per_sec).max(t.obstacle_gap_floor);
    let lo = t.obstacle_gap_min.min(hi);
    state.rng.random_range(lo..=hi)
}

fn spawn_obstacle(state: &mut GameState) {
    let kind = match state.rng.random_range(0..3u32) {
        0 => ObstacleKind::Bus,
        1 => ObstacleKind::Subway,
        _ => ObstacleKind::Taxi,
    };
    let (w, h) = kind.size();
    state.obstacles.push(Obstacle {
        kind,
        // Just past the right edge, wheels slightly sunk into the ground strip
        rect: Rect::new(FIELD_WIDTH + 20.0, GROUND_Y - h + 22.0, w, h),
        scored: false,
    });
}

fn spawn_sign(state: &mut GameState) {
    let text = SIGN_TEMPLATES[state.sign_cursor % SIGN_TEMPLATES.len()];
    state.sign_cursor += 1;
    state.signs.push(Sign {
        x: FIELD_WIDTH + 40.0,
        y: SIGN_Y,
        text,
        ttl: state.tuning.sign_ttl,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_first_obstacle_arrives_after_initial_delay() {
        let mut state = running_state(1);
        state.obstacle_timer = 0.05;
        advance_spawners(&mut state, 0.033);
        assert!(state.obstacles.is_empty());
        advance_spawners(&mut state, 0.033);
        assert_eq!(state.obstacles.len(), 1);
        let o = &state.obstacles[0];
        assert_eq!(o.rect.x, FIELD_WIDTH + 20.0);
        assert!(!o.scored);
        // Countdown was resampled into the configured range
        let t = &state.tuning;
        assert!(state.obstacle_timer >= t.obstacle_gap_floor);
        assert!(state.obstacle_timer <= t.obstacle_gap_max);
    }

    #[test]
    fn test_gap_never_drops_below_floor() {
        let mut state = running_state(2);
        // Far enough along that the tightened upper bound has crossed the floor
        state.elapsed = 100_000.0;
        for _ in 0..200 {
            let gap = next_obstacle_gap(&mut state);
            assert!((gap - state.tuning.obstacle_gap_floor).abs() < 1e-4);
        }
    }

    #[test]
    fn test_gap_range_tightens_with_elapsed_time() {
        let mut early = running_state(3);
        let mut late = running_state(3);
        late.elapsed = 60.0;
        let early_max = (0..200)
            .map(|_| next_obstacle_gap(&mut early))
            .fold(0.0f32, f32::max);
        let late_max = (0..200)
            .map(|_| next_obstacle_gap(&mut late))
            .fold(0.0f32, f32::max);
        assert!(late_max < early_max);
        assert!(late_max >= late.tuning.obstacle_gap_floor);
    }

    #[test]
    fn test_at_most_one_live_sign_and_timer_still_resets() {
        let mut state = running_state(4);
        state.sign_timer = 0.0;
        advance_spawners(&mut state, 0.01);
        assert_eq!(state.signs.len(), 1);

        // Force the timer down while the sign is still live: no second sign,
        // but the countdown is re-armed rather than left at zero.
        state.sign_timer = 0.0;
        advance_spawners(&mut state, 0.01);
        assert_eq!(state.signs.len(), 1);
        assert_eq!(state.sign_timer, state.tuning.sign_interval);
    }

    #[test]
    fn test_sign_templates_cycle_in_order() {
        let mut state = running_state(5);
        let mut seen = Vec::new();
        for _ in 0..SIGN_TEMPLATES.len() + 2 {
            state.sign_timer = 0.0;
            state.signs.clear();
            advance_spawners(&mut state, 0.01);
            seen.push(state.signs[0].text);
        }
        for (i, text) in seen.iter().enumerate() {
            assert_eq!(*text, SIGN_TEMPLATES[i % SIGN_TEMPLATES.len()]);
        }
    }

    #[test]
    fn test_obstacle_kinds_are_uniformly_sampled() {
        let mut state = running_state(6);
        for _ in 0..300 {
            spawn_obstacle(&mut state);
        }
        let buses = state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Bus)
            .count();
        let taxis = state
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Taxi)
            .count();
        // Loose sanity bounds; the draw is uniform over three kinds
        assert!(buses > 50 && buses < 150);
        assert!(taxis > 50 && taxis < 150);
    }
}
