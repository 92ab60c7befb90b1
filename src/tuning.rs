//! Data-driven game balance
//!
//! Every gameplay number that is balance rather than geometry lives here, so a
//! host can override it (the native demo reads an optional `tuning.json`).
//! Defaults are the shipped balance.

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs. All speeds are px/s, accelerations px/s², times in
/// seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration on the player body
    pub gravity: f32,
    /// Vertical velocity set on an accepted jump (negative = up)
    pub jump_impulse: f32,

    /// Base leftward field speed
    pub scroll_speed: f32,
    /// Elapsed seconds between scroll speed steps
    pub speed_step_secs: f32,
    /// Speed added per step
    pub speed_step: f32,
    /// Cap on the stepped scroll speed
    pub scroll_speed_max: f32,

    /// Delay before the very first obstacle so the field is not empty at start
    pub first_obstacle_delay: f32,
    /// Obstacle countdown resample range at t=0
    pub obstacle_gap_min: f32,
    pub obstacle_gap_max: f32,
    /// The upper bound tightens by this much per elapsed second
    pub gap_tighten_per_sec: f32,
    /// Hard floor on the pre-jitter interval; the ramp can never cross it
    pub obstacle_gap_floor: f32,

    /// Delay before the very first sign
    pub first_sign_delay: f32,
    /// Fixed sign countdown; also the deferral when a sign is still live
    pub sign_interval: f32,
    /// Sign display duration
    pub sign_ttl: f32,
    /// Seconds past expiry a sign may linger (fade-out grace)
    pub sign_ttl_grace: f32,
    /// Signs scroll at this fraction of field speed (parallax cue)
    pub sign_parallax: f32,

    /// Per-side shrink applied to the player's visible box before hit testing
    pub player_hit_inset: f32,
    /// Per-side shrink applied to obstacle boxes (smaller than the player's)
    pub obstacle_hit_inset: f32,

    /// Points per first full pass-through of an obstacle
    pub score_per_pass: u32,
    /// Score at which the session transitions into the ending
    pub win_score: u32,

    /// Hearts emitted per accepted jump
    pub heart_burst: usize,
    /// Confetti pieces spawned once at the win transition
    pub confetti_count: usize,

    /// Ending: seconds the player takes to reach the door
    pub approach_secs: f32,
    /// Ending: seconds the door takes to open
    pub door_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1440.0,
            jump_impulse: -630.0,

            scroll_speed: 126.0,
            speed_step_secs: 20.0,
            speed_step: 9.0,
            scroll_speed_max: 189.0,

            first_obstacle_delay: 1.2,
            obstacle_gap_min: 2.7,
            obstacle_gap_max: 4.1,
            gap_tighten_per_sec: 0.02,
            obstacle_gap_floor: 1.1,

            first_sign_delay: 2.5,
            sign_interval: 7.0,
            sign_ttl: 6.0,
            sign_ttl_grace: 0.25,
            sign_parallax: 0.6,

            player_hit_inset: 10.0,
            obstacle_hit_inset: 6.0,

            score_per_pass: 10,
            win_score: 120,

            heart_burst: 6,
            confetti_count: 90,

            approach_secs: 1.6,
            door_secs: 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let t = Tuning::default();
        assert!(t.obstacle_gap_min <= t.obstacle_gap_max);
        assert!(t.obstacle_gap_floor <= t.obstacle_gap_min);
        assert!(t.scroll_speed <= t.scroll_speed_max);
        assert!(t.jump_impulse < 0.0);
        assert!(t.obstacle_hit_inset < t.player_hit_inset);
    }

    #[test]
    fn test_partial_json_override() {
        // Hosts may supply only the knobs they care about
        let t: Tuning = serde_json::from_str(r#"{"win_score": 40, "gravity": 900.0}"#).unwrap();
        assert_eq!(t.win_score, 40);
        assert_eq!(t.gravity, 900.0);
        assert_eq!(t.score_per_pass, Tuning::default().score_per_pass);
    }
}
