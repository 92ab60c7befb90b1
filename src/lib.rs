//! Duo Runner - a side-scrolling couple runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session state)
//! - `tuning`: Data-driven game balance
//!
//! The host (wasm canvas loop or native demo, see `main.rs`) owns scheduling and
//! rendering; the simulation only ever advances through [`sim::tick`].

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Fixed field geometry and clock limits
pub mod consts {
    /// Logical field size in px (the renderer scales to the actual canvas)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 700.0;
    /// Top of the ground strip; bodies rest with their bottom edge here
    pub const GROUND_Y: f32 = 520.0;

    /// Player sprite box (fixed x, the field scrolls instead)
    pub const PLAYER_X: f32 = 70.0;
    pub const PLAYER_W: f32 = 70.0;
    pub const PLAYER_H: f32 = 70.0;
    /// Jump budget restored on every airborne-to-grounded transition
    pub const MAX_JUMPS: u8 = 2;

    /// Per-tick delta clamp in seconds; bounds integration error after a stall
    /// (e.g. the hosting tab losing focus)
    pub const MAX_TICK_DT: f32 = 0.033;

    /// Obstacles are culled once their right edge passes this x
    pub const OBSTACLE_CULL_X: f32 = -30.0;
    /// Signs are wider and fade out, so they get a larger-magnitude threshold
    pub const SIGN_CULL_X: f32 = -160.0;
    /// Sign callout box width
    pub const SIGN_W: f32 = 220.0;
    /// Baseline y of sign callouts (they float above the traffic)
    pub const SIGN_Y: f32 = 300.0;

    /// Where the player walks to during the ending approach
    pub const DOOR_X: f32 = 620.0;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Ease-out cubic, clamped to [0, 1]; used by the ending timeline
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}
