//! Session state and core simulation types
//!
//! One [`GameState`] is one session. It owns every live entity, the seeded
//! RNG, and the session phase; nothing outside `sim` mutates any of it. Hosts
//! drive it through the control methods here plus [`super::tick`], and read it
//! back as a snapshot for rendering.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::Tuning;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-start; no simulation advances
    Idle,
    /// Full simulation active
    Running,
    /// Frozen; timers and positions held
    Paused,
    /// Terminal per-attempt; player marked not-alive
    Lost,
    /// Terminal win path; the scripted ending timeline runs
    Ending,
}

/// Sub-phase of the scripted ending timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndingStage {
    /// Player travels toward the door
    Approach,
    /// Door interpolates open
    DoorOpen,
    /// Final state held until restart
    Reveal,
}

/// Scripted ending timeline state, live only while `phase == Ending`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ending {
    pub stage: EndingStage,
    /// Seconds elapsed in the current stage
    pub t: f32,
    /// Door-open fraction in [0, 1]
    pub door_open: f32,
    /// Player x at the moment the ending began
    pub start_x: f32,
}

/// The closed set of obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Bus,
    Subway,
    Taxi,
}

impl ObstacleKind {
    /// Sprite box size. The taxi is shorter and wider than the others.
    pub fn size(self) -> (f32, f32) {
        match self {
            ObstacleKind::Bus | ObstacleKind::Subway => (92.0, 92.0),
            ObstacleKind::Taxi => (104.0, 72.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObstacleKind::Bus => "BUS",
            ObstacleKind::Subway => "SUBWAY",
            ObstacleKind::Taxi => "TAXI",
        }
    }
}

/// An approaching obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Set at most once, when the trailing edge passes the player
    pub scored: bool,
}

impl Obstacle {
    /// Collision box: the sprite box shrunk by a per-side inset
    pub fn hit_box(&self, inset: f32) -> Rect {
        self.rect.shrink(inset)
    }
}

/// A route-instruction callout. At most one is live at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sign {
    pub x: f32,
    pub y: f32,
    pub text: &'static str,
    /// Remaining display time; may dip slightly negative during fade-out
    pub ttl: f32,
}

impl Sign {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + SIGN_W
    }
}

/// A decorative particle (heart or confetti piece). No gameplay effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub lifetime: f32,
    pub rot: f32,
    pub rot_vel: f32,
    pub size: f32,
}

impl Particle {
    /// Opacity from remaining lifetime fraction
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// The controllable pair. Horizontal position is fixed while running; the
/// field scrolls instead. Only the ending timeline moves `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub jumps_left: u8,
    pub grounded: bool,
    pub alive: bool,
}

impl PlayerBody {
    fn at_start() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_H,
            vy: 0.0,
            jumps_left: MAX_JUMPS,
            grounded: true,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_W, PLAYER_H)
    }

    pub fn hit_box(&self, inset: f32) -> Rect {
        self.rect().shrink(inset)
    }

    /// Where the pair holds the heart; jump bursts are emitted here
    pub fn hand_pos(&self) -> Vec2 {
        Vec2::new(self.x + 36.0, self.y + 46.0)
    }
}

/// Output events the host must observe, drained via [`GameState::take_events`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    Lost,
    Won,
    /// Door-open fraction during the ending, in [0, 1]
    EndingProgress(f32),
}

/// Complete session state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Session seed; the RNG is re-seeded from it on every (re)start
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,

    pub phase: Phase,
    /// Seconds spent in `Running` this attempt
    pub elapsed: f32,
    pub score: u32,
    /// Current leftward field speed; steps up with elapsed time
    pub scroll_speed: f32,

    pub player: PlayerBody,
    pub obstacles: Vec<Obstacle>,
    pub signs: Vec<Sign>,
    pub hearts: Vec<Particle>,
    pub confetti: Vec<Particle>,

    /// Countdown to the next obstacle spawn
    pub obstacle_timer: f32,
    /// Countdown to the next sign spawn attempt
    pub sign_timer: f32,
    /// Ever-incrementing cursor into the route template sequence
    pub(crate) sign_cursor: usize,

    pub ending: Option<Ending>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with the shipped balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle session with host-supplied balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Idle,
            elapsed: 0.0,
            score: 0,
            scroll_speed: tuning.scroll_speed,
            player: PlayerBody::at_start(),
            obstacles: Vec::new(),
            signs: Vec::new(),
            hearts: Vec::new(),
            confetti: Vec::new(),
            obstacle_timer: tuning.first_obstacle_delay,
            sign_timer: tuning.first_sign_delay,
            sign_cursor: 0,
            ending: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// (Re)initialize every piece of session and entity state and transition
    /// to `Running`. Valid from any phase; a restart from `Lost` or `Ending`
    /// is indistinguishable from a fresh start.
    pub fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = Phase::Running;
        self.elapsed = 0.0;
        self.score = 0;
        self.scroll_speed = self.tuning.scroll_speed;
        self.player = PlayerBody::at_start();
        self.obstacles.clear();
        self.signs.clear();
        self.hearts.clear();
        self.confetti.clear();
        self.obstacle_timer = self.tuning.first_obstacle_delay;
        self.sign_timer = self.tuning.first_sign_delay;
        self.sign_cursor = 0;
        self.ending = None;
        self.events.clear();
        log::info!("session started (seed {})", self.seed);
    }

    /// Freeze the simulation. Only permitted from `Running`; pausing the
    /// scripted ending (or anything else) is a no-op.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Undo a pause. No-op outside `Paused`.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Single boolean-intent jump input, debounced by the jump budget. A
    /// request outside `Running`, while dead, or with no jumps left is a
    /// silent no-op.
    pub fn request_jump(&mut self) {
        if self.phase != Phase::Running || !self.player.alive || self.player.jumps_left == 0 {
            return;
        }
        self.player.vy = self.tuning.jump_impulse;
        self.player.grounded = false;
        self.player.jumps_left -= 1;
        super::particles::spawn_heart_burst(self);
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_session_does_not_accept_jumps() {
        let mut state = GameState::new(7);
        assert_eq!(state.phase, Phase::Idle);
        state.request_jump();
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.player.jumps_left, MAX_JUMPS);
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_pause_resume_only_from_expected_phases() {
        let mut state = GameState::new(7);
        state.pause();
        assert_eq!(state.phase, Phase::Idle);
        state.resume();
        assert_eq!(state.phase, Phase::Idle);

        state.start();
        state.resume(); // not paused: no-op
        assert_eq!(state.phase, Phase::Running);
        state.pause();
        assert_eq!(state.phase, Phase::Paused);
        state.pause(); // already paused: no-op
        assert_eq!(state.phase, Phase::Paused);
        state.resume();
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_jump_budget_debounce() {
        let mut state = GameState::new(7);
        state.start();
        state.request_jump();
        state.request_jump();
        assert_eq!(state.player.jumps_left, 0);
        let vy_after_second = state.player.vy;
        state.request_jump(); // budget exhausted: silent no-op
        assert_eq!(state.player.jumps_left, 0);
        assert_eq!(state.player.vy, vy_after_second);
        // Two bursts of hearts, not three
        assert_eq!(state.hearts.len(), 2 * state.tuning.heart_burst);
    }

    #[test]
    fn test_restart_matches_fresh_start() {
        let mut played = GameState::new(42);
        played.start();
        played.request_jump();
        super::super::tick(&mut played, 0.033);
        super::super::tick(&mut played, 0.033);
        played.take_events();
        played.start();

        let mut fresh = GameState::new(42);
        fresh.start();
        assert_eq!(played, fresh);
    }

    #[test]
    fn test_taxi_is_shorter_and_wider() {
        let (bw, bh) = ObstacleKind::Bus.size();
        let (tw, th) = ObstacleKind::Taxi.size();
        assert!(tw > bw);
        assert!(th < bh);
    }
}
