//! Pass-through scoring and hit-box collision
//!
//! Runs once per tick, after entities have moved. Scoring comes first: an
//! obstacle whose trailing edge has cleared the player scores exactly once,
//! and crossing the win threshold short-circuits the rest of the frame.
//! Collision then tests the shrunk player box against each shrunk obstacle
//! box and reports the first overlap. Transitions are applied by the caller.

use super::state::{GameEvent, GameState};

/// Outcome of a scoring + collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    None,
    /// Score crossed the win threshold this tick
    Won,
    /// The player's hit-box overlapped an obstacle's hit-box
    Lost,
}

pub fn score_and_collide(state: &mut GameState) -> PassOutcome {
    let leading_edge = state.player.x;
    let per_pass = state.tuning.score_per_pass;
    let win_score = state.tuning.win_score;

    for obstacle in &mut state.obstacles {
        if !obstacle.scored && obstacle.rect.right() < leading_edge {
            obstacle.scored = true;
            state.score += per_pass;
            state.events.push(GameEvent::ScoreChanged(state.score));
            if state.score >= win_score {
                // Win short-circuits remaining scoring and collision checks
                return PassOutcome::Won;
            }
        }
    }

    let player_box = state.player.hit_box(state.tuning.player_hit_inset);
    for obstacle in &state.obstacles {
        if player_box.overlaps(&obstacle.hit_box(state.tuning.obstacle_hit_inset)) {
            return PassOutcome::Lost;
        }
    }

    PassOutcome::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Obstacle, ObstacleKind};

    fn running_state() -> GameState {
        let mut state = GameState::new(9);
        state.start();
        state
    }

    fn obstacle_at(x: f32) -> Obstacle {
        let (w, h) = ObstacleKind::Bus.size();
        Obstacle {
            kind: ObstacleKind::Bus,
            rect: Rect::new(x, GROUND_Y - h + 22.0, w, h),
            scored: false,
        }
    }

    #[test]
    fn test_pass_through_scores_once() {
        let mut state = running_state();
        state.obstacles.push(obstacle_at(PLAYER_X - 100.0));
        assert_eq!(score_and_collide(&mut state), PassOutcome::None);
        assert_eq!(state.score, 10);
        assert!(state.obstacles[0].scored);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::ScoreChanged(10)]
        );

        // Same obstacle on a later tick: no double counting
        assert_eq!(score_and_collide(&mut state), PassOutcome::None);
        assert_eq!(state.score, 10);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_win_short_circuits_remaining_obstacles() {
        let mut state = running_state();
        state.score = state.tuning.win_score - state.tuning.score_per_pass;
        state.obstacles.push(obstacle_at(PLAYER_X - 200.0));
        state.obstacles.push(obstacle_at(PLAYER_X - 100.0));
        assert_eq!(score_and_collide(&mut state), PassOutcome::Won);
        assert_eq!(state.score, state.tuning.win_score);
        // The second passed obstacle was not processed this frame
        assert!(!state.obstacles[1].scored);
    }

    #[test]
    fn test_insets_make_near_misses_forgiving() {
        let mut state = running_state();
        // Visible boxes overlap by a few px, inside the combined insets
        let overlap = state.tuning.player_hit_inset + state.tuning.obstacle_hit_inset - 2.0;
        state
            .obstacles
            .push(obstacle_at(state.player.rect().right() - overlap));
        assert_eq!(score_and_collide(&mut state), PassOutcome::None);
    }

    #[test]
    fn test_real_overlap_is_lost() {
        let mut state = running_state();
        state.obstacles.push(obstacle_at(PLAYER_X + 5.0));
        assert_eq!(score_and_collide(&mut state), PassOutcome::Lost);
    }

    #[test]
    fn test_airborne_player_clears_taxi() {
        let mut state = running_state();
        let (w, h) = ObstacleKind::Taxi.size();
        state.obstacles.push(Obstacle {
            kind: ObstacleKind::Taxi,
            rect: Rect::new(PLAYER_X, GROUND_Y - h + 22.0, w, h),
            scored: false,
        });
        // Lift the player well above the taxi roof
        state.player.y = GROUND_Y - h + 22.0 - PLAYER_H - 20.0;
        assert_eq!(score_and_collide(&mut state), PassOutcome::None);
    }
}
