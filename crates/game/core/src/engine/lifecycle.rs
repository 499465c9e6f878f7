//! Count termination and half-inning / game transitions.

use crate::config::RuleConfig;
use crate::play::bases::force_walk;
use crate::state::{Bases, Game, GameState, GameStatus, Half};
use crate::trace::PlateAppearanceOutcome;

/// Ends the plate appearance when the count is full after a non-ending pitch.
///
/// Four balls walk the batter; three strikes (called, or a foul when two-strike
/// fouls count) retire the batter.
pub(crate) fn count_outcome(state: &mut GameState) -> Option<PlateAppearanceOutcome> {
    if state.balls >= RuleConfig::BALLS_FOR_WALK {
        force_walk(state);
        return Some(PlateAppearanceOutcome::Walk);
    }
    if state.strikes >= RuleConfig::STRIKES_FOR_STRIKEOUT {
        state.outs += 1;
        return Some(PlateAppearanceOutcome::Strikeout);
    }
    None
}

/// Applies end-of-plate-appearance bookkeeping.
///
/// Checks for a walk-off first, then rotates the lineup, then closes the half
/// inning when three outs are recorded.
pub(crate) fn complete_plate_appearance(game: &mut Game, innings_per_game: u8) {
    let final_inning = u16::from(innings_per_game);
    let state = &mut game.state;

    let walk_off = state.half == Half::Bottom
        && state.inning >= final_inning
        && state.home_score > state.away_score;

    state.advance_lineup();
    state.reset_count();

    if walk_off {
        game.status = GameStatus::Finished;
        return;
    }

    if state.outs < RuleConfig::OUTS_PER_HALF {
        return;
    }

    state.outs = 0;
    state.bases = Bases::empty();

    match state.half {
        Half::Top => {
            if state.inning >= final_inning && state.home_score > state.away_score {
                game.status = GameStatus::Finished;
            } else {
                state.half = Half::Bottom;
            }
        }
        Half::Bottom => {
            if state.inning >= final_inning && state.home_score != state.away_score {
                game.status = GameStatus::Finished;
            } else {
                state.half = Half::Top;
                state.inning = state.inning.saturating_add(1);
            }
        }
    }
}
