//! Ground balls fielded cleanly.
//!
//! The first applicable branch wins: a play at home with a runner on third, then a
//! double-play attempt with a runner on first, then a plain out at first.

use crate::config::{RuleConfig, ThrowHomePolicy};
use crate::env::RandomSource;
use crate::state::{Bases, GameState, ScoreContext};
use crate::trace::{Decision, PlateAppearanceOutcome, TraceDetail, TraceStep, Verdict};

use super::probability::{STANDARD_RANGE, roll_chance};

/// Chance the fielder retires the runner trying to score from third.
pub const PLAY_AT_HOME_OUT_CHANCE: f64 = 0.60;
/// Chance a ground ball with a runner on first becomes two outs.
pub const DOUBLE_PLAY_CHANCE: f64 = 0.35;

/// Whether the fielder goes home with the runner from third.
pub fn throws_home(policy: ThrowHomePolicy, outs: u8, context: ScoreContext) -> bool {
    match policy {
        ThrowHomePolicy::Never => false,
        ThrowHomePolicy::Always => true,
        ThrowHomePolicy::Situational => {
            outs < 2 || matches!(context, ScoreContext::Tied | ScoreContext::BattingBehind)
        }
    }
}

/// Resolves a ground ball that was neither a hit nor an error.
pub fn resolve_ground_out<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rules: &RuleConfig,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> PlateAppearanceOutcome {
    if state.bases.contains(Bases::THIRD) {
        return play_at_home(state, rules, rng, steps);
    }

    if state.bases.contains(Bases::FIRST) && state.outs < 2 && rules.double_play_enabled {
        let roll = roll_chance(rng, DOUBLE_PLAY_CHANCE, STANDARD_RANGE);
        let detail = TraceDetail::DoublePlay {
            chance: DOUBLE_PLAY_CHANCE,
            outs: state.outs,
        };
        if roll.success() {
            steps.push(roll.step(Decision::DoublePlay, detail, Verdict::DoublePlay));
            state.outs += 2;
            state.bases.remove(Bases::FIRST);
            return PlateAppearanceOutcome::DoublePlay;
        }
        steps.push(roll.step(Decision::DoublePlay, detail, Verdict::NoDoublePlay));
        state.outs += 1;
        return if force_runner_from_first(state) {
            PlateAppearanceOutcome::FieldersChoice
        } else {
            PlateAppearanceOutcome::GroundOut
        };
    }

    state.outs += 1;
    force_runner_from_first(state);
    PlateAppearanceOutcome::GroundOut
}

fn play_at_home<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rules: &RuleConfig,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> PlateAppearanceOutcome {
    let context = state.score_context();
    let throw = throws_home(rules.throw_home_policy, state.outs, context);
    steps.push(TraceStep::fixed(
        Decision::ThrowHome,
        TraceDetail::ThrowHome {
            policy: rules.throw_home_policy,
            outs: state.outs,
            context,
        },
        if throw {
            Verdict::ThrowHome
        } else {
            Verdict::ThrowToFirst
        },
    ));

    state.bases.remove(Bases::THIRD);
    state.outs += 1;

    if throw {
        let roll = roll_chance(rng, PLAY_AT_HOME_OUT_CHANCE, STANDARD_RANGE);
        let detail = TraceDetail::PlayAtHome {
            out_chance: PLAY_AT_HOME_OUT_CHANCE,
        };
        if roll.success() {
            steps.push(roll.step(Decision::PlayAtHome, detail, Verdict::OutAtHome));
            return PlateAppearanceOutcome::FieldersChoice;
        }
        steps.push(roll.step(Decision::PlayAtHome, detail, Verdict::RunScores));
    }

    state.score_runs(1);
    PlateAppearanceOutcome::GroundOut
}

/// Moves the runner on first to an open second base. Returns whether a runner moved.
fn force_runner_from_first(state: &mut GameState) -> bool {
    if state.bases.contains(Bases::FIRST) && !state.bases.contains(Bases::SECOND) {
        state.bases.remove(Bases::FIRST);
        state.bases.insert(Bases::SECOND);
        true
    } else {
        false
    }
}
