//! Base occupancy mutation and run scoring.
//!
//! Every function credits scored runs to the batting team through
//! [`GameState::score_runs`] and returns the number of runs for the caller's trace.

use crate::env::RandomSource;
use crate::state::{Bases, GameState};
use crate::trace::{Decision, TraceDetail, TraceStep, Verdict};

use super::probability::{STANDARD_RANGE, clamp_unit, roll_chance};

/// Hit value once a ball in play falls safely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Single,
    Double,
    Triple,
    HomeRun,
}

/// Batter to first; runners move only when forced.
pub fn force_walk(state: &mut GameState) -> u16 {
    let bases = state.bases;
    let runs = if !bases.contains(Bases::FIRST) {
        state.bases |= Bases::FIRST;
        0
    } else if !bases.contains(Bases::SECOND) {
        state.bases |= Bases::SECOND;
        0
    } else if !bases.contains(Bases::THIRD) {
        state.bases |= Bases::THIRD;
        0
    } else {
        1
    };
    state.score_runs(runs);
    runs
}

/// Every runner moves up one base; the runner on third scores.
pub fn advance_all_runners(state: &mut GameState) -> u16 {
    let runs = u16::from(state.bases.contains(Bases::THIRD));
    state.bases = Bases::from_mask(state.bases.mask() << 1);
    state.score_runs(runs);
    runs
}

/// Batter safe at first on an error; existing runners move up one base.
pub fn reach_on_error(state: &mut GameState) -> u16 {
    let runs = advance_all_runners(state);
    state.bases |= Bases::FIRST;
    runs
}

/// Applies a hit, rolling for extra-base advancement where the rules allow it.
pub fn apply_hit<R: RandomSource + ?Sized>(
    state: &mut GameState,
    hit: HitKind,
    aggressiveness: f64,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> u16 {
    let bases = state.bases;
    let runs = match hit {
        HitKind::Single => {
            let mut runs = u16::from(bases.contains(Bases::THIRD));
            let mut next = Bases::FIRST;
            if bases.contains(Bases::SECOND) {
                let send = RunnerSend::new(2, 0.20 + 0.70 * aggressiveness)
                    .labels(Verdict::Scores, Verdict::ToThird);
                if send.roll(rng, steps, aggressiveness) {
                    runs += 1;
                } else {
                    next |= Bases::THIRD;
                }
            }
            if bases.contains(Bases::FIRST) {
                let send = RunnerSend::new(1, 0.05 + 0.35 * aggressiveness)
                    .labels(Verdict::ToThird, Verdict::ToSecond);
                // The runner from first only tries for third when it is open.
                if !next.contains(Bases::THIRD) && send.roll(rng, steps, aggressiveness) {
                    next |= Bases::THIRD;
                } else {
                    next |= Bases::SECOND;
                }
            }
            state.bases = next;
            runs
        }
        HitKind::Double => {
            let mut runs = u16::from(bases.contains(Bases::THIRD))
                + u16::from(bases.contains(Bases::SECOND));
            let mut next = Bases::SECOND;
            if bases.contains(Bases::FIRST) {
                let send = RunnerSend::new(1, 0.15 + 0.60 * aggressiveness)
                    .labels(Verdict::Scores, Verdict::ToThird);
                if send.roll(rng, steps, aggressiveness) {
                    runs += 1;
                } else {
                    next |= Bases::THIRD;
                }
            }
            state.bases = next;
            runs
        }
        HitKind::Triple => {
            state.bases = Bases::THIRD;
            bases.runner_count() as u16
        }
        HitKind::HomeRun => {
            state.bases = Bases::empty();
            bases.runner_count() as u16 + 1
        }
    };
    state.score_runs(runs);
    runs
}

/// One extra-base attempt: the starting base, the success chance, and the labels
/// recorded for each result.
struct RunnerSend {
    from_base: u8,
    chance: f64,
    on_success: Verdict,
    on_failure: Verdict,
}

impl RunnerSend {
    fn new(from_base: u8, chance: f64) -> Self {
        Self {
            from_base,
            chance: clamp_unit(chance),
            on_success: Verdict::Scores,
            on_failure: Verdict::ToThird,
        }
    }

    fn labels(mut self, on_success: Verdict, on_failure: Verdict) -> Self {
        self.on_success = on_success;
        self.on_failure = on_failure;
        self
    }

    /// Rolls the attempt and records the decision.
    fn roll<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        steps: &mut Vec<TraceStep>,
        aggressiveness: f64,
    ) -> bool {
        let roll = roll_chance(rng, self.chance, STANDARD_RANGE);
        let verdict = if roll.success() {
            self.on_success
        } else {
            self.on_failure
        };
        steps.push(roll.step(
            Decision::RunnerAdvance,
            TraceDetail::RunnerAdvance {
                from_base: self.from_base,
                aggressiveness,
                chance: self.chance,
            },
            verdict,
        ));
        roll.success()
    }
}
