//! Single-pitch state machine.
//!
//! ```text
//! zone -> swing decision
//!   out of zone, runners on -> wild pitch check -> WP | PB (pitch ends)
//!   take  -> ball | called strike
//!   swing -> whiff   -> swinging strike | strikeout
//!         -> contact -> foul | in play
//! ```
//!
//! Walks and called or foul strike threes are left to the plate-appearance driver,
//! which inspects the count after every non-ending pitch.

use crate::config::RuleConfig;
use crate::env::RandomSource;
use crate::state::{GameState, Player};
use crate::trace::{Decision, PitchEvent, PitchOutcome, TraceDetail, TraceStep, Verdict};

use super::bases::advance_all_runners;
use super::in_play::resolve_ball_in_play;
use super::probability::{FINE_RANGE, STANDARD_RANGE, clamp_unit, roll_chance};

/// Swing-rate bonus once the batter has two strikes.
const TWO_STRIKE_SWING_BOOST: f64 = 1.10;
/// Maximum contact reduction from a pitcher's whiff rating.
const WHIFF_CONTACT_PENALTY: f64 = 0.20;
/// Fielding average used when no fielders are supplied.
const NEUTRAL_FIELDING: f64 = 0.5;

/// Participants and rules of one pitch.
#[derive(Clone, Copy, Debug)]
pub struct PitchContext<'a> {
    pub batter: &'a Player,
    pub pitcher: &'a Player,
    /// Mean fielding rating of the defense.
    pub average_fielding: f64,
    pub rules: &'a RuleConfig,
}

impl<'a> PitchContext<'a> {
    pub fn new(
        batter: &'a Player,
        pitcher: &'a Player,
        defense: &[&Player],
        rules: &'a RuleConfig,
    ) -> Self {
        Self {
            batter,
            pitcher,
            average_fielding: average_fielding(defense),
            rules,
        }
    }
}

/// Mean fielding rating, or a neutral 0.5 for an empty defense.
pub fn average_fielding(defense: &[&Player]) -> f64 {
    if defense.is_empty() {
        return NEUTRAL_FIELDING;
    }
    let total: f64 = defense
        .iter()
        .map(|player| player.ratings.defense.fielding)
        .sum();
    total / defense.len() as f64
}

/// Simulates one pitch against `state`, mutating the count, bases, outs and score.
///
/// The returned event carries sequence number 1; plate-appearance drivers
/// renumber pitches as they collect them.
pub fn simulate_single_pitch<R: RandomSource + ?Sized>(
    state: &mut GameState,
    batter: &Player,
    pitcher: &Player,
    defense: &[&Player],
    rules: &RuleConfig,
    rng: &mut R,
) -> PitchEvent {
    let context = PitchContext::new(batter, pitcher, defense, rules);
    resolve_pitch(state, &context, rng, 1)
}

/// Runs the pitch state machine once.
pub fn resolve_pitch<R: RandomSource + ?Sized>(
    state: &mut GameState,
    context: &PitchContext<'_>,
    rng: &mut R,
    sequence: u16,
) -> PitchEvent {
    let mut steps = Vec::new();
    let (outcome, ends_plate_appearance) = run(state, context, rng, &mut steps);
    PitchEvent {
        sequence,
        outcome,
        ends_plate_appearance,
        steps,
    }
}

fn run<R: RandomSource + ?Sized>(
    state: &mut GameState,
    context: &PitchContext<'_>,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> (PitchOutcome, bool) {
    let rules = context.rules;
    let batting = &context.batter.ratings.batting;
    let pitching = &context.pitcher.ratings.pitching;

    let zone_rate = pitching.zone_rate;
    let zone = roll_chance(rng, zone_rate, STANDARD_RANGE);
    let in_zone = zone.success();
    steps.push(zone.step(
        Decision::Zone,
        TraceDetail::Zone { zone_rate },
        if in_zone {
            Verdict::InZone
        } else {
            Verdict::OutOfZone
        },
    ));

    let base_rate = if in_zone {
        batting.zone_swing
    } else {
        batting.chase_swing
    };
    let two_strike_boost = state.strikes >= 2;
    let rate = if two_strike_boost {
        clamp_unit(base_rate * TWO_STRIKE_SWING_BOOST)
    } else {
        clamp_unit(base_rate)
    };
    let swing = roll_chance(rng, rate, STANDARD_RANGE);
    let swung = swing.success();
    steps.push(swing.step(
        Decision::Swing,
        TraceDetail::Swing {
            in_zone,
            base_rate,
            two_strike_boost,
            rate,
        },
        if swung { Verdict::Swing } else { Verdict::Take },
    ));

    if !in_zone && !state.bases.is_empty() {
        let chance = clamp_unit(if swung {
            rules.wild_pitch_chance_on_swing
        } else {
            rules.wild_pitch_chance_on_take
        });
        let wild = roll_chance(rng, chance, FINE_RANGE);
        let detail = TraceDetail::WildPitch {
            swung,
            chance,
            bases: state.bases.mask(),
        };
        if wild.success() {
            steps.push(wild.step(Decision::WildPitch, detail, Verdict::WildPitch));

            let passed_ball_share = clamp_unit(rules.passed_ball_share);
            let kind = roll_chance(rng, passed_ball_share, STANDARD_RANGE);
            let (outcome, verdict) = if kind.success() {
                (PitchOutcome::PassedBall, Verdict::PassedBall)
            } else {
                (PitchOutcome::WildPitch, Verdict::WildPitch)
            };
            steps.push(kind.step(
                Decision::WildPitchKind,
                TraceDetail::WildPitchKind { passed_ball_share },
                verdict,
            ));
            advance_all_runners(state);
            return (outcome, false);
        }
        steps.push(wild.step(Decision::WildPitch, detail, Verdict::NoWildPitch));
    }

    if !swung {
        return if in_zone {
            state.strikes += 1;
            (PitchOutcome::CalledStrike, false)
        } else {
            state.balls += 1;
            (PitchOutcome::Ball, false)
        };
    }

    let base_contact = if in_zone {
        batting.zone_contact
    } else {
        batting.chase_contact
    };
    let whiff_induce = pitching.whiff_induce;
    let rate = clamp_unit(base_contact * (1.0 - WHIFF_CONTACT_PENALTY * whiff_induce));
    let contact = roll_chance(rng, rate, STANDARD_RANGE);
    steps.push(contact.step(
        Decision::Contact,
        TraceDetail::Contact {
            in_zone,
            base_contact,
            whiff_induce,
            rate,
        },
        if contact.success() {
            Verdict::Contact
        } else {
            Verdict::Whiff
        },
    ));

    if !contact.success() {
        state.strikes += 1;
        if state.strikes >= RuleConfig::STRIKES_FOR_STRIKEOUT {
            state.outs += 1;
            return (PitchOutcome::StrikeoutSwinging, true);
        }
        return (PitchOutcome::SwingingStrike, false);
    }

    let foul_rate = clamp_unit(rules.foul_rate_on_contact);
    let foul = roll_chance(rng, foul_rate, STANDARD_RANGE);
    steps.push(foul.step(
        Decision::Foul,
        TraceDetail::Foul {
            foul_rate,
            strikes: state.strikes,
        },
        if foul.success() {
            Verdict::Foul
        } else {
            Verdict::InPlay
        },
    ));

    if foul.success() {
        let held = state.strikes == 2 && rules.two_strike_foul_keeps_two_strikes;
        if !held {
            state.strikes += 1;
        }
        return (PitchOutcome::Foul, false);
    }

    let outcome = resolve_ball_in_play(
        state,
        context.batter,
        context.average_fielding,
        rules,
        rng,
        steps,
    );
    (PitchOutcome::InPlay(outcome), true)
}
