//! Resolution of a ball put in play.

use crate::config::{InfieldAlignment, RuleConfig};
use crate::env::RandomSource;
use crate::state::{GameState, Player};
use crate::trace::{Decision, PlateAppearanceOutcome, TraceDetail, TraceStep, Verdict};

use super::bases::{HitKind, apply_hit, reach_on_error};
use super::ground_out::resolve_ground_out;
use super::probability::{
    FINE_RANGE, STANDARD_RANGE, clamp_unit, roll_categorical, roll_chance,
};

/// Floor for the batted-ball share total before normalizing.
const PROFILE_EPSILON: f64 = 1e-9;

const HOME_RUN_SHARE_CAP: f64 = 0.45;
const DOUBLE_SHARE_CAP: f64 = 0.40;
const TRIPLE_SHARE_CAP: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattedBallType {
    #[strum(serialize = "GB")]
    GroundBall,
    #[strum(serialize = "FB")]
    FlyBall,
    #[strum(serialize = "LD")]
    LineDrive,
    #[strum(serialize = "PU")]
    PopUp,
}

impl BattedBallType {
    const ORDER: [Self; 4] = [Self::GroundBall, Self::FlyBall, Self::LineDrive, Self::PopUp];

    fn verdict(self) -> Verdict {
        match self {
            Self::GroundBall => Verdict::GroundBall,
            Self::FlyBall => Verdict::FlyBall,
            Self::LineDrive => Verdict::LineDrive,
            Self::PopUp => Verdict::PopUp,
        }
    }

    /// Fly balls and line drives can go for extra bases.
    pub const fn is_air_ball(self) -> bool {
        matches!(self, Self::FlyBall | Self::LineDrive)
    }
}

/// Multiplier on the batter's hit rate from the fielders' skill.
pub fn defense_factor(average_fielding: f64) -> f64 {
    (0.85 + 0.30 * (1.0 - average_fielding)).clamp(0.70, 1.10)
}

/// Chance a ball not fielded for a hit is booted.
pub fn error_chance(average_fielding: f64) -> f64 {
    clamp_unit(0.02 + 0.06 * (1.0 - average_fielding))
}

/// Resolves the ball in play and returns the plate-appearance outcome.
///
/// `average_fielding` is the mean fielding rating of the defense.
pub fn resolve_ball_in_play<R: RandomSource + ?Sized>(
    state: &mut GameState,
    batter: &Player,
    average_fielding: f64,
    rules: &RuleConfig,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> PlateAppearanceOutcome {
    let batted = draw_batted_ball(batter, rng, steps);

    let quality = &batter.ratings.hit_quality;
    let alignment = rules.infield_alignment;
    let alignment_multiplier = match (batted, alignment) {
        (BattedBallType::GroundBall, InfieldAlignment::Shift) => {
            rules.shift_gb_hit_multiplier.clamp(0.50, 1.20)
        }
        (BattedBallType::GroundBall, InfieldAlignment::InfieldIn) => {
            rules.infield_in_gb_hit_multiplier.clamp(0.80, 1.60)
        }
        _ => 1.0,
    };
    let defense = defense_factor(average_fielding);
    let chance = clamp_unit(quality.hit_rate * alignment_multiplier * defense);
    let hit = roll_chance(rng, chance, STANDARD_RANGE);
    steps.push(hit.step(
        Decision::Hit,
        TraceDetail::Hit {
            hit_rate: quality.hit_rate,
            alignment,
            alignment_multiplier,
            defense_factor: defense,
            chance,
        },
        if hit.success() {
            Verdict::Hit
        } else {
            Verdict::NoHit
        },
    ));

    if hit.success() {
        let kind = if batted.is_air_ball() {
            draw_hit_kind(batter, rng, steps)
        } else {
            HitKind::Single
        };
        apply_hit(state, kind, rules.runner_aggressiveness, rng, steps);
        return match kind {
            HitKind::Single => PlateAppearanceOutcome::Single,
            HitKind::Double => PlateAppearanceOutcome::Double,
            HitKind::Triple => PlateAppearanceOutcome::Triple,
            HitKind::HomeRun => PlateAppearanceOutcome::HomeRun,
        };
    }

    let chance = error_chance(average_fielding);
    let error = roll_chance(rng, chance, FINE_RANGE);
    steps.push(error.step(
        Decision::FieldingError,
        TraceDetail::FieldingError {
            average_fielding,
            chance,
        },
        if error.success() {
            Verdict::Error
        } else {
            Verdict::NoError
        },
    ));
    if error.success() {
        reach_on_error(state);
        return PlateAppearanceOutcome::ReachedOnError;
    }

    match batted {
        BattedBallType::GroundBall => resolve_ground_out(state, rules, rng, steps),
        BattedBallType::FlyBall | BattedBallType::PopUp => {
            state.outs += 1;
            PlateAppearanceOutcome::FlyOut
        }
        BattedBallType::LineDrive => {
            state.outs += 1;
            PlateAppearanceOutcome::LineOut
        }
    }
}

fn draw_batted_ball<R: RandomSource + ?Sized>(
    batter: &Player,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> BattedBallType {
    let profile = &batter.ratings.batted_ball;
    let raw = [
        profile.ground_ball,
        profile.fly_ball,
        profile.line_drive,
        profile.pop_up,
    ]
    .map(|share| if share.is_finite() { share.max(0.0) } else { 0.0 });
    let total = raw.iter().sum::<f64>().max(PROFILE_EPSILON);
    let shares = raw.map(|share| share / total);

    let pick = roll_categorical(rng, &shares, STANDARD_RANGE);
    let batted = BattedBallType::ORDER[pick.index];
    steps.push(pick.roll.step(
        Decision::BattedBall,
        TraceDetail::BattedBall {
            ground_ball: shares[0],
            fly_ball: shares[1],
            line_drive: shares[2],
            pop_up: shares[3],
        },
        batted.verdict(),
    ));
    batted
}

fn draw_hit_kind<R: RandomSource + ?Sized>(
    batter: &Player,
    rng: &mut R,
    steps: &mut Vec<TraceStep>,
) -> HitKind {
    let quality = &batter.ratings.hit_quality;
    let home_run = clamp_unit(quality.home_run_share).min(HOME_RUN_SHARE_CAP);
    let double = clamp_unit(quality.double_share).min(DOUBLE_SHARE_CAP);
    let triple = clamp_unit(quality.triple_share).min(TRIPLE_SHARE_CAP);
    let single = (1.0 - home_run - double - triple).max(0.0);

    let pick = roll_categorical(rng, &[home_run, double, triple, single], STANDARD_RANGE);
    let (kind, verdict) = match pick.index {
        0 => (HitKind::HomeRun, Verdict::HomeRun),
        1 => (HitKind::Double, Verdict::Double),
        2 => (HitKind::Triple, Verdict::Triple),
        _ => (HitKind::Single, Verdict::Single),
    };
    steps.push(pick.roll.step(
        Decision::HitType,
        TraceDetail::HitType {
            home_run,
            double,
            triple,
        },
        verdict,
    ));
    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Bases, BattedBallProfile, PlayerId, PlayerRatings};
    use crate::test_utils::ScriptedRng;

    fn batter_with(profile: BattedBallProfile) -> Player {
        let mut ratings = PlayerRatings::default();
        ratings.batted_ball = profile;
        Player::new(PlayerId(1), "Batter", ratings)
    }

    fn only(ground_ball: f64, fly_ball: f64, line_drive: f64, pop_up: f64) -> BattedBallProfile {
        BattedBallProfile {
            ground_ball,
            fly_ball,
            line_drive,
            pop_up,
        }
    }

    #[test]
    fn defense_factor_is_bounded() {
        assert!((defense_factor(0.5) - 1.0).abs() < 1e-12);
        assert!((defense_factor(1.0) - 0.85).abs() < 1e-12);
        assert!((defense_factor(-2.0) - 1.10).abs() < 1e-12);
        assert!((defense_factor(3.0) - 0.70).abs() < 1e-12);
    }

    #[test]
    fn all_zero_profile_is_a_pop_up() {
        let batter = batter_with(only(0.0, 0.0, 0.0, 0.0));
        let mut steps = Vec::new();
        let batted = draw_batted_ball(&batter, &mut ScriptedRng::new([1]), &mut steps);
        assert_eq!(batted, BattedBallType::PopUp);
        assert_eq!(steps[0].verdict, Verdict::PopUp);
    }

    #[test]
    fn unnormalized_profile_is_scaled() {
        // 2:2 GB/FB normalizes to halves; 5001 lands in the fly-ball bucket.
        let batter = batter_with(only(2.0, 2.0, 0.0, 0.0));
        let mut steps = Vec::new();
        let batted = draw_batted_ball(&batter, &mut ScriptedRng::new([5001]), &mut steps);
        assert_eq!(batted, BattedBallType::FlyBall);
    }

    #[test]
    fn ground_ball_hit_is_always_a_single() {
        let rules = RuleConfig::default();
        let batter = batter_with(only(1.0, 0.0, 0.0, 0.0));
        let mut state = GameState::new();
        let mut steps = Vec::new();
        let mut rng = ScriptedRng::new([1, 1]);

        let outcome = resolve_ball_in_play(&mut state, &batter, 0.5, &rules, &mut rng, &mut steps);

        assert_eq!(outcome, PlateAppearanceOutcome::Single);
        assert_eq!(state.bases, Bases::FIRST);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].verdict, Verdict::Hit);
    }

    #[test]
    fn shift_reduces_ground_ball_hit_threshold() {
        let rules = RuleConfig {
            infield_alignment: InfieldAlignment::Shift,
            shift_gb_hit_multiplier: 0.5,
            ..RuleConfig::default()
        };
        let batter = batter_with(only(1.0, 0.0, 0.0, 0.0));
        let mut state = GameState::new();
        let mut steps = Vec::new();
        // hit chance 0.30 * 0.5 = 0.15; 2000 misses, error roll misses, plain ground out
        let mut rng = ScriptedRng::new([1, 2000, 100_000]);

        let outcome = resolve_ball_in_play(&mut state, &batter, 0.5, &rules, &mut rng, &mut steps);

        let threshold = steps[1].threshold.unwrap_or_default();
        assert!((1499..=1500).contains(&threshold));
        assert_eq!(steps[2].roll_range, Some(FINE_RANGE));
        assert_eq!(outcome, PlateAppearanceOutcome::GroundOut);
        assert_eq!(state.outs, 1);
    }

    #[test]
    fn fly_ball_hit_draws_hit_type() {
        let rules = RuleConfig::default();
        let batter = batter_with(only(0.0, 1.0, 0.0, 0.0));
        let mut state = GameState {
            bases: Bases::LOADED,
            ..GameState::new()
        };
        let mut steps = Vec::new();
        // batted ball FB, hit, hit type roll 1 -> home run bucket (0.12)
        let mut rng = ScriptedRng::new([1, 1, 1]);

        let outcome = resolve_ball_in_play(&mut state, &batter, 0.5, &rules, &mut rng, &mut steps);

        assert_eq!(outcome, PlateAppearanceOutcome::HomeRun);
        assert_eq!(state.away_score, 4);
        assert_eq!(state.bases, Bases::empty());
        assert_eq!(steps[2].decision, Decision::HitType);
    }

    #[test]
    fn error_puts_batter_on_without_an_out() {
        let rules = RuleConfig::default();
        let batter = batter_with(only(0.0, 0.0, 1.0, 0.0));
        let mut state = GameState::new();
        let mut steps = Vec::new();
        // average fielding 0.5 -> error chance 0.05 of 100_000
        let mut rng = ScriptedRng::new([1, 10_000, 4000]);

        let outcome = resolve_ball_in_play(&mut state, &batter, 0.5, &rules, &mut rng, &mut steps);

        assert_eq!(outcome, PlateAppearanceOutcome::ReachedOnError);
        assert_eq!(state.outs, 0);
        assert_eq!(state.bases, Bases::FIRST);
    }

    #[test]
    fn caught_line_drive_is_one_out() {
        let rules = RuleConfig::default();
        let batter = batter_with(only(0.0, 0.0, 1.0, 0.0));
        let mut state = GameState::new();
        let mut steps = Vec::new();
        let mut rng = ScriptedRng::new([1, 10_000, 100_000]);

        let outcome = resolve_ball_in_play(&mut state, &batter, 0.5, &rules, &mut rng, &mut steps);

        assert_eq!(outcome, PlateAppearanceOutcome::LineOut);
        assert_eq!(state.outs, 1);
    }
}
