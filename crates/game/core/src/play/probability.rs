//! Probability-to-decision conversion shared by every decision point.
//!
//! # Formula
//!
//! ```text
//! threshold = trunc(clamp(p, 0, 1) * range)
//! roll      = uniform integer in [1, range]
//! success   = roll <= threshold
//! ```
//!
//! Truncation (never rounding) makes `p = 0.5` over `10_000` a threshold of `5000`:
//! a roll of 5000 succeeds and 5001 fails.

use crate::env::RandomSource;
use crate::trace::{Decision, TraceDetail, TraceStep, Verdict};

/// Roll range used by most decisions.
pub const STANDARD_RANGE: u32 = 10_000;
/// Finer range for rare events (wild pitches, fielding errors).
pub const FINE_RANGE: u32 = 100_000;

/// Clamps `p` into `[0, 1]`; NaN becomes 0.
#[inline]
pub fn clamp_unit(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Integer success threshold for probability `p` over `range`.
#[inline]
pub fn threshold(p: f64, range: u32) -> u32 {
    (clamp_unit(p) * f64::from(range)) as u32
}

/// Draws a roll in `[1, range]`.
#[inline]
pub fn draw<R: RandomSource + ?Sized>(rng: &mut R, range: u32) -> u32 {
    rng.next_integer(u64::from(range)) as u32 + 1
}

/// A resolved binary decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roll {
    pub roll: u32,
    pub range: u32,
    pub threshold: u32,
}

impl Roll {
    pub const fn success(&self) -> bool {
        self.roll <= self.threshold
    }

    /// Trace step for this roll.
    pub fn step(&self, decision: Decision, detail: TraceDetail, verdict: Verdict) -> TraceStep {
        TraceStep {
            decision,
            detail,
            roll: Some(self.roll),
            roll_range: Some(self.range),
            threshold: Some(self.threshold),
            verdict,
        }
    }
}

/// Rolls once against probability `p`.
pub fn roll_chance<R: RandomSource + ?Sized>(rng: &mut R, p: f64, range: u32) -> Roll {
    let threshold = threshold(p, range);
    let roll = draw(rng, range);
    Roll {
        roll,
        range,
        threshold,
    }
}

/// Result of a categorical draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pick {
    pub index: usize,
    /// Roll with `threshold` set to the upper bound of the chosen bucket.
    pub roll: Roll,
}

/// Rolls once and picks the first bucket whose cumulative threshold covers the roll.
///
/// `shares` are probabilities whose cumulative sum is truncated per bucket. A roll
/// above every cumulative threshold lands in the last bucket.
pub fn roll_categorical<R: RandomSource + ?Sized>(
    rng: &mut R,
    shares: &[f64],
    range: u32,
) -> Pick {
    let roll = draw(rng, range);
    let mut cumulative = 0.0;
    for (index, share) in shares.iter().enumerate() {
        cumulative += clamp_unit(*share);
        let upper = threshold(cumulative, range);
        if roll <= upper {
            return Pick {
                index,
                roll: Roll {
                    roll,
                    range,
                    threshold: upper,
                },
            };
        }
    }
    Pick {
        index: shares.len().saturating_sub(1),
        roll: Roll {
            roll,
            range,
            threshold: range,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedRng;

    #[test]
    fn half_probability_threshold_is_exact() {
        assert_eq!(threshold(0.50, STANDARD_RANGE), 5000);
    }

    #[test]
    fn threshold_truncates_instead_of_rounding() {
        assert_eq!(threshold(0.12345, STANDARD_RANGE), 1234);
        assert_eq!(threshold(0.99999, STANDARD_RANGE), 9999);
    }

    #[test]
    fn threshold_clamps_out_of_range_probabilities() {
        assert_eq!(threshold(-0.3, STANDARD_RANGE), 0);
        assert_eq!(threshold(1.7, STANDARD_RANGE), STANDARD_RANGE);
        assert_eq!(threshold(f64::NAN, STANDARD_RANGE), 0);
    }

    #[test]
    fn roll_on_threshold_succeeds_and_one_above_fails() {
        let mut rng = ScriptedRng::new([5000, 5001]);
        assert!(roll_chance(&mut rng, 0.5, STANDARD_RANGE).success());
        assert!(!roll_chance(&mut rng, 0.5, STANDARD_RANGE).success());
    }

    #[test]
    fn categorical_picks_buckets_by_cumulative_share() {
        let shares = [0.25, 0.25, 0.5];
        let mut rng = ScriptedRng::new([1, 2500, 2501, 5001, 10_000]);
        let picks: Vec<usize> = (0..5)
            .map(|_| roll_categorical(&mut rng, &shares, STANDARD_RANGE).index)
            .collect();
        assert_eq!(picks, vec![0, 0, 1, 2, 2]);
    }

    #[test]
    fn categorical_all_zero_falls_through_to_last_bucket() {
        let mut rng = ScriptedRng::new([1]);
        let pick = roll_categorical(&mut rng, &[0.0, 0.0, 0.0], STANDARD_RANGE);
        assert_eq!(pick.index, 2);
        assert_eq!(pick.roll.threshold, STANDARD_RANGE);
    }
}
