//! Text rendering of finished games.
use std::fmt;

use ballpark_core::{Half, PlateAppearanceLog, TraceDetail};

/// Runs per inning, total runs, and hits for both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineScore {
    pub away: String,
    pub home: String,
    pub away_innings: Vec<u16>,
    /// `None` for a bottom half that was never played.
    pub home_innings: Vec<Option<u16>>,
    pub away_runs: u16,
    pub home_runs: u16,
    pub away_hits: u16,
    pub home_hits: u16,
}

impl LineScore {
    /// Rebuilds the line score from a game's plate-appearance log.
    ///
    /// Runs are read from the score snapshot that closes every plate appearance.
    /// Returns `None` for an empty log.
    pub fn from_log(entries: &[PlateAppearanceLog]) -> Option<Self> {
        let first = entries.first()?;
        let (away, home) = match first.half {
            Half::Top => (first.offense.clone(), first.defense.clone()),
            Half::Bottom => (first.defense.clone(), first.offense.clone()),
        };
        let innings = entries.iter().map(|entry| entry.inning).max().unwrap_or(1);

        let mut line = Self {
            away,
            home,
            away_innings: vec![0; usize::from(innings)],
            home_innings: vec![None; usize::from(innings)],
            away_runs: 0,
            home_runs: 0,
            away_hits: 0,
            home_hits: 0,
        };

        let mut score = (0u16, 0u16);
        for entry in entries {
            let slot = usize::from(entry.inning.saturating_sub(1));
            let after = score_after(entry).unwrap_or(score);
            let hit = u16::from(entry.outcome.is_hit());
            match entry.half {
                Half::Top => {
                    line.away_innings[slot] += after.0.saturating_sub(score.0);
                    line.away_hits += hit;
                }
                Half::Bottom => {
                    let runs = line.home_innings[slot].get_or_insert(0);
                    *runs += after.1.saturating_sub(score.1);
                    line.home_hits += hit;
                }
            }
            score = after;
        }
        (line.away_runs, line.home_runs) = score;

        Some(line)
    }
}

impl fmt::Display for LineScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.away.len().max(self.home.len());

        write!(f, "{:width$}", "")?;
        for inning in 1..=self.away_innings.len() {
            write!(f, " {inning:>2}")?;
        }
        writeln!(f, " | {:>2} {:>2}", "R", "H")?;

        write!(f, "{:width$}", self.away)?;
        for runs in &self.away_innings {
            write!(f, " {runs:>2}")?;
        }
        writeln!(f, " | {:>2} {:>2}", self.away_runs, self.away_hits)?;

        write!(f, "{:width$}", self.home)?;
        for runs in &self.home_innings {
            match runs {
                Some(runs) => write!(f, " {runs:>2}")?,
                None => write!(f, " {:>2}", "X")?,
            }
        }
        write!(f, " | {:>2} {:>2}", self.home_runs, self.home_hits)
    }
}

/// One-line play-by-play description, e.g. `T3 Ada Rowe vs Cal Finch: HR (4 pitches)`.
pub fn describe(entry: &PlateAppearanceLog) -> String {
    let half = match entry.half {
        Half::Top => 'T',
        Half::Bottom => 'B',
    };
    format!(
        "{half}{} {} vs {}: {} ({} pitches)",
        entry.inning, entry.batter, entry.pitcher, entry.outcome, entry.pitch_count
    )
}

fn score_after(entry: &PlateAppearanceLog) -> Option<(u16, u16)> {
    let step = entry.pitches.last()?.steps.last()?;
    match step.detail {
        TraceDetail::Score { away, home, .. } => Some((away, home)),
        _ => None,
    }
}
