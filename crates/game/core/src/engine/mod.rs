//! Plate-appearance, half-inning and full-game drivers.
//!
//! The [`GameEngine`] is the authoritative reducer for a [`Game`]. Every call
//! validates its preconditions, derives a working seed from the persisted one,
//! runs one pitch or pitches until the plate appearance resolves, applies the
//! inning/game lifecycle, and stores the generator's last output as the next seed.

mod errors;
mod lifecycle;

pub use errors::SimulationError;

use crate::config::RuleConfig;
use crate::env::{
    LineupError, RandomSource, ResolvedLineup, SimEnv, SplitMix64, derive_seed, resolve_lineup,
    state_key,
};
use crate::play::{PitchContext, resolve_pitch};
use crate::state::{Game, GameState, GameStatus};
use crate::trace::{
    Decision, PitchResult, PlateAppearanceLog, PlateAppearanceOutcome, PlateAppearanceResult,
    PlateAppearanceSink, TraceDetail, TraceStep, Verdict,
};

/// Both sides of a game resolved against the roster oracle.
struct Matchup<'a> {
    offense: ResolvedLineup<'a>,
    defense: ResolvedLineup<'a>,
    rules: &'a RuleConfig,
}

/// Game engine driving one game forward.
///
/// Rosters and rules are borrowed through [`SimEnv`] on every call and never
/// stored in the game itself.
pub struct GameEngine<'a> {
    game: &'a mut Game,
}

impl<'a> GameEngine<'a> {
    pub fn new(game: &'a mut Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    /// Simulates one pitch to the current batter.
    ///
    /// The working seed always mixes the stored seed with [`state_key`], whatever
    /// the env's seed policy, so a pitch replays from `(seed, state)`. A pitch that
    /// ends the plate appearance runs the same lifecycle as
    /// [`Self::simulate_plate_appearance`] but emits no log entry.
    pub fn simulate_pitch(&mut self, env: SimEnv<'_>) -> Result<PitchResult, SimulationError> {
        let matchup = self.matchup(&env)?;
        let game = &mut *self.game;

        let mut rng = SplitMix64::new(derive_seed(game.seed, state_key(&game.state)));
        let context = PitchContext {
            batter: matchup.offense.batter(game.state.batting_index()),
            pitcher: matchup.defense.pitcher,
            average_fielding: matchup.defense.average_fielding(),
            rules: matchup.rules,
        };

        let mut event = resolve_pitch(&mut game.state, &context, &mut rng, 1);
        let plate_appearance = match event.outcome.plate_appearance_outcome() {
            Some(outcome) => Some(outcome),
            None => lifecycle::count_outcome(&mut game.state),
        };
        if plate_appearance.is_some() {
            lifecycle::complete_plate_appearance(game, matchup.rules.innings_per_game);
            event.ends_plate_appearance = true;
            event.steps.push(score_snapshot(&game.state));
        }
        game.seed = rng.next_seed();

        Ok(PitchResult {
            event,
            plate_appearance,
        })
    }

    /// Simulates pitches until the current batter's plate appearance resolves.
    ///
    /// Emits one [`PlateAppearanceLog`] to `sink` and returns the outcome with
    /// every pitch. Fails without mutating the game when it is already finished,
    /// no rule set is supplied, or either lineup does not resolve.
    pub fn simulate_plate_appearance<S>(
        &mut self,
        env: SimEnv<'_>,
        sink: &mut S,
    ) -> Result<PlateAppearanceResult, SimulationError>
    where
        S: PlateAppearanceSink + ?Sized,
    {
        let matchup = self.matchup(&env)?;
        let game = &mut *self.game;

        let seed = derive_seed(game.seed, env.seed_policy().key(&game.state));
        let mut rng = SplitMix64::new(seed);

        let inning = game.state.inning;
        let half = game.state.half;
        let batter = matchup.offense.batter(game.state.batting_index());
        let pitcher = matchup.defense.pitcher;
        let context = PitchContext {
            batter,
            pitcher,
            average_fielding: matchup.defense.average_fielding(),
            rules: matchup.rules,
        };

        let mut result = run_plate_appearance(&mut game.state, &context, &mut rng);
        lifecycle::complete_plate_appearance(game, matchup.rules.innings_per_game);

        if let Some(last) = result.pitches.last_mut() {
            last.ends_plate_appearance = true;
            last.steps.push(score_snapshot(&game.state));
        }
        game.seed = rng.next_seed();

        sink.record(PlateAppearanceLog {
            game_id: game.id,
            inning,
            half,
            offense: matchup.offense.team.name.clone(),
            defense: matchup.defense.team.name.clone(),
            batter: batter.name.clone(),
            pitcher: pitcher.name.clone(),
            outcome: result.outcome,
            pitch_count: result.pitch_count(),
            pitches: result.pitches.clone(),
        });

        Ok(result)
    }

    /// Simulates plate appearances until the half inning changes or the game ends.
    pub fn simulate_half_inning<S>(
        &mut self,
        env: SimEnv<'_>,
        sink: &mut S,
    ) -> Result<(), SimulationError>
    where
        S: PlateAppearanceSink + ?Sized,
    {
        let inning = self.game.state.inning;
        let half = self.game.state.half;
        loop {
            self.simulate_plate_appearance(env, sink)?;
            let state = &self.game.state;
            if self.game.is_finished() || state.inning != inning || state.half != half {
                return Ok(());
            }
        }
    }

    /// Simulates half innings until the game is finished.
    pub fn simulate_game<S>(&mut self, env: SimEnv<'_>, sink: &mut S) -> Result<(), SimulationError>
    where
        S: PlateAppearanceSink + ?Sized,
    {
        loop {
            self.simulate_half_inning(env, sink)?;
            if self.game.is_finished() {
                return Ok(());
            }
        }
    }

    /// Restarts the game from the first pitch with a new seed.
    pub fn reset_game(&mut self, seed: u64) {
        self.game.seed = seed;
        self.game.status = GameStatus::InProgress;
        self.game.state = GameState::new();
    }

    fn matchup<'e>(&self, env: &SimEnv<'e>) -> Result<Matchup<'e>, SimulationError> {
        let game = &*self.game;
        if game.is_finished() {
            return Err(SimulationError::GameAlreadyFinished { game: game.id });
        }
        let rules = env.rules().ok_or(SimulationError::MissingRuleSet)?;
        let rosters = env.rosters().ok_or_else(|| {
            SimulationError::lineup(game.offense(), LineupError::RostersNotAvailable)
        })?;

        let offense = resolve_lineup(rosters, game.offense())
            .map_err(|reason| SimulationError::lineup(game.offense(), reason))?;
        let defense = resolve_lineup(rosters, game.defense())
            .map_err(|reason| SimulationError::lineup(game.defense(), reason))?;

        Ok(Matchup {
            offense,
            defense,
            rules,
        })
    }
}

/// Pitch loop of one plate appearance, capped at
/// [`RuleConfig::MAX_PITCHES_PER_PLATE_APPEARANCE`].
fn run_plate_appearance<R: RandomSource + ?Sized>(
    state: &mut GameState,
    context: &PitchContext<'_>,
    rng: &mut R,
) -> PlateAppearanceResult {
    let mut pitches = Vec::new();
    for index in 0..RuleConfig::MAX_PITCHES_PER_PLATE_APPEARANCE {
        let event = resolve_pitch(state, context, rng, index as u16 + 1);
        let resolved = match event.outcome.plate_appearance_outcome() {
            Some(outcome) => Some(outcome),
            None => lifecycle::count_outcome(state),
        };
        pitches.push(event);
        if let Some(outcome) = resolved {
            return PlateAppearanceResult { outcome, pitches };
        }
    }
    PlateAppearanceResult {
        outcome: PlateAppearanceOutcome::Unknown,
        pitches,
    }
}

fn score_snapshot(state: &GameState) -> TraceStep {
    TraceStep::fixed(
        Decision::ScoreSnapshot,
        TraceDetail::Score {
            inning: state.inning,
            half: state.half,
            outs: state.outs,
            bases: state.bases.mask(),
            away: state.away_score,
            home: state.home_score,
        },
        Verdict::Final,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{RosterOracle, SeedPolicy};
    use crate::state::{Bases, GameId, Half, League, PlayerRatings, TeamId};
    use crate::test_utils::{AWAY, HOME, league, league_with};
    use crate::trace::PitchOutcome;

    fn new_game(seed: u64) -> Game {
        Game::new(GameId(7), AWAY, HOME, seed)
    }

    /// Every pitch is out of the zone and taken.
    fn walk_ratings() -> PlayerRatings {
        let mut ratings = PlayerRatings::default();
        ratings.pitching.zone_rate = 0.0;
        ratings.batting.chase_swing = 0.0;
        ratings
    }

    /// Every pitch is in the zone and taken.
    fn looking_ratings() -> PlayerRatings {
        let mut ratings = PlayerRatings::default();
        ratings.pitching.zone_rate = 1.0;
        ratings.batting.zone_swing = 0.0;
        ratings
    }

    fn run_pa(game: &mut Game, league: &League, rules: &RuleConfig) -> PlateAppearanceResult {
        let mut log: Vec<PlateAppearanceLog> = Vec::new();
        GameEngine::new(game)
            .simulate_plate_appearance(SimEnv::with_all(league, rules), &mut log)
            .expect("plate appearance")
    }

    #[test]
    fn four_balls_is_a_walk() {
        let league = league_with(walk_ratings());
        let rules = RuleConfig::default();
        let mut game = new_game(1);

        let result = run_pa(&mut game, &league, &rules);

        assert_eq!(result.outcome, PlateAppearanceOutcome::Walk);
        assert_eq!(result.outcome.code(), "BB");
        assert_eq!(result.pitch_count(), 4);
        assert_eq!(game.state.bases, Bases::FIRST);
        assert_eq!(game.state.balls, 0);
        assert_eq!(game.state.away_lineup_index, 1);
    }

    #[test]
    fn called_third_strike_records_one_out() {
        let league = league_with(looking_ratings());
        let rules = RuleConfig::default();
        let mut game = new_game(1);

        let result = run_pa(&mut game, &league, &rules);

        assert_eq!(result.outcome, PlateAppearanceOutcome::Strikeout);
        assert_eq!(result.pitch_count(), 3);
        assert_eq!(game.state.outs, 1);
        assert_eq!(game.state.strikes, 0);
    }

    #[test]
    fn third_out_flips_half_and_clears_bases() {
        let league = league_with(looking_ratings());
        let rules = RuleConfig::default();
        let mut game = new_game(1);
        game.state.outs = 2;
        game.state.bases = Bases::FIRST | Bases::THIRD;

        run_pa(&mut game, &league, &rules);

        assert_eq!(game.state.half, Half::Bottom);
        assert_eq!(game.state.inning, 1);
        assert_eq!(game.state.outs, 0);
        assert_eq!(game.state.bases, Bases::empty());
        assert!(game.state.is_well_formed());
    }

    #[test]
    fn home_team_walk_off_ends_game_with_outs_remaining() {
        let league = league_with(walk_ratings());
        let rules = RuleConfig {
            wild_pitch_chance_on_take: 0.0,
            ..RuleConfig::default()
        };
        let mut game = new_game(1);
        game.state.inning = 9;
        game.state.half = Half::Bottom;
        game.state.outs = 1;
        game.state.bases = Bases::LOADED;

        let mut log: Vec<PlateAppearanceLog> = Vec::new();
        GameEngine::new(&mut game)
            .simulate_plate_appearance(SimEnv::with_all(&league, &rules), &mut log)
            .expect("plate appearance");

        assert!(game.is_finished());
        assert_eq!(game.state.home_score, 1);
        assert_eq!(game.state.outs, 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn bottom_half_skipped_when_home_leads() {
        let league = league_with(looking_ratings());
        let rules = RuleConfig::default();
        let mut game = new_game(1);
        game.state.inning = 9;
        game.state.outs = 2;
        game.state.home_score = 3;

        run_pa(&mut game, &league, &rules);

        assert!(game.is_finished());
        assert_eq!(game.state.half, Half::Top);
    }

    #[test]
    fn endless_fouls_hit_the_pitch_cap() {
        let mut ratings = PlayerRatings::default();
        ratings.pitching.zone_rate = 1.0;
        ratings.pitching.whiff_induce = 0.0;
        ratings.batting.zone_swing = 1.0;
        ratings.batting.zone_contact = 1.0;
        let league = league_with(ratings);
        let rules = RuleConfig {
            foul_rate_on_contact: 1.0,
            ..RuleConfig::default()
        };
        let mut game = new_game(1);

        let result = run_pa(&mut game, &league, &rules);

        assert_eq!(result.outcome, PlateAppearanceOutcome::Unknown);
        assert_eq!(
            result.pitch_count(),
            RuleConfig::MAX_PITCHES_PER_PLATE_APPEARANCE
        );
        assert_eq!(result.pitches[39].sequence, 40);
        assert_eq!(game.state.outs, 0);
        assert_eq!(game.state.strikes, 0);
        assert_eq!(game.state.away_lineup_index, 1);
    }

    #[test]
    fn final_pitch_carries_score_snapshot() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(99);

        let result = run_pa(&mut game, &league, &rules);

        let last = result.pitches.last().expect("at least one pitch");
        assert!(last.ends_plate_appearance);
        let snapshot = last.steps.last().expect("snapshot");
        assert_eq!(snapshot.decision, Decision::ScoreSnapshot);
        assert_eq!(snapshot.roll, None);
        assert!(
            result.pitches[..result.pitches.len() - 1]
                .iter()
                .all(|pitch| pitch.steps.iter().all(|step| step.decision != Decision::ScoreSnapshot))
        );
    }

    #[test]
    fn seed_advances_after_each_call() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(5);

        run_pa(&mut game, &league, &rules);
        assert_ne!(game.seed, 5);
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let league = league();
        let rules = RuleConfig::default();

        let play = |seed| {
            let mut game = new_game(seed);
            let mut log: Vec<PlateAppearanceLog> = Vec::new();
            GameEngine::new(&mut game)
                .simulate_game(SimEnv::with_all(&league, &rules), &mut log)
                .expect("game");
            (game, log)
        };

        let (first_game, first_log) = play(2024);
        let (second_game, second_log) = play(2024);

        assert!(first_game.is_finished());
        assert_eq!(first_game, second_game);
        assert_eq!(first_log, second_log);
        assert!(first_game.state.inning >= 9);
        assert_ne!(first_game.state.away_score, first_game.state.home_score);
    }

    #[test]
    fn nonce_policy_changes_the_stream() {
        let league = league();
        let rules = RuleConfig::default();

        let play = |policy| {
            let mut game = new_game(11);
            let mut log: Vec<PlateAppearanceLog> = Vec::new();
            let env = SimEnv::with_all(&league, &rules).with_seed_policy(policy);
            GameEngine::new(&mut game)
                .simulate_half_inning(env, &mut log)
                .expect("half inning");
            log
        };

        let deterministic = play(SeedPolicy::Deterministic);
        assert_eq!(deterministic, play(SeedPolicy::Deterministic));
        let nonce = play(SeedPolicy::Nonce(0xdead_beef));
        assert_eq!(nonce, play(SeedPolicy::Nonce(0xdead_beef)));
        assert_ne!(deterministic, nonce);
    }

    #[test]
    fn single_pitch_replays_from_seed_and_state() {
        let league = league();
        let rules = RuleConfig::default();

        let throw = |policy| {
            let mut game = new_game(31);
            let env = SimEnv::with_all(&league, &rules).with_seed_policy(policy);
            let mut engine = GameEngine::new(&mut game);
            let pitches: Vec<PitchResult> = (0..12)
                .map(|_| engine.simulate_pitch(env).expect("pitch"))
                .collect();
            (pitches, game)
        };

        let (first, first_game) = throw(SeedPolicy::Deterministic);
        let (second, second_game) = throw(SeedPolicy::Deterministic);
        assert_eq!(first, second);
        assert_eq!(first_game, second_game);
        assert_ne!(first_game.seed, 31);
        assert!(
            first
                .iter()
                .flat_map(|pitch| &pitch.event.steps)
                .any(|step| step.roll.is_some())
        );

        // Single pitches are keyed on the count, not on the nonce.
        let (nonce, nonce_game) = throw(SeedPolicy::Nonce(0xfeed));
        assert_eq!(nonce, first);
        assert_eq!(nonce_game, first_game);
    }

    #[test]
    fn pitch_that_fills_the_count_closes_the_plate_appearance() {
        let league = league_with(looking_ratings());
        let rules = RuleConfig::default();
        let mut game = new_game(1);
        game.state.strikes = 2;

        let result = GameEngine::new(&mut game)
            .simulate_pitch(SimEnv::with_all(&league, &rules))
            .expect("pitch");

        assert_eq!(result.event.outcome, PitchOutcome::CalledStrike);
        assert_eq!(result.plate_appearance, Some(PlateAppearanceOutcome::Strikeout));
        assert!(result.event.ends_plate_appearance);
        assert_eq!(
            result.event.steps.last().map(|step| step.decision),
            Some(Decision::ScoreSnapshot)
        );
        assert_eq!(game.state.outs, 1);
        assert_eq!(game.state.strikes, 0);
        assert_eq!(game.state.away_lineup_index, 1);

        let result = GameEngine::new(&mut game)
            .simulate_pitch(SimEnv::with_all(&league, &rules))
            .expect("pitch");
        assert_eq!(result.plate_appearance, None);
        assert!(!result.event.ends_plate_appearance);
        assert_eq!(game.state.strikes, 1);
    }

    #[test]
    fn single_pitch_on_finished_game_is_rejected() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(3);
        game.status = GameStatus::Finished;
        let before = game.clone();

        let err = GameEngine::new(&mut game)
            .simulate_pitch(SimEnv::with_all(&league, &rules))
            .unwrap_err();

        assert_eq!(err, SimulationError::GameAlreadyFinished { game: GameId(7) });
        assert_eq!(game, before);
    }

    #[test]
    fn half_inning_stops_at_the_flip() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(3);
        let mut log: Vec<PlateAppearanceLog> = Vec::new();

        GameEngine::new(&mut game)
            .simulate_half_inning(SimEnv::with_all(&league, &rules), &mut log)
            .expect("half inning");

        assert_eq!(game.state.half, Half::Bottom);
        assert_eq!(game.state.inning, 1);
        assert!(log.iter().all(|entry| entry.half == Half::Top));
        assert!(log.iter().all(|entry| entry.offense == "Visitors"));
        assert!(log.len() >= 3);
    }

    #[test]
    fn finished_game_is_rejected_untouched() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(3);
        game.status = GameStatus::Finished;
        let before = game.clone();

        let err = GameEngine::new(&mut game)
            .simulate_plate_appearance(SimEnv::with_all(&league, &rules), &mut Vec::<PlateAppearanceLog>::new())
            .unwrap_err();

        assert_eq!(err, SimulationError::GameAlreadyFinished { game: GameId(7) });
        assert_eq!(game, before);
    }

    #[test]
    fn missing_rules_and_rosters_are_reported() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(3);
        let mut log: Vec<PlateAppearanceLog> = Vec::new();

        let rosters: &dyn RosterOracle = &league;
        let err = GameEngine::new(&mut game)
            .simulate_game(SimEnv::new(Some(rosters), None), &mut log)
            .unwrap_err();
        assert_eq!(err, SimulationError::MissingRuleSet);

        let err = GameEngine::new(&mut game)
            .simulate_half_inning(SimEnv::new(None, Some(&rules)), &mut log)
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidLineup {
                team: AWAY,
                reason: LineupError::RostersNotAvailable
            }
        );
        assert!(log.is_empty());
        assert_eq!(game.state, GameState::new());
    }

    #[test]
    fn vacant_slot_is_an_invalid_lineup() {
        let mut league = league();
        let rules = RuleConfig::default();
        if let Some(team) = league.team_mut(HOME) {
            team.lineup[4].player = None;
        }
        let mut game = new_game(3);

        let err = GameEngine::new(&mut game)
            .simulate_plate_appearance(SimEnv::with_all(&league, &rules), &mut Vec::<PlateAppearanceLog>::new())
            .unwrap_err();

        assert_eq!(
            err,
            SimulationError::InvalidLineup {
                team: HOME,
                reason: LineupError::Unassigned { slot: 4 }
            }
        );
        assert_eq!(game.seed, 3);
    }

    #[test]
    fn unknown_team_is_an_invalid_lineup() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = Game::new(GameId(1), TeamId(42), HOME, 0);

        let err = GameEngine::new(&mut game)
            .simulate_plate_appearance(SimEnv::with_all(&league, &rules), &mut Vec::<PlateAppearanceLog>::new())
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidLineup {
                reason: LineupError::UnknownTeam,
                ..
            }
        ));
    }

    #[test]
    fn reset_restores_first_pitch() {
        let league = league();
        let rules = RuleConfig::default();
        let mut game = new_game(8);
        let mut engine = GameEngine::new(&mut game);
        engine
            .simulate_game(SimEnv::with_all(&league, &rules), &mut Vec::<PlateAppearanceLog>::new())
            .expect("game");

        engine.reset_game(1234);

        let game = engine.game();
        assert_eq!(game.seed, 1234);
        assert_eq!(game.status, GameStatus::InProgress);
        assert_eq!(game.state, GameState::new());
    }
}
