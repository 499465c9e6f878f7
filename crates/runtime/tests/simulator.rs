use std::sync::Arc;

use ballpark_content::ContentFactory;
use ballpark_core::{
    GameId, GameState, GameStatus, Half, PlateAppearanceLog, PlateAppearanceOutcome,
    SimulationError, TeamId,
};
use ballpark_runtime::{
    OracleManager, PlateLogRepository, RepositoryError, RuleSetId, RuleSetRegistry, RuntimeError,
    Simulator,
};

const AWAY: TeamId = TeamId(1);
const HOME: TeamId = TeamId(2);

fn oracles() -> OracleManager {
    let content = ContentFactory::bundled();
    let league = content.load_league().expect("bundled league loads");
    let rules = content.load_rules().expect("bundled rules load");
    OracleManager::new(Arc::new(league), Arc::new(RuleSetRegistry::with_default(rules)))
}

fn simulator() -> Simulator {
    Simulator::builder()
        .oracles(oracles())
        .build()
        .expect("in-memory simulator builds")
}

fn new_game(simulator: &Simulator, seed: u64) -> GameId {
    simulator
        .create_game_with_seed(AWAY, HOME, Some(RuleSetId::default_set()), seed)
        .expect("game is created")
}

#[test]
fn full_game_runs_to_a_decision() {
    let simulator = simulator();
    let id = new_game(&simulator, 42);

    let game = simulator.play_game(id).unwrap();

    assert_eq!(game.status, GameStatus::Finished);
    assert_ne!(game.state.away_score, game.state.home_score);
    assert!(game.state.inning >= 9);
    assert!(game.state.is_well_formed());
    assert_eq!(simulator.game(id).unwrap(), game);

    let log = simulator.plate_log(id).unwrap();
    // 16 full half innings of at least two batters, plus a walk-off at worst.
    assert!(log.len() >= 33);
    for entry in &log {
        assert_eq!(entry.game_id, id);
        assert_eq!(entry.pitch_count, entry.pitches.len());
        let last = entry.pitches.last().expect("every plate appearance has a pitch");
        assert!(last.ends_plate_appearance);
        assert!(
            entry.pitches[..entry.pitches.len() - 1]
                .iter()
                .all(|pitch| !pitch.ends_plate_appearance)
        );
    }
    assert_eq!(log[0].inning, 1);
    assert_eq!(log[0].half, Half::Top);
    assert_eq!(log[0].offense, "Harbor Gulls");
    assert_eq!(log[0].defense, "Summit Rams");
}

#[test]
fn same_seed_replays_the_same_game() {
    let simulator = simulator();
    let first = new_game(&simulator, 7);
    let second = new_game(&simulator, 7);

    let a = simulator.play_game(first).unwrap();
    let b = simulator.play_game(second).unwrap();

    assert_eq!(a.state, b.state);
    assert_eq!(a.seed, b.seed);

    let trace = |id| {
        simulator
            .plate_log(id)
            .unwrap()
            .into_iter()
            .map(|entry| (entry.outcome, entry.pitches))
            .collect::<Vec<_>>()
    };
    assert_eq!(trace(first), trace(second));
}

#[test]
fn finished_game_rejects_further_play() {
    let simulator = simulator();
    let id = new_game(&simulator, 3);
    let finished = simulator.play_game(id).unwrap();
    let logged = simulator.plate_log(id).unwrap().len();

    let err = simulator.plate_appearance(id).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Simulation(SimulationError::GameAlreadyFinished { game }) if game == id
    ));
    assert_eq!(simulator.game(id).unwrap(), finished);
    assert_eq!(simulator.plate_log(id).unwrap().len(), logged);
}

#[test]
fn half_inning_hands_the_bat_to_the_home_side() {
    let simulator = simulator();
    let id = new_game(&simulator, 11);

    let game = simulator.half_inning(id).unwrap();

    assert_eq!(game.state.inning, 1);
    assert_eq!(game.state.half, Half::Bottom);
    assert_eq!(game.state.outs, 0);
    assert!(game.state.bases.is_empty());
    assert!(
        simulator
            .plate_log(id)
            .unwrap()
            .iter()
            .all(|entry| entry.half == Half::Top)
    );
}

#[test]
fn plate_appearance_reports_its_outcome() {
    let simulator = simulator();
    let id = new_game(&simulator, 99);
    let seed = simulator.game(id).unwrap().seed;

    let result = simulator.plate_appearance(id).unwrap();

    let log = simulator.plate_log(id).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].outcome, result.outcome);
    assert_eq!(log[0].pitches, result.pitches);
    assert_ne!(result.outcome, PlateAppearanceOutcome::Unknown);

    let game = simulator.game(id).unwrap();
    assert_ne!(game.seed, seed);
    assert_eq!((game.state.balls, game.state.strikes), (0, 0));
    assert_eq!(game.state.away_lineup_index, 1);
}

#[test]
fn single_pitches_replay_from_the_stored_seed() {
    let throw = || {
        let simulator = simulator();
        let id = new_game(&simulator, 64);
        let pitches: Vec<_> = (0..8).map(|_| simulator.pitch(id).unwrap()).collect();
        (pitches, simulator.game(id).unwrap(), simulator.plate_log(id).unwrap())
    };

    let (first, first_game, first_log) = throw();
    let (second, second_game, _) = throw();

    assert_eq!(first, second);
    assert_eq!(first_game, second_game);
    assert_ne!(first_game.seed, 64);
    assert!(first_log.is_empty());
    assert!(first_game.state.is_well_formed());
}

/// Plate log whose writes always fail.
struct RefusingLog;

impl PlateLogRepository for RefusingLog {
    fn append(&mut self, _entry: &PlateAppearanceLog) -> Result<u64, RepositoryError> {
        Err(std::io::Error::other("disk full").into())
    }

    fn entries(&self, _game: GameId) -> Result<Vec<PlateAppearanceLog>, RepositoryError> {
        Ok(Vec::new())
    }

    fn flush(&mut self) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn clear(&mut self, _game: GameId) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[test]
fn failed_log_write_keeps_the_saved_game() {
    let simulator = Simulator::builder()
        .oracles(oracles())
        .plate_log(RefusingLog)
        .build()
        .expect("simulator builds");
    let id = new_game(&simulator, 8);

    let err = simulator.plate_appearance(id).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Repository(RepositoryError::Io(_))
    ));
    let game = simulator.game(id).unwrap();
    assert_eq!(game.state.away_lineup_index, 1);
    assert_ne!(game.seed, 8);
    assert!(simulator.plate_log(id).unwrap().is_empty());
}

#[test]
fn game_without_rules_cannot_start() {
    let simulator = simulator();
    let id = simulator.create_game_with_seed(AWAY, HOME, None, 5).unwrap();

    let err = simulator.plate_appearance(id).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Simulation(SimulationError::MissingRuleSet)
    ));
    let game = simulator.game(id).unwrap();
    assert_eq!(game.seed, 5);
    assert_eq!(game.state, GameState::new());
}

#[test]
fn unknown_references_are_rejected() {
    let simulator = simulator();

    let err = simulator
        .create_game(AWAY, HOME, Some(RuleSetId::new("sandlot")))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::RuleSetNotFound { .. }));

    let err = simulator.game(GameId(404)).unwrap_err();
    assert!(matches!(err, RuntimeError::GameNotFound { game: GameId(404) }));

    let id = simulator
        .create_game(AWAY, TeamId(77), Some(RuleSetId::default_set()))
        .unwrap();
    let err = simulator.half_inning(id).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Simulation(SimulationError::InvalidLineup { team: TeamId(77), .. })
    ));
}

#[test]
fn reset_returns_to_the_first_pitch() {
    let simulator = simulator();
    let id = new_game(&simulator, 21);
    simulator.play_game(id).unwrap();

    let game = simulator.reset_game(id).unwrap();

    assert_eq!(game.status, GameStatus::InProgress);
    assert_eq!(game.state, GameState::new());
    assert_eq!((game.away, game.home), (AWAY, HOME));
    assert!(simulator.plate_log(id).unwrap().is_empty());
    assert_eq!(simulator.game(id).unwrap(), game);

    simulator.plate_appearance(id).unwrap();
    assert_eq!(simulator.plate_log(id).unwrap().len(), 1);
}

#[test]
fn independent_games_run_on_separate_threads() {
    let simulator = Arc::new(simulator());
    let ids: Vec<GameId> = (0..4).map(|seed| new_game(&simulator, seed)).collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let simulator = Arc::clone(&simulator);
            std::thread::spawn(move || simulator.play_game(id))
        })
        .collect();

    for handle in handles {
        let game = handle.join().unwrap().unwrap();
        assert_eq!(game.status, GameStatus::Finished);
    }
    assert_eq!(simulator.list_games().unwrap(), ids);
}
