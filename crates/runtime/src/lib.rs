//! Runtime services around the deterministic baseball engine.
//!
//! This crate wires the engine to static content and durable storage. Consumers
//! embed a [`Simulator`] to create games and drive them one plate appearance, one
//! half-inning, or one full game at a time.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the simulator and its builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`oracle`] shares rosters and rule sets with the engine
//! - [`repository`] persists game records and plate-appearance logs
pub mod api;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod types;

pub use api::{Result, RuntimeError};
pub use oracle::{OracleManager, RuleSetId, RuleSetRegistry};
pub use repository::{
    BlobError, FileGameRepository, FilePlateLog, FileRepository, GameRecord, GameRepository,
    InMemoryGameRepo, InMemoryPlateLog, PlateLogRepository, RepositoryError, StateBlob,
    entry_to_json, pitches_to_json,
};
pub use runtime::{RuntimeConfig, SeedMode, Simulator, SimulatorBuilder};
