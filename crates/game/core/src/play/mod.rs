//! Pitch and ball-in-play resolution.
//!
//! Everything here is a pure function of the game state, the participants'
//! ratings, the rules and a [`RandomSource`](crate::env::RandomSource). Each
//! random decision goes through [`probability`] and leaves a
//! [`TraceStep`](crate::trace::TraceStep) behind.
pub mod bases;
pub mod ground_out;
pub mod in_play;
pub mod pitch;
pub mod probability;

pub use bases::HitKind;
pub use in_play::{BattedBallType, resolve_ball_in_play};
pub use pitch::{PitchContext, average_fielding, resolve_pitch, simulate_single_pitch};
pub use probability::{FINE_RANGE, STANDARD_RANGE};
