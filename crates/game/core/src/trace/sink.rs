//! Per plate-appearance log records and the sink that receives them.

use super::{PitchEvent, PlateAppearanceOutcome};
use crate::state::{GameId, Half};

/// Immutable record emitted once per completed plate appearance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlateAppearanceLog {
    pub game_id: GameId,
    pub inning: u16,
    pub half: Half,
    pub offense: String,
    pub defense: String,
    pub batter: String,
    pub pitcher: String,
    pub outcome: PlateAppearanceOutcome,
    pub pitch_count: usize,
    pub pitches: Vec<PitchEvent>,
}

/// Receives plate-appearance records as the engine produces them.
///
/// Recording is infallible from the engine's point of view; durable sinks buffer
/// and surface I/O failures from their own flush path.
pub trait PlateAppearanceSink {
    fn record(&mut self, entry: PlateAppearanceLog);
}

impl PlateAppearanceSink for Vec<PlateAppearanceLog> {
    fn record(&mut self, entry: PlateAppearanceLog) {
        self.push(entry);
    }
}

impl<S> PlateAppearanceSink for &mut S
where
    S: PlateAppearanceSink + ?Sized,
{
    fn record(&mut self, entry: PlateAppearanceLog) {
        (**self).record(entry);
    }
}
