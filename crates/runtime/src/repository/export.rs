//! Human-readable export of logged plate appearances.

use ballpark_core::PlateAppearanceLog;

use crate::repository::Result;

/// Pretty-printed JSON of one entry's pitches and their trace steps.
pub fn pitches_to_json(entry: &PlateAppearanceLog) -> Result<String> {
    Ok(serde_json::to_string_pretty(&entry.pitches)?)
}

/// Pretty-printed JSON of a whole log entry.
pub fn entry_to_json(entry: &PlateAppearanceLog) -> Result<String> {
    Ok(serde_json::to_string_pretty(entry)?)
}
