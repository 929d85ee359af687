//! Code assembler: four resolutions to a code and an apathy-axis count.

use crate::models::{AxisPicks, CvtiCode};

/// Assemble the code for a set of picks and count its apathetic axes.
pub fn assemble(picks: &AxisPicks) -> (CvtiCode, usize) {
    (CvtiCode::from_picks(picks), picks.apathy_count())
}
