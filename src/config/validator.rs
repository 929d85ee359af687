//! Config validation.

use super::{ApathyRuleKind, ScoringConfig};
use crate::error::ConfigError;
use crate::models::{Axis, AxisResolution, Side};

/// Validate a full scoring configuration.
pub fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    validate_apathy(config)?;
    for axis in Axis::ALL {
        if let Some(letter) = config.tie_break.override_for(axis) {
            tie_break_side(axis, letter)?;
        }
    }
    Ok(())
}

fn validate_apathy(config: &ScoringConfig) -> Result<(), ConfigError> {
    let apathy = &config.apathy;

    if !apathy.probability.is_finite() || !(0.0..=1.0).contains(&apathy.probability) {
        return Err(ConfigError::ValidationFailed(format!(
            "apathy.probability must be within [0, 1], got {}",
            apathy.probability
        )));
    }

    match apathy.rule {
        ApathyRuleKind::Probabilistic => {
            if apathy.boundary_count == 0 {
                return Err(ConfigError::ValidationFailed(
                    "apathy.boundary_count must be at least 1".to_string(),
                ));
            }
            if apathy.boundary_count >= apathy.certain_count {
                return Err(ConfigError::ValidationFailed(format!(
                    "apathy.boundary_count ({}) must be below apathy.certain_count ({})",
                    apathy.boundary_count, apathy.certain_count
                )));
            }
        }
        ApathyRuleKind::Dominant => {
            if apathy.dominant_threshold == 0 {
                return Err(ConfigError::ValidationFailed(
                    "apathy.dominant_threshold must be at least 1".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Resolve a tie-break letter for an axis. The apathy marker is not a valid
/// tie-break.
pub fn tie_break_side(axis: Axis, letter: char) -> Result<Side, ConfigError> {
    match axis.resolution_for(letter) {
        Some(AxisResolution::Left) => Ok(Side::Left),
        Some(AxisResolution::Right) => Ok(Side::Right),
        _ => {
            let (left, right) = axis.letters();
            Err(ConfigError::ValidationFailed(format!(
                "tie_break.{} must be '{}' or '{}', got '{}'",
                axis.as_str().to_lowercase(),
                left,
                right,
                letter
            )))
        }
    }
}
