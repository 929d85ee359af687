//! Persisted classification results.
//!
//! A [`ResultRecord`] is what gets saved after a quiz: the code, the category
//! label, a 0..=100 risk score and a UTC timestamp. Field names follow the
//! stored JSON layout (`cvti`, `oAxesCount`, `scamType`, `risk`, `createdAt`);
//! older records that carry the code under `mbti` still load.

pub mod stats;
pub mod store;

pub use stats::{CategoryCount, LatestResult, ResultStats, DEFAULT_STATS_WINDOW};
pub use store::{JsonlResultStore, MemoryResultStore, ResultStore};

use crate::scoring::ScoringResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Risk used when none is supplied or the input is not a finite number.
pub const DEFAULT_RISK: u8 = 60;

/// One saved classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default, alias = "mbti")]
    pub cvti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o_axes_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scam_type: Option<String>,
    #[serde(default = "default_risk", deserialize_with = "deserialize_risk")]
    pub risk: u8,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_risk() -> u8 {
    DEFAULT_RISK
}

/// Stored risk may be fractional, out of range, null or not a number at all.
fn deserialize_risk<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map_or(DEFAULT_RISK, clamp_risk))
}

impl ResultRecord {
    /// Record for a fresh scoring result, stamped now.
    pub fn from_result(result: &ScoringResult, risk: Option<f64>) -> Self {
        ResultRecord {
            cvti: result.cvti.to_string(),
            o_axes_count: Some(result.o_axes_count),
            scam_type: Some(result.scam_type.label().to_string()),
            risk: risk.map_or(DEFAULT_RISK, clamp_risk),
            created_at: Utc::now(),
        }
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_risk(self.risk)
    }
}

/// Clamp to 0..=100 and round; NaN and infinities give [`DEFAULT_RISK`].
pub fn clamp_risk(value: f64) -> u8 {
    if !value.is_finite() {
        return DEFAULT_RISK;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Coarse risk level shown next to the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_risk(risk: u8) -> Self {
        match risk {
            67..=u8::MAX => RiskBand::High,
            34..=66 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }

    /// Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "낮음",
            RiskBand::Medium => "보통",
            RiskBand::High => "높음",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
