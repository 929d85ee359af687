//! Configuration module for scoring policy management.
//!
//! The scoring rules that are still being tuned (apathy rule, boundary
//! probability, tie-break letters) live here rather than in code, so a
//! deployment can change them without a rebuild.
//!
//! # Module Structure
//!
//! - `loader`: Reads and writes `ScoringConfig` as JSON or TOML
//! - `validator`: Checks ranges and per-axis letters before a policy is built
//!
//! # Configuration Flow
//!
//! 1. `loader` reads a file (or falls back to `ScoringConfig::default()`)
//! 2. `validator` rejects inconsistent settings
//! 3. `ScoringConfig::to_policy()` builds the `ScoringPolicy`
//! 4. `ScoringConfig::build_scorer()` pairs it with a (possibly seeded) RNG

pub mod loader;
pub mod validator;

use crate::error::ConfigError;
use crate::models::Axis;
use crate::policy::{
    ApathyRule, DominantApathy, ProbabilisticApathy, ScoringPolicy, TieBreakPolicy,
    TieBreakTable,
};
use crate::scoring::CvtiScorer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which apathy strategy to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApathyRuleKind {
    Probabilistic,
    Dominant,
}

/// Apathy rule settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApathyConfig {
    pub rule: ApathyRuleKind,
    /// Probabilistic rule: count that is always apathetic
    pub certain_count: u32,
    /// Probabilistic rule: count where the coin flip starts
    pub boundary_count: u32,
    /// Probabilistic rule: chance of apathy at the boundary
    pub probability: f64,
    /// Dominant rule: minimum count
    pub dominant_threshold: u32,
}

impl Default for ApathyConfig {
    fn default() -> Self {
        ApathyConfig {
            rule: ApathyRuleKind::Probabilistic,
            certain_count: 3,
            boundary_count: 2,
            probability: 0.5,
            dominant_threshold: 2,
        }
    }
}

/// Tie-break mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMode {
    Table,
    Left,
    Right,
    Random,
}

/// Tie-break settings. Letter overrides only apply in `table` mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TieBreakConfig {
    pub mode: TieBreakMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tq: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sn: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jp: Option<char>,
}

impl TieBreakConfig {
    pub fn override_for(&self, axis: Axis) -> Option<char> {
        match axis {
            Axis::Tq => self.tq,
            Axis::Sn => self.sn,
            Axis::Pg => self.pg,
            Axis::Jp => self.jp,
        }
    }
}

impl Default for TieBreakConfig {
    fn default() -> Self {
        TieBreakConfig {
            mode: TieBreakMode::Table,
            tq: None,
            sn: None,
            pg: None,
            jp: None,
        }
    }
}

/// Complete scoring configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Fixed RNG seed for reproducible scoring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub apathy: ApathyConfig,
    pub tie_break: TieBreakConfig,
}

impl ScoringConfig {
    /// Validate and build the policy object.
    pub fn to_policy(&self) -> Result<ScoringPolicy, ConfigError> {
        validator::validate_scoring_config(self)?;

        let apathy: Arc<dyn ApathyRule> = match self.apathy.rule {
            ApathyRuleKind::Probabilistic => Arc::new(ProbabilisticApathy::new(
                self.apathy.certain_count,
                self.apathy.boundary_count,
                self.apathy.probability,
            )),
            ApathyRuleKind::Dominant => Arc::new(DominantApathy {
                threshold: self.apathy.dominant_threshold,
            }),
        };

        let tie_break = match self.tie_break.mode {
            TieBreakMode::Left => TieBreakPolicy::Left,
            TieBreakMode::Right => TieBreakPolicy::Right,
            TieBreakMode::Random => TieBreakPolicy::Random,
            TieBreakMode::Table => {
                let mut table = TieBreakTable::default();
                for axis in Axis::ALL {
                    if let Some(letter) = self.tie_break.override_for(axis) {
                        table.set(axis, validator::tie_break_side(axis, letter)?);
                    }
                }
                TieBreakPolicy::Table(table)
            }
        };

        log::debug!(
            "[Config] policy built: apathy={} tie_break={:?}",
            apathy.name(),
            tie_break
        );
        Ok(ScoringPolicy::new(apathy, tie_break))
    }

    /// Build a scorer; seeded when `seed` is set.
    pub fn build_scorer(&self) -> Result<CvtiScorer, ConfigError> {
        Ok(CvtiScorer::with_policy(self.to_policy()?, self.seed))
    }

    /// Letter a tie resolves to on `axis` in table mode.
    pub fn table_letter(&self, axis: Axis) -> char {
        let side = self
            .tie_break
            .override_for(axis)
            .and_then(|letter| validator::tie_break_side(axis, letter).ok())
            .unwrap_or_else(|| TieBreakTable::default().get(axis));
        axis.symbol(side.into())
    }
}
