//! Policy engine for apathy detection and tie-breaking.
//!
//! The apathy rule is a strategy behind [`ApathyRule`]; the reference rule is
//! [`ProbabilisticApathy`]. Randomness is always passed in by the caller so a
//! seeded generator reproduces a classification exactly.

use crate::models::{Axis, AxisResolution, Side};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The three scores of one axis after tallying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScores {
    pub left: u32,   // Left letter
    pub right: u32,  // Right letter
    pub apathy: u32, // O counter
}

/// Decides whether an axis resolves to the apathy marker.
pub trait ApathyRule: fmt::Debug + Send + Sync {
    /// Short identifier used in logs and config.
    fn name(&self) -> &'static str;

    fn is_apathetic(&self, scores: &AxisScores, rng: &mut dyn RngCore) -> bool;
}

/// Count-threshold rule with a coin flip at the boundary.
///
/// - `apathy >= certain_count`: always apathetic
/// - `apathy >= boundary_count`: apathetic with `probability`
/// - otherwise never
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticApathy {
    pub certain_count: u32,
    pub boundary_count: u32,
    pub probability: f64,
}

impl ProbabilisticApathy {
    pub fn new(certain_count: u32, boundary_count: u32, probability: f64) -> Self {
        ProbabilisticApathy {
            certain_count,
            boundary_count,
            probability: if probability.is_finite() {
                probability.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    /// Same thresholds, different boundary probability.
    pub fn with_probability(self, probability: f64) -> Self {
        Self::new(self.certain_count, self.boundary_count, probability)
    }
}

impl Default for ProbabilisticApathy {
    fn default() -> Self {
        ProbabilisticApathy::new(3, 2, 0.5)
    }
}

impl ApathyRule for ProbabilisticApathy {
    fn name(&self) -> &'static str {
        "probabilistic"
    }

    fn is_apathetic(&self, scores: &AxisScores, rng: &mut dyn RngCore) -> bool {
        if scores.apathy >= self.certain_count {
            true
        } else if scores.apathy >= self.boundary_count {
            // gen::<f64>() is in [0, 1), so 1.0 always and 0.0 never fires
            rng.gen::<f64>() < self.probability
        } else {
            false
        }
    }
}

/// Earlier deterministic rule: apathy wins when it reaches `threshold` and
/// neither substantive score exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominantApathy {
    pub threshold: u32,
}

impl Default for DominantApathy {
    fn default() -> Self {
        DominantApathy { threshold: 2 }
    }
}

impl ApathyRule for DominantApathy {
    fn name(&self) -> &'static str {
        "dominant"
    }

    fn is_apathetic(&self, scores: &AxisScores, _rng: &mut dyn RngCore) -> bool {
        scores.apathy >= self.threshold && scores.apathy >= scores.left.max(scores.right)
    }
}

/// Per-axis letter chosen when both substantive scores are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakTable {
    pub tq: Side,
    pub sn: Side,
    pub pg: Side,
    pub jp: Side,
}

impl TieBreakTable {
    pub fn get(&self, axis: Axis) -> Side {
        match axis {
            Axis::Tq => self.tq,
            Axis::Sn => self.sn,
            Axis::Pg => self.pg,
            Axis::Jp => self.jp,
        }
    }

    pub fn set(&mut self, axis: Axis, side: Side) {
        match axis {
            Axis::Tq => self.tq = side,
            Axis::Sn => self.sn = side,
            Axis::Pg => self.pg = side,
            Axis::Jp => self.jp = side,
        }
    }
}

impl Default for TieBreakTable {
    /// Conservative defaults: Q, S, G, J.
    fn default() -> Self {
        TieBreakTable {
            tq: Side::Right,
            sn: Side::Left,
            pg: Side::Right,
            jp: Side::Left,
        }
    }
}

/// How ties between two substantive scores are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Fixed per-axis letters
    Table(TieBreakTable),
    /// Always the left letter
    Left,
    /// Always the right letter
    Right,
    /// Fair coin from the injected RNG
    Random,
}

impl TieBreakPolicy {
    pub fn resolve(&self, axis: Axis, rng: &mut dyn RngCore) -> Side {
        match self {
            TieBreakPolicy::Table(table) => table.get(axis),
            TieBreakPolicy::Left => Side::Left,
            TieBreakPolicy::Right => Side::Right,
            TieBreakPolicy::Random => {
                if rng.gen::<bool>() {
                    Side::Left
                } else {
                    Side::Right
                }
            }
        }
    }
}

impl Default for TieBreakPolicy {
    fn default() -> Self {
        TieBreakPolicy::Table(TieBreakTable::default())
    }
}

/// Complete rule set used by the scorer.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    pub apathy: Arc<dyn ApathyRule>,
    pub tie_break: TieBreakPolicy,
}

impl ScoringPolicy {
    pub fn new(apathy: Arc<dyn ApathyRule>, tie_break: TieBreakPolicy) -> Self {
        ScoringPolicy { apathy, tie_break }
    }

    /// Resolve one axis: apathy first, then the higher score, then tie-break.
    pub fn resolve_axis(
        &self,
        axis: Axis,
        scores: &AxisScores,
        rng: &mut dyn RngCore,
    ) -> AxisResolution {
        if self.apathy.is_apathetic(scores, rng) {
            log::debug!(
                "[Policy] {} apathetic via {} rule (O={})",
                axis,
                self.apathy.name(),
                scores.apathy
            );
            return AxisResolution::Apathy;
        }
        crate::scoring::picker::pick_side(axis, scores, &self.tie_break, rng).into()
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::new(
            Arc::new(ProbabilisticApathy::default()),
            TieBreakPolicy::default(),
        )
    }
}
