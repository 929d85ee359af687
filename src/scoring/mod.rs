//! CVTI scoring engine
//!
//! Turns the answer impacts of one quiz session into a four-letter code and a
//! category.
//!
//! ## Pipeline
//! - **Tally**: sum the twelve impact buckets ([`tally`])
//! - **Apathy**: per axis, the policy's [`ApathyRule`](crate::policy::ApathyRule) may pick `O`
//! - **Pick**: otherwise the higher letter wins, ties per [`TieBreakPolicy`](crate::policy::TieBreakPolicy) ([`picker`])
//! - **Assemble**: code string plus apathy-axis count ([`assembler`])
//! - **Map**: code to [`ScamCategory`] ([`crate::category`])
//!
//! Every random draw comes from the scorer's own generator, so a seeded
//! scorer is fully reproducible.

pub mod assembler;
pub mod picker;
pub mod tally;

pub use tally::AxisTally;

use crate::category::ScamCategory;
use crate::models::{AnswerImpact, Axis, AxisPicks, AxisResolution, CvtiCode};
use crate::policy::ScoringPolicy;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Outcome of scoring one quiz session.
#[derive(Clone, Debug, Serialize)]
pub struct ScoringResult {
    /// Four-letter code, e.g. `TSGJ` or `OSPJ`
    pub cvti: CvtiCode,
    /// Per-axis resolution
    pub axis_picks: AxisPicks,
    /// Number of axes resolved to `O`
    pub o_axes_count: usize,
    /// Final archetype
    pub scam_type: ScamCategory,
    /// Raw bucket sums
    pub scores: AxisTally,
}

/// Scorer: owns the policy and the random source used for boundary draws.
#[derive(Debug)]
pub struct CvtiScorer<R: RngCore = ChaCha8Rng> {
    policy: ScoringPolicy,
    rng: R,
}

impl CvtiScorer<ChaCha8Rng> {
    /// Default policy, entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(ScoringPolicy::default(), ChaCha8Rng::from_entropy())
    }

    /// Default policy, deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ScoringPolicy::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// Custom policy with an optional seed.
    pub fn with_policy(policy: ScoringPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(policy, rng)
    }
}

impl Default for CvtiScorer<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> CvtiScorer<R> {
    /// Scorer with an injected random source.
    pub fn with_rng(policy: ScoringPolicy, rng: R) -> Self {
        CvtiScorer { policy, rng }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score an ordered list of answers. `None` marks a skipped question.
    pub fn score(&mut self, answers: &[Option<AnswerImpact>]) -> ScoringResult {
        let tally = AxisTally::from_answers(answers.iter().map(Option::as_ref));
        self.score_tally(&tally)
    }

    /// Score a list of answers that were all given.
    pub fn score_impacts(&mut self, impacts: &[AnswerImpact]) -> ScoringResult {
        let tally: AxisTally = impacts.iter().collect();
        self.score_tally(&tally)
    }

    /// Resolve axes, assemble the code and map it to a category.
    pub fn score_tally(&mut self, tally: &AxisTally) -> ScoringResult {
        let axis_picks = self.resolve_axes(tally);
        let (cvti, o_axes_count) = assembler::assemble(&axis_picks);
        let scam_type = crate::category::category_for_code(&cvti.to_string(), Some(o_axes_count));

        log::info!(
            "[Scoring] classified {} (O axes: {}) as {}",
            cvti,
            o_axes_count,
            scam_type
        );

        ScoringResult {
            cvti,
            axis_picks,
            o_axes_count,
            scam_type,
            scores: *tally,
        }
    }

    /// Apathy decision and pick for every axis, in canonical order.
    pub fn resolve_axes(&mut self, tally: &AxisTally) -> AxisPicks {
        let mut picks = AxisPicks {
            tq: AxisResolution::Apathy,
            sn: AxisResolution::Apathy,
            pg: AxisResolution::Apathy,
            jp: AxisResolution::Apathy,
        };
        for axis in Axis::ALL {
            let scores = tally.axis_scores(axis);
            let resolution = self.policy.resolve_axis(axis, &scores, &mut self.rng);
            picks.set(axis, resolution);
        }
        picks
    }
}
