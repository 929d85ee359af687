//! CVTI Scorer
//!
//! Classifies a person's scam-susceptibility profile from their answers to a
//! short situational quiz. Answers accumulate weighted votes on four bipolar
//! axes (TQ, SN, PG, JP); each axis resolves to one of its two letters or to
//! the apathy marker `O`, and the resulting four-symbol code maps onto one of
//! nine archetypes.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Axes, answer impacts, codes
//! - **policy**: Apathy rules and tie-break policies
//! - **scoring**: Tally, pick, assemble
//! - **category**: Code-to-archetype mapping
//! - **config**: Scoring configuration files
//! - **questions**: Built-in question bank and quiz sessions
//! - **results**: Saved results and statistics
//! - **report**: Mapping table export
//! - **log_collector**: File-backed logging

pub mod category;
pub mod config;
pub mod error;
pub mod log_collector;
pub mod models;
pub mod policy;
pub mod questions;
pub mod report;
pub mod results;
pub mod scoring;

// Re-export the log crate for macro usage
pub use log;

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use category::{category_for_code, normalize_code, ScamCategory};
pub use config::ScoringConfig;
pub use error::{CodeError, ConfigError, CvtiError, QuestionBankError, Result, StoreError};
pub use log_collector::{init_logging, LogCollector, LogLine};
pub use models::{AnswerImpact, Axis, AxisPicks, AxisResolution, CvtiCode, LegacyImpact, Side};
pub use policy::{
    ApathyRule, AxisScores, DominantApathy, ProbabilisticApathy, ScoringPolicy, TieBreakPolicy,
    TieBreakTable,
};
pub use questions::{QuestionBank, QuizSession};
pub use results::{ResultRecord, ResultStats, ResultStore, RiskBand};
pub use scoring::{AxisTally, CvtiScorer, ScoringResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
