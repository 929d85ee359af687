//! Unified error type hierarchy for the CVTI scorer
//!
//! Scoring and category mapping are total functions and never fail. Errors only
//! arise at the outer surfaces: configuration files, strict code parsing, the
//! question bank, and the result store.

use std::io;
use thiserror::Error;

/// Configuration file parsing and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid TOML in config: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Failed to serialize TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Strict CVTI code parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("CVTI code must be 4 characters, got {0}")]
    InvalidLength(usize),

    #[error("Invalid symbol '{found}' at position {position} (axis {axis} allows {allowed})")]
    InvalidSymbol {
        position: usize,
        axis: &'static str,
        allowed: String,
        found: char,
    },
}

/// Question bank loading and validation errors.
#[derive(Error, Debug)]
pub enum QuestionBankError {
    #[error("Invalid question bank JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Question bank validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error while reading question bank: {0}")]
    IoError(#[from] io::Error),
}

/// Result store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to serialize result record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error in result store: {0}")]
    IoError(#[from] io::Error),
}

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum CvtiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Quiz session misuse (choice out of range, answering a finished quiz)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CvtiError {
    /// Get a user-facing error message suitable for CLI display
    pub fn user_message(&self) -> String {
        match self {
            CvtiError::Config(e) => format!("Configuration problem: {}", e),
            CvtiError::Code(e) => format!("Not a valid CVTI code: {}", e),
            CvtiError::QuestionBank(e) => format!("Could not load questions: {}", e),
            CvtiError::Store(e) => format!("Could not access saved results: {}", e),
            CvtiError::InvalidInput(msg) => format!("Invalid input: {}", msg),
        }
    }
}

/// Top-level result type for fallible crate operations.
pub type Result<T> = std::result::Result<T, CvtiError>;
