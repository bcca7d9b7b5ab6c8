//! Error types for clause-meter-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while scoring a parse tree.
#[derive(Error, Debug)]
pub enum ScoreError {
    /// The parse tree violates a structural invariant and cannot be
    /// scored without producing a misleading result.
    #[error("invalid parse tree: {0}")]
    InvalidTree(String),

    /// The factorial depth penalty exceeded the integer range.
    ///
    /// Reported instead of wrapping silently; realistic nesting depths
    /// stay far below this limit.
    #[error("structural penalty overflow at nesting depth {depth}")]
    PenaltyOverflow {
        /// The dependent-clause nesting depth that overflowed.
        depth: usize,
    },
}

/// Result type alias using [`ScoreError`].
pub type ScoreResult<T> = Result<T, ScoreError>;
