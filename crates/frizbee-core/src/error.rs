//! Error types for matcher configuration

use thiserror::Error;

/// Errors raised while building or validating a [`Config`](crate::Config)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Extending a gap must never cost more than opening one
    #[error("gap_extend_penalty ({extend}) exceeds gap_open_penalty ({open})")]
    GapExtendExceedsOpen { open: u16, extend: u16 },

    /// Typo budgets are counts and cannot be negative
    #[error("typo budget must be non-negative, got {0}")]
    NegativeTypoBudget(i64),

    /// Typo budget larger than the budget type can hold
    #[error("typo budget {0} exceeds the maximum of {max}", max = u16::MAX)]
    TypoBudgetOverflow(i64),
}

/// Common error type for matcher operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dedicated rayon pool could not be built
    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias using the matcher [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
