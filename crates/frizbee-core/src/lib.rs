//! Frizbee Core Engine
//!
//! Typo resistant fuzzy string matching. The core is Smith-Waterman local
//! alignment with affine gaps, plus positional bonuses for prefixes, segment
//! starts after delimiters, camelCase boundaries and matching case.
//!
//! Three operations are exposed:
//!
//! - [`rank`]: score one needle against a list of haystacks
//! - [`match_indices`]: explain one match with the haystack positions it used
//! - [`compare_all`]: score every ordered pair of a single list
//!
//! # Features
//!
//! - `parallel` - Parallel matching via rayon for large lists and pairwise comparison (native only)
//!
//! # Example
//!
//! ```rust
//! use frizbee_core::{match_indices, rank, Config};
//!
//! let haystacks = ["getUserData", "setUserData", "README.md"];
//! let matches = rank("user", &haystacks, &Config::default()).unwrap();
//! assert_eq!(matches.len(), 2);
//!
//! let explained = match_indices("hdr", "Header.tsx", &Config::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(explained.indices, vec![0, 3, 5]);
//! ```

pub mod backtrace;
pub mod bonus;
pub mod compare;
pub mod config;
pub mod error;
pub mod matcher;
pub mod prefilter;
pub mod smith_waterman;
pub mod types;

pub use compare::compare_all;
pub use config::{Config, Scoring, ScoringOverrides};
pub use error::{ConfigError, Error, Result};
pub use matcher::Matcher;
pub use types::{ComparisonResult, Match, MatchIndices};

/// Rank haystacks against the needle.
///
/// Haystacks without an admissible alignment are omitted. With `config.sort`
/// the output is ordered by descending score, ties in input order.
pub fn rank<S: AsRef<str> + Sync>(
    needle: &str,
    haystacks: &[S],
    config: &Config,
) -> std::result::Result<Vec<Match>, ConfigError> {
    config.validate()?;
    Ok(Matcher::new(needle, config).match_list(haystacks))
}

/// Like [`rank`] with the matched haystack positions of every result
pub fn rank_indices<S: AsRef<str> + Sync>(
    needle: &str,
    haystacks: &[S],
    config: &Config,
) -> std::result::Result<Vec<MatchIndices>, ConfigError> {
    config.validate()?;
    Ok(Matcher::new(needle, config).match_list_indices(haystacks))
}

/// Like [`rank`] on a dedicated pool of `threads` threads
#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
pub fn rank_parallel<S: AsRef<str> + Sync>(
    needle: &str,
    haystacks: &[S],
    config: &Config,
    threads: usize,
) -> Result<Vec<Match>> {
    config.validate()?;
    Matcher::new(needle, config).match_list_parallel(haystacks, threads)
}

/// Explain a single match. Returns `Ok(None)` when the pair has no admissible
/// alignment.
pub fn match_indices(
    needle: &str,
    haystack: &str,
    config: &Config,
) -> std::result::Result<Option<MatchIndices>, ConfigError> {
    config.validate()?;
    Ok(Matcher::new(needle, config).match_indices(0, haystack))
}
