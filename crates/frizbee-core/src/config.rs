//! Matcher configuration and scoring weights
//!
//! [`Scoring`] holds the weights used by the Smith-Waterman aligner and the
//! delimiter characters that drive the segment bonuses. [`Config`] wraps it
//! with the per-search policy: prefiltering, the typo budget, sorting and the
//! case policy.
//!
//! Both are plain values. Build them once, validate them once and share them
//! by reference across any number of threads.
//!
//! # Example
//!
//! ```rust
//! use frizbee_core::{Config, Scoring, ScoringOverrides};
//!
//! let scoring = Scoring::custom(
//!     ScoringOverrides {
//!         capitalization_bonus: Some(10),
//!         delimiter_bonus: Some(10),
//!         ..Default::default()
//!     },
//!     Some("_$"),
//! )
//! .unwrap();
//!
//! // Allow two typos, keep prefiltering and sorting on
//! let config = Config::custom(true, Some(2), true, Some(scoring)).unwrap();
//! assert_eq!(config.max_typos, Some(2));
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

pub const MATCH_SCORE: u16 = 12;
pub const MISMATCH_PENALTY: u16 = 5;
pub const GAP_OPEN_PENALTY: u16 = 5;
pub const GAP_EXTEND_PENALTY: u16 = 1;

pub const PREFIX_BONUS: u16 = 12;
pub const OFFSET_PREFIX_BONUS: u16 = 8;
pub const CAPITALIZATION_BONUS: u16 = 4;
pub const MATCHING_CASE_BONUS: u16 = 4;
pub const EXACT_MATCH_BONUS: u16 = 8;
pub const DELIMITER_BONUS: u16 = 4;

/// Path, identifier and URL separators
pub const DELIMITERS: &str = " /\\.,_-:";

/// Scoring weights for the aligner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Score for a matching character between needle and haystack
    pub match_score: u16,
    /// Penalty for aligning a needle character to a different haystack character (typo)
    pub mismatch_penalty: u16,
    /// Penalty for the first skipped haystack character of a gap
    pub gap_open_penalty: u16,
    /// Penalty for every further skipped haystack character of a gap
    pub gap_extend_penalty: u16,

    /// Bonus for matching the first character of the haystack (e.g. "h" on "hello_world")
    pub prefix_bonus: u16,
    /// Bonus for matching the first character of a segment (e.g. "w" on "hello_world")
    pub offset_prefix_bonus: u16,
    /// Bonus for matching a capital letter after a lowercase letter
    /// (e.g. "b" on "fooBar" will receive a bonus on "B")
    pub capitalization_bonus: u16,
    /// Bonus for matching the case of the needle (e.g. "WorLd" on "WoRld" will receive a
    /// bonus on "W", "o", "d")
    pub matching_case_bonus: u16,
    /// Bonus for matching the exact needle (e.g. "foo" on "foo" will receive the bonus)
    pub exact_match_bonus: u16,
    /// Bonus for matching _after_ a delimiter character (e.g. "hw" on "hello_world",
    /// will give a bonus on "w") if "_" is included in the delimiters string
    pub delimiter_bonus: u16,
    /// Characters that separate segments of a haystack
    pub delimiters: String,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: MATCH_SCORE,
            mismatch_penalty: MISMATCH_PENALTY,
            gap_open_penalty: GAP_OPEN_PENALTY,
            gap_extend_penalty: GAP_EXTEND_PENALTY,

            prefix_bonus: PREFIX_BONUS,
            offset_prefix_bonus: OFFSET_PREFIX_BONUS,
            capitalization_bonus: CAPITALIZATION_BONUS,
            matching_case_bonus: MATCHING_CASE_BONUS,
            exact_match_bonus: EXACT_MATCH_BONUS,
            delimiter_bonus: DELIMITER_BONUS,
            delimiters: DELIMITERS.to_string(),
        }
    }
}

/// Optional numeric overrides for [`Scoring::custom`]. `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOverrides {
    pub match_score: Option<u16>,
    pub mismatch_penalty: Option<u16>,
    pub gap_open_penalty: Option<u16>,
    pub gap_extend_penalty: Option<u16>,
    pub prefix_bonus: Option<u16>,
    pub offset_prefix_bonus: Option<u16>,
    pub capitalization_bonus: Option<u16>,
    pub matching_case_bonus: Option<u16>,
    pub exact_match_bonus: Option<u16>,
    pub delimiter_bonus: Option<u16>,
}

impl Scoring {
    /// Build scoring from explicit values, falling back to the defaults for
    /// every omitted field. The result is validated.
    pub fn custom(
        overrides: ScoringOverrides,
        delimiters: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let default = Scoring::default();
        let scoring = Scoring {
            match_score: overrides.match_score.unwrap_or(default.match_score),
            mismatch_penalty: overrides
                .mismatch_penalty
                .unwrap_or(default.mismatch_penalty),
            gap_open_penalty: overrides
                .gap_open_penalty
                .unwrap_or(default.gap_open_penalty),
            gap_extend_penalty: overrides
                .gap_extend_penalty
                .unwrap_or(default.gap_extend_penalty),
            prefix_bonus: overrides.prefix_bonus.unwrap_or(default.prefix_bonus),
            offset_prefix_bonus: overrides
                .offset_prefix_bonus
                .unwrap_or(default.offset_prefix_bonus),
            capitalization_bonus: overrides
                .capitalization_bonus
                .unwrap_or(default.capitalization_bonus),
            matching_case_bonus: overrides
                .matching_case_bonus
                .unwrap_or(default.matching_case_bonus),
            exact_match_bonus: overrides
                .exact_match_bonus
                .unwrap_or(default.exact_match_bonus),
            delimiter_bonus: overrides.delimiter_bonus.unwrap_or(default.delimiter_bonus),
            delimiters: delimiters.map(str::to_string).unwrap_or(default.delimiters),
        };
        scoring.validate()?;
        Ok(scoring)
    }

    /// Check the weights for consistency.
    ///
    /// An empty delimiter set combined with a non-zero segment bonus is allowed
    /// but logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gap_extend_penalty > self.gap_open_penalty {
            return Err(ConfigError::GapExtendExceedsOpen {
                open: self.gap_open_penalty,
                extend: self.gap_extend_penalty,
            });
        }

        if self.delimiters.is_empty()
            && (self.delimiter_bonus > 0 || self.offset_prefix_bonus > 0)
        {
            warn!(
                delimiter_bonus = self.delimiter_bonus,
                offset_prefix_bonus = self.offset_prefix_bonus,
                "delimiter set is empty, segment bonuses will never apply"
            );
        }

        Ok(())
    }
}

/// Per-search matching policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skip the aligner for haystacks that cannot contain the needle
    pub prefilter: bool,
    /// Maximum number of substituted needle characters. `None` allows any number of
    /// typos, `Some(0)` requires every needle character to match. Omitted in a
    /// serialized config, it means unlimited.
    #[serde(default)]
    pub max_typos: Option<u16>,
    /// Sort the results by score (descending)
    pub sort: bool,
    /// Compare characters exactly instead of case-folded
    pub case_sensitive: bool,
    /// Controls the scoring used by the smith waterman algorithm
    pub scoring: Scoring,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefilter: true,
            max_typos: Some(0),
            sort: true,
            case_sensitive: false,
            scoring: Scoring::default(),
        }
    }
}

impl Config {
    /// Build a config from explicit values. An absent typo budget means
    /// unlimited typos, an absent scoring means [`Scoring::default`].
    pub fn custom(
        prefilter: bool,
        max_typos: Option<i64>,
        sort: bool,
        scoring: Option<Scoring>,
    ) -> Result<Self, ConfigError> {
        let config = Config {
            prefilter,
            max_typos: max_typos.map(typo_budget).transpose()?,
            sort,
            case_sensitive: false,
            scoring: scoring.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style setter for the case policy
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()
    }
}

/// Convert a signed budget from an outer surface into the budget type
pub fn typo_budget(value: i64) -> Result<u16, ConfigError> {
    if value < 0 {
        return Err(ConfigError::NegativeTypoBudget(value));
    }
    u16::try_from(value).map_err(|_| ConfigError::TypoBudgetOverflow(value))
}
