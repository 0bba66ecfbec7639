//! Pairwise comparison of every item against every other item
//!
//! Alignment is directional (prefix and segment bonuses depend on haystack
//! positions), so `(i, j)` and `(j, i)` are scored independently.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ConfigError;
use crate::matcher::Matcher;
use crate::types::ComparisonResult;

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

/// Item counts above this log a warning, the work is quadratic
pub const LARGE_COMPARISON: usize = 1000;

/// Align every ordered pair `(i, j)`, `i != j`, with `items[i]` as the needle.
///
/// Pairs without an admissible alignment or scoring below `min_score` are
/// dropped. Output is ordered by descending score, then `(i, j)` ascending.
pub fn compare_all<S: AsRef<str> + Sync>(
    items: &[S],
    config: &Config,
    min_score: u16,
) -> Result<Vec<ComparisonResult>, ConfigError> {
    config.validate()?;

    if items.len() > LARGE_COMPARISON {
        warn!(
            items = items.len(),
            pairs = items.len() * (items.len() - 1),
            "pairwise comparison is quadratic in the number of items"
        );
    }

    let mut results = compare_rows(items, config, min_score);
    results.sort_unstable();

    debug!(
        items = items.len(),
        retained = results.len(),
        min_score,
        "compared all pairs"
    );
    Ok(results)
}

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
fn compare_rows<S: AsRef<str> + Sync>(
    items: &[S],
    config: &Config,
    min_score: u16,
) -> Vec<ComparisonResult> {
    (0..items.len())
        .into_par_iter()
        .flat_map_iter(|i| compare_row(i, items, config, min_score))
        .collect()
}

#[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
fn compare_rows<S: AsRef<str> + Sync>(
    items: &[S],
    config: &Config,
    min_score: u16,
) -> Vec<ComparisonResult> {
    (0..items.len())
        .flat_map(|i| compare_row(i, items, config, min_score))
        .collect()
}

/// All retained pairs with `items[i]` as the needle
fn compare_row<S: AsRef<str>>(
    i: usize,
    items: &[S],
    config: &Config,
    min_score: u16,
) -> Vec<ComparisonResult> {
    let needle = items[i].as_ref();
    let matcher = Matcher::new(needle, config);

    items
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .filter_map(|(j, haystack)| {
            let haystack = haystack.as_ref();
            let m = matcher.match_haystack(j, haystack)?;
            (m.score >= min_score).then(|| ComparisonResult {
                needle: needle.to_string(),
                haystack: haystack.to_string(),
                needle_index: i as u32,
                haystack_index: j as u32,
                score: m.score,
                exact: m.exact,
            })
        })
        .collect()
}
