//! Matcher - one needle against many haystacks
//!
//! Pipeline per haystack: prefilter (when enabled), then the score-only
//! Smith-Waterman pass, or the full table plus backtrace when indices are
//! requested. Haystacks without an admissible alignment are dropped.

use tracing::debug;

use crate::backtrace;
use crate::config::Config;
use crate::prefilter::Prefilter;
use crate::smith_waterman::{clamp_score, SmithWaterman};
use crate::types::{Match, MatchIndices};

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

/// Lists at least this long are matched on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Matcher prepared for one needle
///
/// The config is expected to be validated already; the crate level
/// functions ([`rank`](crate::rank) and friends) do that once per call.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    config: &'a Config,
    smith_waterman: SmithWaterman<'a>,
    prefilter: Option<Prefilter>,
}

impl<'a> Matcher<'a> {
    pub fn new(needle: &str, config: &'a Config) -> Self {
        let smith_waterman = SmithWaterman::new(needle, config);
        let prefilter = config.prefilter.then(|| {
            Prefilter::new(needle, smith_waterman.typo_cap(), config.case_sensitive)
        });

        Self {
            config,
            smith_waterman,
            prefilter,
        }
    }

    fn needle_is_empty(&self) -> bool {
        self.smith_waterman.needle_len() == 0
    }

    fn rejected(&self, haystack: &str) -> bool {
        self.prefilter
            .as_ref()
            .is_some_and(|prefilter| !prefilter.matches(haystack))
    }

    /// Score a single haystack; `index` is its position in the caller's list
    pub fn match_haystack(&self, index: usize, haystack: &str) -> Option<Match> {
        if self.needle_is_empty() {
            return Some(Match::from_index(index));
        }
        if self.rejected(haystack) {
            return None;
        }

        let prepared = self.smith_waterman.prepare(haystack);
        let scored = self.smith_waterman.score(&prepared)?;
        Some(Match {
            score: clamp_score(scored.score),
            index: index as u32,
            exact: scored.exact,
        })
    }

    /// Score a single haystack and recover the matched character positions
    pub fn match_indices(&self, index: usize, haystack: &str) -> Option<MatchIndices> {
        if self.needle_is_empty() {
            return Some(MatchIndices::from_index(index));
        }
        if self.rejected(haystack) {
            return None;
        }

        let prepared = self.smith_waterman.prepare(haystack);
        let alignment = self.smith_waterman.align(&prepared)?;
        Some(MatchIndices {
            score: clamp_score(alignment.score),
            index: index as u32,
            exact: alignment.exact,
            indices: backtrace::trace(&alignment),
        })
    }

    /// Match every haystack, sorting by score when the config asks for it
    pub fn match_list<S: AsRef<str> + Sync>(&self, haystacks: &[S]) -> Vec<Match> {
        let mut matches = self.match_all(haystacks);
        if self.config.sort {
            matches.sort_unstable();
        }

        debug!(
            haystacks = haystacks.len(),
            matched = matches.len(),
            "ranked haystacks"
        );
        matches
    }

    /// Like [`Matcher::match_list`] but with matched positions for every result
    pub fn match_list_indices<S: AsRef<str> + Sync>(&self, haystacks: &[S]) -> Vec<MatchIndices> {
        let mut matches: Vec<MatchIndices> = haystacks
            .iter()
            .enumerate()
            .filter_map(|(index, haystack)| self.match_indices(index, haystack.as_ref()))
            .collect();
        if self.config.sort {
            matches.sort_unstable();
        }
        matches
    }

    /// Match on a dedicated pool of `threads` threads (0 picks the rayon default)
    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    pub fn match_list_parallel<S: AsRef<str> + Sync>(
        &self,
        haystacks: &[S],
        threads: usize,
    ) -> crate::Result<Vec<Match>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        let mut matches = pool.install(|| self.match_parallel(haystacks));
        if self.config.sort {
            matches.sort_unstable();
        }

        debug!(
            haystacks = haystacks.len(),
            matched = matches.len(),
            threads = pool.current_num_threads(),
            "ranked haystacks in parallel"
        );
        Ok(matches)
    }

    /// Match against the list - parallel for large lists when enabled
    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    fn match_all<S: AsRef<str> + Sync>(&self, haystacks: &[S]) -> Vec<Match> {
        if haystacks.len() >= PARALLEL_THRESHOLD {
            self.match_parallel(haystacks)
        } else {
            self.match_sequential(haystacks)
        }
    }

    /// Sequential matching when the parallel feature is disabled
    #[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
    fn match_all<S: AsRef<str> + Sync>(&self, haystacks: &[S]) -> Vec<Match> {
        self.match_sequential(haystacks)
    }

    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    fn match_parallel<S: AsRef<str> + Sync>(&self, haystacks: &[S]) -> Vec<Match> {
        haystacks
            .par_iter()
            .enumerate()
            .filter_map(|(index, haystack)| self.match_haystack(index, haystack.as_ref()))
            .collect()
    }

    fn match_sequential<S: AsRef<str>>(&self, haystacks: &[S]) -> Vec<Match> {
        haystacks
            .iter()
            .enumerate()
            .filter_map(|(index, haystack)| self.match_haystack(index, haystack.as_ref()))
            .collect()
    }
}
