//! Smith-Waterman alignment with affine gaps and a typo budget
//!
//! Every needle character is aligned to exactly one haystack character, in
//! order. The alignment may start and end anywhere in the haystack; skipped
//! haystack characters between aligned ones form gaps, the first skipped
//! character costs `gap_open_penalty` and every further one
//! `gap_extend_penalty`.
//!
//! Each cell keeps two states:
//!
//! - `M(i, j)`: needle char `i` aligned to haystack char `j`, either a true
//!   match (`match_score` plus positional bonuses) or a substitution
//!   (`-mismatch_penalty`, one typo)
//! - `G(i, j)`: haystack char `j` skipped after needle prefix `i` was aligned
//!
//! Typos are tracked as an extra layer dimension. The cap is the configured
//! budget clamped to `needle.len() - 1`, so an alignment always contains at
//! least one true match. Below that clamp, layer `t = 0..=cap` holds
//! alignments that used exactly `t` substitutions. At the clamp the count
//! never rejects anything besides the all-substitution alignment, so two
//! layers suffice: no true match yet, and at least one.
//!
//! Two entry points share one row kernel: [`SmithWaterman::score`] keeps only
//! two rows, [`SmithWaterman::align`] keeps the full table for
//! [`backtrace`](crate::backtrace).

use std::ops::Range;

use crate::bonus::{positional_bonuses, Delimiters};
use crate::config::{Config, Scoring};
use crate::prefilter::fold;

/// Score of a cell no alignment can reach
pub(crate) const UNREACHABLE: i32 = i32::MIN / 4;

/// Effective number of substitutions an alignment of `needle_len` chars may use
pub fn typo_cap(max_typos: Option<u16>, needle_len: usize) -> usize {
    let budget = max_typos.map(usize::from).unwrap_or(usize::MAX);
    budget.min(needle_len.saturating_sub(1))
}

/// Publish an internal score as the public `u16` score
#[inline]
pub fn clamp_score(score: i32) -> u16 {
    score.clamp(0, u16::MAX as i32) as u16
}

/// How the DP layers track substitutions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layers {
    /// Layer `t` holds alignments with exactly `t` substitutions, `t = 0..=cap`
    Counted(usize),
    /// Layer 0 holds alignments made only of substitutions so far, layer 1
    /// those with at least one true match
    Matched,
}

impl Layers {
    fn new(cap: usize, needle_len: usize) -> Self {
        if cap > 0 && cap + 1 == needle_len {
            Layers::Matched
        } else {
            Layers::Counted(cap)
        }
    }

    pub(crate) fn count(self) -> usize {
        match self {
            Layers::Counted(cap) => cap + 1,
            Layers::Matched => 2,
        }
    }

    /// Layers a complete alignment may end in
    fn terminal(self) -> Range<usize> {
        match self {
            Layers::Counted(cap) => 0..cap + 1,
            Layers::Matched => 1..2,
        }
    }

    /// Layers of the previous row a true match into layer `t` extends
    pub(crate) fn before_match(self, t: usize) -> Range<usize> {
        match self {
            Layers::Counted(_) => t..t + 1,
            Layers::Matched if t == 1 => 0..2,
            Layers::Matched => 0..0,
        }
    }

    /// Layers of the previous row a substitution into layer `t` extends
    pub(crate) fn before_substitution(self, t: usize) -> Range<usize> {
        match self {
            Layers::Counted(_) => t.saturating_sub(1)..t,
            Layers::Matched => t..t + 1,
        }
    }
}

/// Haystack decoded into characters with its bonus table
#[derive(Debug, Clone)]
pub struct Haystack {
    pub(crate) chars: Vec<char>,
    pub(crate) folded: Vec<char>,
    pub(crate) bonuses: Vec<i32>,
}

impl Haystack {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// One DP row across all typo layers, `layers * width` cells per state
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub(crate) m: Vec<i32>,
    pub(crate) g: Vec<i32>,
}

impl Row {
    fn unreachable(cells: usize) -> Self {
        Self {
            m: vec![UNREACHABLE; cells],
            g: vec![UNREACHABLE; cells],
        }
    }

    /// Row 0: the needle may start before any haystack position at no cost
    fn origin(layers: usize, width: usize) -> Self {
        let mut row = Self::unreachable(layers * width);
        row.m[..width].fill(0);
        row
    }

    #[inline]
    pub(crate) fn best(&self, cell: usize) -> i32 {
        self.m[cell].max(self.g[cell])
    }

    /// Best score at column `j` over `layers`
    #[inline]
    fn best_of(&self, layers: Range<usize>, width: usize, j: usize) -> i32 {
        layers
            .map(|l| self.best(l * width + j))
            .max()
            .unwrap_or(UNREACHABLE)
    }
}

/// Best terminal cell of a score-only pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    /// Total score, exact match bonus included
    pub score: i32,
    pub exact: bool,
}

/// Full DP table of one needle/haystack pair, ready for backtrace
#[derive(Debug, Clone)]
pub struct Alignment {
    pub(crate) rows: Vec<Row>,
    pub(crate) width: usize,
    pub(crate) layers: Layers,
    pub(crate) needle: Vec<char>,
    pub(crate) haystack: Vec<char>,
    /// Terminal cell: typo layer and haystack column (1-based)
    pub(crate) end: (usize, usize),
    pub(crate) gap_open: i32,
    pub(crate) gap_extend: i32,
    /// Total score, exact match bonus included
    pub score: i32,
    pub exact: bool,
}

/// Aligner prepared for one needle and one config
#[derive(Debug, Clone)]
pub struct SmithWaterman<'a> {
    scoring: &'a Scoring,
    delimiters: Delimiters,
    case_sensitive: bool,
    needle: Vec<char>,
    needle_folded: Vec<char>,
    cap: usize,
    layers: Layers,
}

impl<'a> SmithWaterman<'a> {
    pub fn new(needle: &str, config: &'a Config) -> Self {
        let needle: Vec<char> = needle.chars().collect();
        let needle_folded = needle
            .iter()
            .map(|&c| fold(c, config.case_sensitive))
            .collect();
        let cap = typo_cap(config.max_typos, needle.len());
        let layers = Layers::new(cap, needle.len());

        Self {
            scoring: &config.scoring,
            delimiters: Delimiters::new(&config.scoring.delimiters),
            case_sensitive: config.case_sensitive,
            needle,
            needle_folded,
            cap,
            layers,
        }
    }

    pub fn needle_len(&self) -> usize {
        self.needle.len()
    }

    /// Number of substitutions this aligner may spend
    pub fn typo_cap(&self) -> usize {
        self.cap
    }

    /// Decode a haystack and compute its bonus table
    pub fn prepare(&self, haystack: &str) -> Haystack {
        let chars: Vec<char> = haystack.chars().collect();
        let folded = chars.iter().map(|&c| fold(c, self.case_sensitive)).collect();
        let mut bonuses = Vec::with_capacity(chars.len());
        positional_bonuses(&chars, self.scoring, &self.delimiters, &mut bonuses);

        Haystack {
            chars,
            folded,
            bonuses,
        }
    }

    /// Full-string equality under the active case policy
    pub fn is_exact(&self, haystack: &Haystack) -> bool {
        self.needle_folded == haystack.folded
    }

    fn can_align(&self, haystack: &Haystack) -> bool {
        !self.needle.is_empty() && haystack.len() >= self.needle.len()
    }

    /// Best alignment score using two rolling rows
    pub fn score(&self, haystack: &Haystack) -> Option<Scored> {
        if !self.can_align(haystack) {
            return None;
        }

        let width = haystack.len() + 1;
        let cells = self.layers.count() * width;
        let mut prev = Row::origin(self.layers.count(), width);
        let mut cur = Row::unreachable(cells);
        for i in 1..=self.needle.len() {
            self.fill_row(i, haystack, &prev, &mut cur);
            std::mem::swap(&mut prev, &mut cur);
        }

        let (_, raw) = self.best_end(&prev, width)?;
        let exact = self.is_exact(haystack);
        Some(Scored {
            score: raw + self.exact_bonus(exact),
            exact,
        })
    }

    /// Best alignment with the full table kept for backtrace
    pub fn align(&self, haystack: &Haystack) -> Option<Alignment> {
        if !self.can_align(haystack) {
            return None;
        }

        let width = haystack.len() + 1;
        let mut rows = Vec::with_capacity(self.needle.len() + 1);
        rows.push(Row::origin(self.layers.count(), width));
        for i in 1..=self.needle.len() {
            let mut cur = Row::unreachable(self.layers.count() * width);
            self.fill_row(i, haystack, &rows[i - 1], &mut cur);
            rows.push(cur);
        }

        let (end, raw) = self.best_end(&rows[self.needle.len()], width)?;
        let exact = self.is_exact(haystack);
        Some(Alignment {
            rows,
            width,
            layers: self.layers,
            needle: self.needle_folded.clone(),
            haystack: haystack.folded.clone(),
            end,
            gap_open: self.scoring.gap_open_penalty as i32,
            gap_extend: self.scoring.gap_extend_penalty as i32,
            score: raw + self.exact_bonus(exact),
            exact,
        })
    }

    fn exact_bonus(&self, exact: bool) -> i32 {
        if exact {
            self.scoring.exact_match_bonus as i32
        } else {
            0
        }
    }

    /// Highest match cell of the last row. Ties keep the lowest layer, then the
    /// leftmost end.
    fn best_end(&self, last: &Row, width: usize) -> Option<((usize, usize), i32)> {
        let mut best: Option<((usize, usize), i32)> = None;
        for t in self.layers.terminal() {
            for j in 1..width {
                let score = last.m[t * width + j];
                if score == UNREACHABLE {
                    continue;
                }
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some(((t, j), score));
                }
            }
        }
        best
    }

    /// Compute row `i` (needle char `i - 1`) for every typo layer from row `i - 1`
    fn fill_row(&self, i: usize, haystack: &Haystack, prev: &Row, cur: &mut Row) {
        let width = haystack.len() + 1;
        let needle_char = self.needle[i - 1];
        let needle_folded = self.needle_folded[i - 1];

        let match_score = self.scoring.match_score as i32;
        let mismatch = self.scoring.mismatch_penalty as i32;
        let gap_open = self.scoring.gap_open_penalty as i32;
        let gap_extend = self.scoring.gap_extend_penalty as i32;
        let matching_case = self.scoring.matching_case_bonus as i32;

        for t in 0..self.layers.count() {
            let base = t * width;
            let match_from = self.layers.before_match(t);
            let substitute_from = self.layers.before_substitution(t);
            cur.m[base] = UNREACHABLE;
            cur.g[base] = UNREACHABLE;

            for j in 1..width {
                let h = j - 1;
                let m = if haystack.folded[h] == needle_folded {
                    let diag = prev.best_of(match_from.clone(), width, j - 1);
                    if diag == UNREACHABLE {
                        UNREACHABLE
                    } else {
                        let case_bonus = if haystack.chars[h] == needle_char {
                            matching_case
                        } else {
                            0
                        };
                        diag + match_score + haystack.bonuses[h] + case_bonus
                    }
                } else {
                    let diag = prev.best_of(substitute_from.clone(), width, j - 1);
                    if diag == UNREACHABLE {
                        UNREACHABLE
                    } else {
                        diag - mismatch
                    }
                };

                let g = (cur.g[base + j - 1] - gap_extend)
                    .max(cur.m[base + j - 1] - gap_open)
                    .max(UNREACHABLE);

                cur.m[base + j] = m;
                cur.g[base + j] = g;
            }
        }
    }
}
