//! Result types produced by the matcher
//!
//! Ranked results order by a sort key of descending score, then ascending
//! list index. Equality follows the same key, so two results compare equal
//! exactly when neither ranks above the other.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

/// A haystack admitted by the matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub score: u16,
    /// Index of the match in the caller's list of haystacks
    pub index: u32,
    /// Matched the needle exactly (e.g. "foo" on "foo")
    pub exact: bool,
}

impl Match {
    /// Trivial match used for an empty needle
    pub fn from_index(index: usize) -> Self {
        Self {
            score: 0,
            index: index as u32,
            exact: false,
        }
    }

    fn sort_key(&self) -> (Reverse<u16>, u32) {
        (Reverse(self.score), self.index)
    }
}

/// A match together with the haystack characters the needle aligned to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchIndices {
    pub score: u16,
    /// Index of the match in the caller's list of haystacks
    pub index: u32,
    /// Matched the needle exactly (e.g. "foo" on "foo")
    pub exact: bool,
    /// Character positions in the haystack, one per needle character, in increasing order
    pub indices: Vec<usize>,
}

impl MatchIndices {
    pub fn from_index(index: usize) -> Self {
        Self {
            score: 0,
            index: index as u32,
            exact: false,
            indices: vec![],
        }
    }

    fn sort_key(&self) -> (Reverse<u16>, u32) {
        (Reverse(self.score), self.index)
    }
}

macro_rules! order_by_sort_key {
    ($($ty:ty),*) => {$(
        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.sort_key().cmp(&other.sort_key())
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.sort_key() == other.sort_key()
            }
        }

        impl Eq for $ty {}
    )*};
}

order_by_sort_key!(Match, MatchIndices);

/// One directed pair from [`compare_all`](crate::compare_all)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub needle: String,
    pub haystack: String,
    pub needle_index: u32,
    pub haystack_index: u32,
    pub score: u16,
    pub exact: bool,
}

/// Descending score, then ascending (needle, haystack) index pair
impl Ord for ComparisonResult {
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |r: &Self| (Reverse(r.score), r.needle_index, r.haystack_index);
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for ComparisonResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(score: u16, index: u32) -> Match {
        Match {
            score,
            index,
            exact: false,
        }
    }

    #[test]
    fn test_match_order() {
        let mut matches = vec![m(10, 3), m(20, 2), m(10, 1), m(5, 0)];
        matches.sort();
        let order: Vec<u32> = matches.iter().map(|m| m.index).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_comparison_order() {
        let pair = |score, needle_index, haystack_index| ComparisonResult {
            needle: String::new(),
            haystack: String::new(),
            needle_index,
            haystack_index,
            score,
            exact: false,
        };
        let mut results = vec![pair(5, 1, 0), pair(5, 0, 2), pair(9, 2, 1), pair(5, 0, 1)];
        results.sort();
        let order: Vec<(u32, u32)> = results
            .iter()
            .map(|r| (r.needle_index, r.haystack_index))
            .collect();
        assert_eq!(order, vec![(2, 1), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_equality_ignores_exact_and_indices() {
        let a = MatchIndices {
            score: 42,
            index: 7,
            exact: true,
            indices: vec![0, 1],
        };
        let b = MatchIndices {
            exact: false,
            indices: vec![3, 4],
            ..a.clone()
        };
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert!(m(42, 8) > m(42, 7));
        assert!(m(43, 8) < m(42, 7));
    }
}
