//! Positional bonuses that depend only on the haystack
//!
//! The bonus for matching haystack position `j` is computed once per haystack
//! so the aligner can add it per cell without looking at neighbours:
//!
//! - `prefix_bonus` at position 0
//! - `offset_prefix_bonus` and `delimiter_bonus` when the previous character is a delimiter
//! - `capitalization_bonus` on a lowercase to uppercase transition
//!
//! The matching-case bonus depends on the needle character and is added by the aligner.

use crate::config::Scoring;

/// Delimiter lookup built from [`Scoring::delimiters`]
#[derive(Debug, Clone)]
pub struct Delimiters {
    ascii: [bool; 128],
    other: Vec<char>,
}

impl Delimiters {
    pub fn new(delimiters: &str) -> Self {
        let mut ascii = [false; 128];
        let mut other = Vec::new();
        for c in delimiters.chars() {
            if c.is_ascii() {
                ascii[c as usize] = true;
            } else if !other.contains(&c) {
                other.push(c);
            }
        }
        Self { ascii, other }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            self.ascii[c as usize]
        } else {
            self.other.contains(&c)
        }
    }
}

/// Fill `buf` with the bonus for matching each haystack position
pub fn positional_bonuses(
    haystack: &[char],
    scoring: &Scoring,
    delimiters: &Delimiters,
    buf: &mut Vec<i32>,
) {
    buf.clear();
    let first = haystack.first().map(|_| scoring.prefix_bonus as i32);
    buf.extend(first);
    buf.extend(haystack.windows(2).map(|w| {
        let (prev, cur) = (w[0], w[1]);
        let mut bonus = 0;
        if delimiters.contains(prev) {
            bonus += scoring.offset_prefix_bonus as i32 + scoring.delimiter_bonus as i32;
        }
        if prev.is_lowercase() && cur.is_uppercase() {
            bonus += scoring.capitalization_bonus as i32;
        }
        bonus
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bonuses(haystack: &str, scoring: &Scoring) -> Vec<i32> {
        let chars: Vec<char> = haystack.chars().collect();
        let delimiters = Delimiters::new(&scoring.delimiters);
        let mut buf = Vec::new();
        positional_bonuses(&chars, scoring, &delimiters, &mut buf);
        buf
    }

    #[test]
    fn test_empty_haystack() {
        assert!(bonuses("", &Scoring::default()).is_empty());
    }

    #[test]
    fn test_prefix_and_camel_case() {
        let scoring = Scoring::default();
        let b = bonuses("getUser", &scoring);
        assert_eq!(b.len(), 7);
        assert_eq!(b[0], scoring.prefix_bonus as i32);
        assert_eq!(b[3], scoring.capitalization_bonus as i32);
        assert_eq!(&b[1..3], &[0, 0]);
        assert_eq!(&b[4..], &[0, 0, 0]);
    }

    #[test]
    fn test_delimiter_segment_start() {
        let scoring = Scoring::default();
        let b = bonuses("src/main.rs", &scoring);
        let segment = scoring.offset_prefix_bonus as i32 + scoring.delimiter_bonus as i32;
        assert_eq!(b[4], segment); // "m" after "/"
        assert_eq!(b[9], segment); // "r" after "."
        assert_eq!(b[5], 0);
    }

    #[test]
    fn test_uppercase_run_has_no_capitalization_bonus() {
        let b = bonuses("README", &Scoring::default());
        assert_eq!(&b[1..], &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_custom_delimiters() {
        let scoring = Scoring {
            delimiters: "$→".to_string(),
            ..Default::default()
        };
        let b = bonuses("a_b$c→d", &scoring);
        let segment = scoring.offset_prefix_bonus as i32 + scoring.delimiter_bonus as i32;
        assert_eq!(b[2], 0); // "_" is not a delimiter here
        assert_eq!(b[4], segment);
        assert_eq!(b[6], segment);
    }
}
