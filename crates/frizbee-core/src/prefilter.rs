//! Cheap rejection of haystacks before alignment
//!
//! Each string is reduced to a 128-bit signature with one bit per character
//! bucket. A haystack is rejected only when the needle uses a bucket the
//! haystack lacks more often than the typo budget can absorb, or when the
//! haystack is shorter than the needle. Bucket collisions can only make the
//! filter accept more, so it never rejects a haystack the aligner would admit.

/// Case fold a single character the same way the aligner compares characters
#[inline]
pub(crate) fn fold(c: char, case_sensitive: bool) -> char {
    if case_sensitive {
        c
    } else if c.is_ascii() {
        c.to_ascii_lowercase()
    } else {
        c.to_lowercase().next().unwrap_or(c)
    }
}

#[inline]
fn bit(c: char) -> u128 {
    1u128 << (c as u32 % 128)
}

/// Signature of the distinct (folded) characters in `s`, plus its length in characters
fn signature(s: &str, case_sensitive: bool) -> (u128, usize) {
    s.chars().fold((0u128, 0usize), |(sig, len), c| {
        (sig | bit(fold(c, case_sensitive)), len + 1)
    })
}

/// Returns false only when some needle character cannot occur in the haystack.
///
/// Order is not checked, so a `true` does not guarantee a match.
pub fn contains_chars(needle: &str, haystack: &str, case_sensitive: bool) -> bool {
    let (needle_sig, _) = signature(needle, case_sensitive);
    let (haystack_sig, _) = signature(haystack, case_sensitive);
    needle_sig & !haystack_sig == 0
}

/// Prefilter prepared once per needle and typo cap
#[derive(Debug, Clone)]
pub struct Prefilter {
    signature: u128,
    /// One bit per needle character, repeats included
    needle_bits: Vec<u128>,
    max_missing: usize,
    case_sensitive: bool,
}

impl Prefilter {
    /// `max_missing` is the number of needle characters that may be substituted
    pub fn new(needle: &str, max_missing: usize, case_sensitive: bool) -> Self {
        let needle_bits: Vec<u128> = needle
            .chars()
            .map(|c| bit(fold(c, case_sensitive)))
            .collect();
        let signature = needle_bits.iter().fold(0, |sig, b| sig | b);

        Self {
            signature,
            needle_bits,
            max_missing,
            case_sensitive,
        }
    }

    /// Could the haystack produce an admissible alignment
    pub fn matches(&self, haystack: &str) -> bool {
        if self.needle_bits.is_empty() {
            return true;
        }

        let (haystack_sig, haystack_len) = signature(haystack, self.case_sensitive);
        if haystack_len < self.needle_bits.len() {
            return false;
        }

        let missing = self.signature & !haystack_sig;
        if missing == 0 {
            return true;
        }
        if self.max_missing == 0 {
            return false;
        }

        let missing_count = self
            .needle_bits
            .iter()
            .filter(|&&b| b & missing != 0)
            .count();
        missing_count <= self.max_missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_chars() {
        assert!(contains_chars("user", "getUserData", false));
        assert!(contains_chars("hdr", "Header.tsx", false));
        assert!(!contains_chars("user", "README.md", false));
    }

    #[test]
    fn test_contains_chars_case_policy() {
        assert!(contains_chars("HDR", "header", false));
        assert!(!contains_chars("HDR", "header", true));
        assert!(contains_chars("hdr", "header", true));
    }

    #[test]
    fn test_order_is_ignored() {
        // Over-acceptance: the characters are present, just in the wrong order
        assert!(contains_chars("abc", "cba", false));
        assert!(Prefilter::new("abc", 0, false).matches("cba"));
    }

    #[test]
    fn test_empty_needle() {
        assert!(contains_chars("", "anything", false));
        assert!(Prefilter::new("", 0, false).matches(""));
    }

    #[test]
    fn test_shorter_haystack_rejected() {
        let prefilter = Prefilter::new("abcd", 3, false);
        assert!(!prefilter.matches("abc"));
        assert!(prefilter.matches("abcx"));
    }

    #[test]
    fn test_typo_budget_counts_occurrences() {
        // "z" appears twice in the needle, so both occurrences need a substitution
        let strict = Prefilter::new("zaz", 1, false);
        assert!(!strict.matches("xaxx"));

        let loose = Prefilter::new("zaz", 2, false);
        assert!(loose.matches("xaxx"));
    }

    #[test]
    fn test_unicode_folding() {
        assert!(contains_chars("ÉTÉ", "été", false));
        assert!(Prefilter::new("straße", 0, false).matches("STRAßE"));
    }
}
