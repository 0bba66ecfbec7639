//! Tests for `match_indices` and the backtrace it relies on

use frizbee_core::{match_indices, Config, MatchIndices};
use pretty_assertions::assert_eq;

fn explain(needle: &str, haystack: &str, config: &Config) -> Option<MatchIndices> {
    match_indices(needle, haystack, config).unwrap()
}

/// Positions must be strictly increasing, in bounds, one per needle char
fn assert_valid(needle: &str, haystack: &str, result: &MatchIndices) {
    let haystack_len = haystack.chars().count();
    assert_eq!(result.indices.len(), needle.chars().count());
    assert!(result.indices.iter().all(|&i| i < haystack_len));
    assert!(result.indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_header_scenario() {
    for max_typos in [Some(0), Some(1), Some(5), None] {
        let config = Config {
            max_typos,
            ..Default::default()
        };
        let result = explain("hdr", "Header.tsx", &config).unwrap();
        assert_eq!(result.indices, vec![0, 3, 5]);
        assert!(!result.exact);
    }
}

#[test]
fn test_exactness() {
    for s in ["a", "foo", "Header.tsx", "src/main.rs", "aaaa", "getUserData", "日本語"] {
        let result = explain(s, s, &Config::default()).unwrap();
        assert!(result.exact, "{}", s);
        let expected: Vec<usize> = (0..s.chars().count()).collect();
        assert_eq!(result.indices, expected, "{}", s);
    }
}

#[test]
fn test_exact_only_for_full_equality() {
    let result = explain("foo", "foobar", &Config::default()).unwrap();
    assert!(!result.exact);
    assert_eq!(result.indices, vec![0, 1, 2]);

    let result = explain("foo", "FOO", &Config::default()).unwrap();
    assert!(result.exact);
}

#[test]
fn test_no_match_is_none() {
    assert!(explain("user", "README.md", &Config::default()).is_none());
    assert!(explain("abc", "", &Config::default()).is_none());
    assert!(explain("abcd", "abc", &Config::default()).is_none());
}

#[test]
fn test_empty_needle() {
    let result = explain("", "anything", &Config::default()).unwrap();
    assert_eq!(result.score, 0);
    assert!(!result.exact);
    assert!(result.indices.is_empty());

    let result = explain("", "", &Config::default()).unwrap();
    assert!(result.indices.is_empty());
}

#[test]
fn test_char_positions_not_bytes() {
    let result = explain("ab", "éa_b", &Config::default()).unwrap();
    assert_eq!(result.indices, vec![1, 3]);
}

#[test]
fn test_typo_positions() {
    let config = Config {
        max_typos: Some(1),
        ..Default::default()
    };
    let result = explain("fxo", "foo", &config).unwrap();
    assert_eq!(result.indices, vec![0, 1, 2]);
    assert!(!result.exact);
    assert_valid("fxo", "foo", &result);

    assert!(explain("fxx", "foo", &config).is_none());
}

#[test]
fn test_indices_validity() {
    let config = Config {
        max_typos: None,
        ..Default::default()
    };
    let haystacks = [
        "src/components/Header.tsx",
        "updateUserProfile",
        "https://api.example.com/v2",
        "a_b_c_d_e_f",
        "mississippi",
    ];
    for needle in ["hdr", "usr", "api", "abcf", "ssi", "pxe", "ippi"] {
        for haystack in haystacks {
            if let Some(result) = explain(needle, haystack, &config) {
                assert_valid(needle, haystack, &result);
            }
        }
    }
}

#[test]
fn test_case_sensitive_policy() {
    let config = Config::default().with_case_sensitive(true);
    assert!(explain("hdr", "Header.tsx", &config).is_none());
    let result = explain("Hdr", "Header.tsx", &config).unwrap();
    assert_eq!(result.indices, vec![0, 3, 5]);
}

#[test]
fn test_unlimited_budget_equals_needle_bound() {
    let pairs = [
        ("hedaer", "src/components/Header.tsx"),
        ("usre", "updateUserProfile"),
        ("xbc", "a_bc"),
        ("kitten", "sitting"),
        ("zq", "q_z"),
    ];
    for (needle, haystack) in pairs {
        let n = needle.chars().count() as u16;
        let unlimited = explain(needle, haystack, &Config {
            max_typos: None,
            ..Default::default()
        });
        for bound in [n - 1, n + 3] {
            let bounded = explain(needle, haystack, &Config {
                max_typos: Some(bound),
                ..Default::default()
            });
            let key = |r: &Option<MatchIndices>| r.as_ref().map(|m| (m.score, m.indices.clone()));
            assert_eq!(key(&unlimited), key(&bounded), "{} on {} at {}", needle, haystack, bound);
        }
    }
}

#[test]
fn test_unlimited_budget_on_long_inputs() {
    let needle = "abc".repeat(60);
    let haystack = "xabcy".repeat(400);
    let config = Config {
        max_typos: None,
        ..Default::default()
    };
    let result = explain(&needle, &haystack, &config).unwrap();
    assert_valid(&needle, &haystack, &result);

    let substituted = needle.replacen("abc", "abz", 3);
    let result = explain(&substituted, &haystack, &config).unwrap();
    assert_valid(&substituted, &haystack, &result);
}
