//! Recover matched haystack positions from a full alignment table

use crate::smith_waterman::Alignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Match,
    Gap,
}

/// Walk the table back from the terminal cell and collect the haystack
/// position of every needle character, in increasing order.
///
/// Where both predecessors give the same score the match state wins, which
/// keeps matched characters contiguous.
pub fn trace(alignment: &Alignment) -> Vec<usize> {
    let width = alignment.width;
    let (mut layer, mut column) = alignment.end;
    let mut row = alignment.needle.len();
    let mut state = State::Match;
    let mut positions = Vec::with_capacity(row);

    while row > 0 {
        match state {
            State::Match => {
                positions.push(column - 1);
                let from = if alignment.needle[row - 1] == alignment.haystack[column - 1] {
                    alignment.layers.before_match(layer)
                } else {
                    alignment.layers.before_substitution(layer)
                };
                row -= 1;
                column -= 1;
                if row == 0 {
                    break;
                }

                // Highest predecessor layer wins ties
                let cells = &alignment.rows[row];
                let Some(prev) = from.max_by_key(|&l| cells.best(l * width + column)) else {
                    break;
                };
                layer = prev;
                let cell = layer * width + column;
                state = if cells.m[cell] >= cells.g[cell] {
                    State::Match
                } else {
                    State::Gap
                };
            }
            State::Gap => {
                let cells = &alignment.rows[row];
                let left = layer * width + column - 1;
                let from_match = cells.m[left] - alignment.gap_open;
                let from_gap = cells.g[left] - alignment.gap_extend;
                column -= 1;
                state = if from_match >= from_gap {
                    State::Match
                } else {
                    State::Gap
                };
            }
        }
    }

    positions.reverse();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::smith_waterman::SmithWaterman;
    use pretty_assertions::assert_eq;

    fn indices(needle: &str, haystack: &str, config: &Config) -> Option<Vec<usize>> {
        let sw = SmithWaterman::new(needle, config);
        sw.align(&sw.prepare(haystack)).map(|a| trace(&a))
    }

    #[test]
    fn test_contiguous() {
        assert_eq!(
            indices("abc", "abc", &Config::default()),
            Some(vec![0, 1, 2])
        );
    }

    #[test]
    fn test_gaps_are_skipped() {
        assert_eq!(
            indices("hdr", "Header.tsx", &Config::default()),
            Some(vec![0, 3, 5])
        );
    }

    #[test]
    fn test_camel_case_word() {
        assert_eq!(
            indices("user", "getUserData", &Config::default()),
            Some(vec![3, 4, 5, 6])
        );
    }

    #[test]
    fn test_segment_start_outweighs_short_gap() {
        // "b" at 1 has no bonus, "b" after "_" has the segment bonuses
        assert_eq!(
            indices("fb", "fbx_bar", &Config::default()),
            Some(vec![0, 4])
        );
        assert_eq!(indices("b", "abc_b", &Config::default()), Some(vec![4]));
    }

    #[test]
    fn test_substitution_consumes_position() {
        let config = Config {
            max_typos: Some(1),
            ..Default::default()
        };
        let sw = SmithWaterman::new("abc", &config);
        let alignment = sw.align(&sw.prepare("abx")).unwrap();
        assert_eq!(alignment.end, (1, 3));
        assert_eq!(trace(&alignment), vec![0, 1, 2]);
    }

    #[test]
    fn test_substitution_after_gap() {
        let config = Config {
            max_typos: None,
            ..Default::default()
        };
        let positions = indices("xbc", "a_bc", &config).unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(&positions[1..], &[2, 3]);
        assert!(positions[0] < 2);
    }

    #[test]
    fn test_two_layer_trace_crosses_layers() {
        let config = Config {
            max_typos: None,
            ..Default::default()
        };
        let sw = SmithWaterman::new("xyc", &config);
        let alignment = sw.align(&sw.prepare("abc")).unwrap();
        // Ends in the matched layer, starts with two substitutions in layer 0
        assert_eq!(alignment.end, (1, 3));
        assert_eq!(trace(&alignment), vec![0, 1, 2]);
    }
}
