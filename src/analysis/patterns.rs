//! Repeating pass patterns
//!
//! Counts fixed-length windows of the token sequence that occur more than
//! once. A window may hold at most one failed pass, and only as its last
//! token.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::{PassNetError, Result, Token};

/// Which start offsets the window scan visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowBound {
    /// Every start in `0..=len - L`
    #[default]
    Inclusive,
    /// Starts in `0..len - L`, skipping the final window of each length
    Exclusive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub min_len: usize,
    pub max_len: usize,
    /// Patterns kept per length after sorting by count
    pub max_per_length: usize,
    #[serde(default)]
    pub window_bound: WindowBound,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            min_len: 3,
            max_len: 10,
            max_per_length: 6,
            window_bound: WindowBound::Inclusive,
        }
    }
}

impl PatternConfig {
    pub fn with_lengths(min_len: usize, max_len: usize) -> Self {
        PatternConfig {
            min_len,
            max_len,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_len == 0 {
            return Err(PassNetError::Config(
                "patterns.min_len must be at least 1".to_string(),
            ));
        }
        if self.max_len < self.min_len {
            return Err(PassNetError::Config(format!(
                "patterns.max_len ({}) is below min_len ({})",
                self.max_len, self.min_len
            )));
        }
        if self.max_per_length == 0 {
            return Err(PassNetError::Config(
                "patterns.max_per_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A repeated window and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCount {
    pub tokens: Vec<Token>,
    pub count: usize,
}

/// Repeated windows keyed by window length
pub type Patterns = BTreeMap<usize, Vec<PatternCount>>;

/// No failed pass, or exactly one in the last position
pub fn is_admissible(window: &[Token]) -> bool {
    match window.iter().position(|&t| t == Token::BadPass) {
        None => true,
        Some(i) => i + 1 == window.len(),
    }
}

/// Occurrence counts of admissible windows, in order of first occurrence
fn count_windows(seq: &[Token], length: usize, bound: WindowBound) -> Vec<(&[Token], usize)> {
    let starts = match bound {
        WindowBound::Inclusive => seq.len() + 1 - length,
        WindowBound::Exclusive => seq.len() - length,
    };

    let mut index: HashMap<&[Token], usize> = HashMap::new();
    let mut counts: Vec<(&[Token], usize)> = Vec::new();

    for window in seq.windows(length).take(starts) {
        if !is_admissible(window) {
            continue;
        }
        match index.get(window) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(window, counts.len());
                counts.push((window, 1));
            }
        }
    }

    counts
}

/// Find windows that repeat, for each length from `min_len` to `max_len`
///
/// Scanning stops at the first length where nothing repeats, since no
/// longer window can repeat either.
pub fn find_patterns(seq: &[Token], config: &PatternConfig) -> Patterns {
    let mut result = Patterns::new();

    for length in config.min_len.max(1)..=config.max_len {
        if seq.len() < length {
            break;
        }

        let counts = count_windows(seq, length, config.window_bound);
        let max_count = counts.iter().map(|&(_, c)| c).max().unwrap_or(0);
        if max_count <= 1 {
            log::debug!("No repeated windows of length {}, stopping", length);
            break;
        }

        let mut repeated: Vec<PatternCount> = counts
            .into_iter()
            .filter(|&(_, c)| c >= 2)
            .map(|(window, count)| PatternCount {
                tokens: window.to_vec(),
                count,
            })
            .collect();
        repeated.sort_by(|a, b| b.count.cmp(&a.count));
        repeated.truncate(config.max_per_length);

        result.insert(length, repeated);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JerseyNumber;

    fn p(n: i64) -> Token {
        Token::Player(JerseyNumber::new(n).unwrap())
    }

    #[test]
    fn test_alternating_pair() {
        let seq = vec![p(1), p(2), p(1), p(2), p(1), p(2)];
        let result = find_patterns(&seq, &PatternConfig::with_lengths(2, 2));

        assert_eq!(result.len(), 1);
        assert_eq!(
            result[&2],
            vec![
                PatternCount { tokens: vec![p(1), p(2)], count: 3 },
                PatternCount { tokens: vec![p(2), p(1)], count: 2 },
            ]
        );
    }

    #[test]
    fn test_exclusive_bound_skips_last_window() {
        let seq = vec![p(1), p(2), p(1), p(2), p(1), p(2)];
        let config = PatternConfig {
            window_bound: WindowBound::Exclusive,
            ..PatternConfig::with_lengths(2, 2)
        };
        let result = find_patterns(&seq, &config);

        assert_eq!(
            result[&2],
            vec![
                PatternCount { tokens: vec![p(1), p(2)], count: 2 },
                PatternCount { tokens: vec![p(2), p(1)], count: 2 },
            ]
        );
    }

    #[test]
    fn test_admissibility() {
        assert!(is_admissible(&[p(1), p(2), p(3)]));
        assert!(is_admissible(&[p(1), p(2), Token::BadPass]));
        assert!(!is_admissible(&[p(1), Token::BadPass, p(3)]));
        assert!(!is_admissible(&[Token::BadPass, p(2), Token::BadPass]));
    }

    #[test]
    fn test_trailing_bad_pass_counts() {
        let seq = vec![
            p(4), p(8), Token::BadPass,
            p(4), p(8), Token::BadPass,
            p(3),
        ];
        let result = find_patterns(&seq, &PatternConfig::with_lengths(3, 3));

        assert_eq!(
            result[&3][0],
            PatternCount { tokens: vec![p(4), p(8), Token::BadPass], count: 2 }
        );
        for pattern in &result[&3] {
            assert!(is_admissible(&pattern.tokens));
        }
    }

    #[test]
    fn test_stops_when_nothing_repeats() {
        // Length 2 repeats, length 3 does not
        let seq = vec![p(1), p(2), p(5), p(1), p(2), p(6)];
        let result = find_patterns(&seq, &PatternConfig::with_lengths(2, 5));

        assert_eq!(result.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(result[&2], vec![PatternCount { tokens: vec![p(1), p(2)], count: 2 }]);
    }

    #[test]
    fn test_short_sequence_is_empty() {
        let seq = vec![p(1), p(1)];
        assert!(find_patterns(&seq, &PatternConfig::default()).is_empty());
        assert!(find_patterns(&[], &PatternConfig::default()).is_empty());
    }

    #[test]
    fn test_caps_entries_per_length() {
        // Eight distinct pairs, each appearing twice
        let mut seq = Vec::new();
        for _ in 0..2 {
            for n in 0..8 {
                seq.push(p(n * 2));
                seq.push(p(n * 2 + 1));
                seq.push(Token::BadPass);
                seq.push(Token::BadPass);
            }
        }
        let result = find_patterns(&seq, &PatternConfig::with_lengths(2, 2));
        assert_eq!(result[&2].len(), 6);
        assert!(result[&2].iter().all(|pc| pc.count >= 2));
    }

    #[test]
    fn test_sorted_by_count_with_ties_in_first_occurrence_order() {
        let seq = vec![
            p(7), p(8), p(1), p(2), p(1), p(2), p(7), p(8), p(1), p(2),
        ];
        let result = find_patterns(&seq, &PatternConfig::with_lengths(2, 2));
        let counts: Vec<usize> = result[&2].iter().map(|pc| pc.count).collect();

        assert_eq!(result[&2][0].tokens, vec![p(1), p(2)]);
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_validate() {
        assert!(PatternConfig::default().validate().is_ok());
        assert!(PatternConfig::with_lengths(0, 3).validate().is_err());
        assert!(PatternConfig::with_lengths(5, 3).validate().is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn token() -> impl Strategy<Value = Token> {
            prop_oneof![
                6 => (0i64..5).prop_map(|n| Token::Player(JerseyNumber::new(n).unwrap())),
                2 => Just(Token::BadPass),
                1 => Just(Token::Shot),
                1 => Just(Token::Goal),
            ]
        }

        proptest! {
            /// Every reported pattern is admissible, repeats, and is counted exactly
            #[test]
            fn prop_patterns_are_repeated_admissible_windows(
                seq in prop::collection::vec(token(), 0..60)
            ) {
                let config = PatternConfig::with_lengths(2, 6);
                for (&length, found) in &find_patterns(&seq, &config) {
                    prop_assert!(!found.is_empty());
                    prop_assert!(found.len() <= config.max_per_length);
                    for pattern in found {
                        prop_assert_eq!(pattern.tokens.len(), length);
                        prop_assert!(is_admissible(&pattern.tokens));
                        prop_assert!(pattern.count >= 2);
                        let naive = seq.windows(length).filter(|w| *w == &pattern.tokens[..]).count();
                        prop_assert_eq!(pattern.count, naive);
                    }
                    prop_assert!(found.windows(2).all(|w| w[0].count >= w[1].count));
                }
            }

            /// Reported lengths are a gap-free run starting at min_len
            #[test]
            fn prop_lengths_are_contiguous(seq in prop::collection::vec(token(), 0..60)) {
                let config = PatternConfig::with_lengths(2, 8);
                let lengths: Vec<usize> = find_patterns(&seq, &config).keys().copied().collect();
                let expected: Vec<usize> = (2..2 + lengths.len()).collect();
                prop_assert_eq!(lengths, expected);
            }
        }
    }
}
