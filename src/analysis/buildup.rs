//! Passing runs that end in a shot
//!
//! A buildup starts right after the most recent failed pass and runs up to
//! and including the next shot or goal.

use crate::Token;

/// Extract the buildups of `seq` that are longer than `min_length`
///
/// Each failed pass anchors at most one buildup: the anchor is cleared once
/// a shot consumes it, so a second shot without a new failed pass in
/// between yields nothing.
pub fn extract_shot_buildups(seq: &[Token], min_length: usize) -> Vec<Vec<Token>> {
    let mut buildups = Vec::new();
    let mut anchor: Option<usize> = None;

    for (i, &token) in seq.iter().enumerate() {
        match token {
            Token::BadPass => anchor = Some(i),
            Token::Shot | Token::Goal => {
                if let Some(start) = anchor.take() {
                    let run = &seq[start + 1..=i];
                    if run.len() > min_length {
                        buildups.push(run.to_vec());
                    }
                }
            }
            Token::Player(_) => {}
        }
    }

    buildups
}

/// Buildups that finished with a goal
pub fn scoring_buildups(buildups: &[Vec<Token>]) -> impl Iterator<Item = &Vec<Token>> {
    buildups
        .iter()
        .filter(|b| b.last() == Some(&Token::Goal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JerseyNumber;

    fn p(n: i64) -> Token {
        Token::Player(JerseyNumber::new(n).unwrap())
    }

    #[test]
    fn test_simple_buildup() {
        let seq = vec![p(5), Token::BadPass, p(3), Token::Shot];
        assert_eq!(extract_shot_buildups(&seq, 1), vec![vec![p(3), Token::Shot]]);
    }

    #[test]
    fn test_too_short_is_dropped() {
        let seq = vec![Token::BadPass, p(3), p(4), Token::Goal];
        assert!(extract_shot_buildups(&seq, 3).is_empty());
        assert_eq!(extract_shot_buildups(&seq, 2).len(), 1);
    }

    #[test]
    fn test_anchor_at_start_of_sequence() {
        let seq = vec![Token::BadPass, p(1), p(2), p(3), Token::Goal];
        assert_eq!(
            extract_shot_buildups(&seq, 3),
            vec![vec![p(1), p(2), p(3), Token::Goal]]
        );
    }

    #[test]
    fn test_shot_without_anchor() {
        let seq = vec![p(1), p(2), p(3), p(4), Token::Shot];
        assert!(extract_shot_buildups(&seq, 0).is_empty());
    }

    #[test]
    fn test_most_recent_bad_pass_anchors() {
        let seq = vec![
            Token::BadPass, p(1), p(2),
            Token::BadPass, p(3), p(4), Token::Shot,
        ];
        assert_eq!(
            extract_shot_buildups(&seq, 1),
            vec![vec![p(3), p(4), Token::Shot]]
        );
    }

    #[test]
    fn test_anchor_not_reused() {
        let seq = vec![
            Token::BadPass, p(1), p(2), Token::Shot,
            p(3), p(4), p(5), Token::Goal,
        ];
        let buildups = extract_shot_buildups(&seq, 1);
        assert_eq!(buildups, vec![vec![p(1), p(2), Token::Shot]]);
        assert_eq!(scoring_buildups(&buildups).count(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn token() -> impl Strategy<Value = Token> {
            prop_oneof![
                6 => (0i64..11).prop_map(|n| Token::Player(JerseyNumber::new(n).unwrap())),
                2 => Just(Token::BadPass),
                1 => Just(Token::Shot),
                1 => Just(Token::Goal),
            ]
        }

        proptest! {
            #[test]
            fn prop_buildups_are_clean_runs_to_a_shot(
                seq in prop::collection::vec(token(), 0..80),
                min_length in 0usize..5
            ) {
                for buildup in extract_shot_buildups(&seq, min_length) {
                    prop_assert!(buildup.len() > min_length);
                    let (last, body) = buildup.split_last().unwrap();
                    prop_assert!(last.is_shot_or_goal());
                    prop_assert!(body.iter().all(|t| matches!(t, Token::Player(_))));

                    // Appears in the sequence right after a failed pass
                    let anchored = seq
                        .windows(buildup.len() + 1)
                        .any(|w| w[0] == Token::BadPass && w[1..] == buildup[..]);
                    prop_assert!(anchored);
                }
            }

            /// At most one buildup per failed pass
            #[test]
            fn prop_one_buildup_per_anchor(seq in prop::collection::vec(token(), 0..80)) {
                let anchors = seq.iter().filter(|&&t| t == Token::BadPass).count();
                prop_assert!(extract_shot_buildups(&seq, 0).len() <= anchors);
            }
        }
    }
}
