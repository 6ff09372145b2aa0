//! Symbolic encoding of a team's passes and shots
//!
//! Each pass or shot becomes one [`Token`]: the passer's jersey number for a
//! completed pass, and a sentinel for failed passes, shots and goals.

use crate::analysis::jersey::JerseyMap;
use crate::{Event, PassNetError, Result, Token, TokenCodes};

/// Chronological token stream for one team in one match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    tokens: Vec<Token>,
}

impl Sequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Sequence { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_codes(&self, codes: &TokenCodes) -> Vec<i64> {
        self.tokens.iter().map(|t| t.code(codes)).collect()
    }

    pub fn from_codes(values: &[i64], codes: &TokenCodes) -> Result<Self> {
        values
            .iter()
            .map(|&v| Token::from_code(v, codes))
            .collect::<Result<Vec<_>>>()
            .map(Sequence::new)
    }
}

impl AsRef<[Token]> for Sequence {
    fn as_ref(&self) -> &[Token] {
        &self.tokens
    }
}

/// Passes and shots of `team`, stably sorted by match clock
pub fn team_actions<'a>(events: &'a [Event], team: &str) -> Vec<&'a Event> {
    let mut actions: Vec<&Event> = events
        .iter()
        .filter(|e| (e.is_pass() || e.is_shot()) && e.team == team)
        .collect();
    actions.sort_by_key(|e| e.clock());
    actions
}

fn encode_event(event: &Event, jerseys: &JerseyMap) -> Result<Token> {
    if event.is_shot() {
        return Ok(if event.is_goal() {
            Token::Goal
        } else {
            Token::Shot
        });
    }

    if event.pass_outcome().is_some() {
        return Ok(Token::BadPass);
    }

    let player = event
        .player
        .as_deref()
        .ok_or_else(|| PassNetError::UnknownPlayer(format!("<none> (event {})", event.index)))?;
    jerseys.require(player).map(Token::Player)
}

/// Encode the passes and shots of `team` into a token sequence
///
/// A completed pass by a player missing from `jerseys` fails with
/// [`PassNetError::UnknownPlayer`]. Pass recipients are not consulted.
pub fn encode(events: &[Event], team: &str, jerseys: &JerseyMap) -> Result<Sequence> {
    let tokens = team_actions(events, team)
        .into_iter()
        .map(|event| encode_event(event, jerseys))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Encoded {} tokens for {}", tokens.len(), team);
    Ok(Sequence::new(tokens))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{EventKind, JerseyNumber, PassDetails, ShotDetails};
    use chrono::NaiveTime;

    pub(crate) fn make_event(index: u32, minute: u32, second: u32, kind: EventKind, team: &str) -> Event {
        Event {
            index,
            period: if minute < 45 { 1 } else { 2 },
            timestamp: NaiveTime::from_hms_opt(0, minute % 45, second).unwrap(),
            minute,
            second,
            kind,
            team: team.to_string(),
            player: None,
            location: None,
            pass: None,
            shot: None,
            substitution: None,
        }
    }

    pub(crate) fn make_pass(
        index: u32,
        minute: u32,
        second: u32,
        team: &str,
        player: &str,
        recipient: Option<&str>,
        outcome: Option<&str>,
    ) -> Event {
        let mut event = make_event(index, minute, second, EventKind::Pass, team);
        event.player = Some(player.to_string());
        event.pass = Some(PassDetails {
            recipient: recipient.map(str::to_string),
            outcome: outcome.map(str::to_string),
            length: None,
            end_location: None,
        });
        event
    }

    pub(crate) fn make_shot(index: u32, minute: u32, second: u32, team: &str, player: &str, outcome: &str) -> Event {
        let mut event = make_event(index, minute, second, EventKind::Shot, team);
        event.player = Some(player.to_string());
        event.shot = Some(ShotDetails {
            outcome: Some(outcome.to_string()),
        });
        event
    }

    fn jersey(n: i64) -> JerseyNumber {
        JerseyNumber::new(n).unwrap()
    }

    fn jerseys() -> JerseyMap {
        [("A".to_string(), jersey(7)), ("C".to_string(), jersey(9))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_recipient_is_ignored() {
        let events = vec![make_pass(0, 1, 0, "Home", "A", Some("B"), None)];
        let seq = encode(&events, "Home", &jerseys()).unwrap();
        assert_eq!(seq.tokens(), &[Token::Player(jersey(7))]);
    }

    #[test]
    fn test_encodes_all_token_kinds() {
        let events = vec![
            make_pass(0, 1, 0, "Home", "A", Some("C"), None),
            make_pass(1, 1, 5, "Home", "C", Some("A"), Some("Incomplete")),
            make_shot(2, 2, 0, "Home", "C", "Saved"),
            make_shot(3, 3, 0, "Home", "A", "Goal"),
            make_pass(4, 3, 10, "Away", "X", None, None),
            make_event(5, 3, 20, EventKind::Other("Pressure".to_string()), "Home"),
        ];

        let seq = encode(&events, "Home", &jerseys()).unwrap();
        assert_eq!(
            seq.tokens(),
            &[Token::Player(jersey(7)), Token::BadPass, Token::Shot, Token::Goal]
        );
    }

    #[test]
    fn test_failed_pass_by_unknown_player_is_bad_pass() {
        let events = vec![make_pass(0, 1, 0, "Home", "Nobody", None, Some("Out"))];
        let seq = encode(&events, "Home", &jerseys()).unwrap();
        assert_eq!(seq.tokens(), &[Token::BadPass]);
    }

    #[test]
    fn test_unknown_passer_fails() {
        let events = vec![make_pass(0, 1, 0, "Home", "Nobody", None, None)];
        assert!(matches!(
            encode(&events, "Home", &jerseys()),
            Err(PassNetError::UnknownPlayer(name)) if name == "Nobody"
        ));
    }

    #[test]
    fn test_sorted_by_clock_with_stable_ties() {
        let events = vec![
            make_pass(0, 5, 0, "Home", "A", None, None),
            make_pass(1, 1, 30, "Home", "C", None, None),
            make_pass(2, 1, 30, "Home", "A", None, None),
        ];

        let seq = encode(&events, "Home", &jerseys()).unwrap();
        assert_eq!(
            seq.tokens(),
            &[Token::Player(jersey(9)), Token::Player(jersey(7)), Token::Player(jersey(7))]
        );
        assert_eq!(seq, encode(&events, "Home", &jerseys()).unwrap());
    }

    #[test]
    fn test_codes_roundtrip() {
        let codes = TokenCodes::default();
        let seq = Sequence::from_codes(&[5, -1, 3, 100, 101], &codes).unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.to_codes(&codes), vec![5, -1, 3, 100, 101]);
    }
}
