//! Football passing statistics from match event data
//!
//! Pass graphs, pass networks, playing time and repeating pass patterns
//! computed from StatsBomb open-data event logs.

pub mod analysis;
pub mod data;
pub mod report;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use analysis::patterns::PatternConfig;

/// Shirt number of a player, unique within a team for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct JerseyNumber(u8);

impl JerseyNumber {
    pub const MAX: u8 = 99;

    pub fn new(value: i64) -> Result<Self> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(JerseyNumber(value as u8))
        } else {
            Err(PassNetError::InvalidJersey(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for JerseyNumber {
    type Error = PassNetError;

    fn try_from(value: i64) -> Result<Self> {
        JerseyNumber::new(value)
    }
}

impl From<JerseyNumber> for i64 {
    fn from(n: JerseyNumber) -> i64 {
        n.0 as i64
    }
}

impl fmt::Display for JerseyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One symbol of the encoded pass/shot stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Successful pass by the player wearing this number
    Player(JerseyNumber),
    /// Pass that did not reach a team mate
    BadPass,
    /// Shot that did not score
    Shot,
    Goal,
}

impl Token {
    pub fn is_shot_or_goal(self) -> bool {
        matches!(self, Token::Shot | Token::Goal)
    }

    /// Numeric code used when a sequence is serialized
    pub fn code(self, codes: &TokenCodes) -> i64 {
        match self {
            Token::Player(n) => n.get() as i64,
            Token::BadPass => codes.bad_pass,
            Token::Shot => codes.shot,
            Token::Goal => codes.goal,
        }
    }

    pub fn from_code(code: i64, codes: &TokenCodes) -> Result<Self> {
        if code == codes.bad_pass {
            Ok(Token::BadPass)
        } else if code == codes.shot {
            Ok(Token::Shot)
        } else if code == codes.goal {
            Ok(Token::Goal)
        } else {
            JerseyNumber::new(code).map(Token::Player)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Player(n) => write!(f, "{}", n),
            Token::BadPass => write!(f, "BAD"),
            Token::Shot => write!(f, "SHOT"),
            Token::Goal => write!(f, "GOAL"),
        }
    }
}

/// Numeric codes for the non-player tokens
///
/// The codes must lie outside the jersey range 0-99 so a serialized
/// sequence can be decoded without ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCodes {
    pub bad_pass: i64,
    pub shot: i64,
    pub goal: i64,
}

impl TokenCodes {
    pub const BAD_PASS: i64 = -1;
    pub const SHOT: i64 = 100;
    pub const GOAL: i64 = 101;

    pub fn validate(&self) -> Result<()> {
        let jersey_range = 0..=JerseyNumber::MAX as i64;
        for (name, code) in [
            ("bad_pass", self.bad_pass),
            ("shot", self.shot),
            ("goal", self.goal),
        ] {
            if jersey_range.contains(&code) {
                return Err(PassNetError::InvalidTokenCodes(format!(
                    "{} code {} collides with the jersey range 0-{}",
                    name,
                    code,
                    JerseyNumber::MAX
                )));
            }
        }
        if self.bad_pass == self.shot || self.bad_pass == self.goal || self.shot == self.goal {
            return Err(PassNetError::InvalidTokenCodes(format!(
                "codes must be distinct (bad_pass={}, shot={}, goal={})",
                self.bad_pass, self.shot, self.goal
            )));
        }
        Ok(())
    }
}

impl Default for TokenCodes {
    fn default() -> Self {
        TokenCodes {
            bad_pass: Self::BAD_PASS,
            shot: Self::SHOT,
            goal: Self::GOAL,
        }
    }
}

/// Event type as reported by the feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Pass,
    Shot,
    HalfEnd,
    Substitution,
    Other(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Pass" => EventKind::Pass,
            "Shot" => EventKind::Shot,
            "Half End" => EventKind::HalfEnd,
            "Substitution" => EventKind::Substitution,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Pass => write!(f, "Pass"),
            EventKind::Shot => write!(f, "Shot"),
            EventKind::HalfEnd => write!(f, "Half End"),
            EventKind::Substitution => write!(f, "Substitution"),
            EventKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Pitch coordinates (120 x 80 yards, origin at the top left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassDetails {
    pub recipient: Option<String>,
    /// Absent for a completed pass
    pub outcome: Option<String>,
    pub length: Option<f64>,
    pub end_location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotDetails {
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionDetails {
    pub replacement: String,
}

/// A single row of the match event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Position in the original feed
    pub index: u32,
    pub period: u8,
    /// Time since the start of the period
    pub timestamp: NaiveTime,
    pub minute: u32,
    pub second: u32,
    pub kind: EventKind,
    pub team: String,
    pub player: Option<String>,
    pub location: Option<Location>,
    pub pass: Option<PassDetails>,
    pub shot: Option<ShotDetails>,
    pub substitution: Option<SubstitutionDetails>,
}

impl Event {
    pub fn is_pass(&self) -> bool {
        self.kind == EventKind::Pass
    }

    pub fn is_shot(&self) -> bool {
        self.kind == EventKind::Shot
    }

    /// A pass with no recorded outcome reached its target
    pub fn is_successful_pass(&self) -> bool {
        self.is_pass() && self.pass_outcome().is_none()
    }

    pub fn is_goal(&self) -> bool {
        self.is_shot() && self.shot_outcome() == Some("Goal")
    }

    pub fn pass_outcome(&self) -> Option<&str> {
        self.pass.as_ref().and_then(|p| p.outcome.as_deref())
    }

    pub fn pass_recipient(&self) -> Option<&str> {
        self.pass.as_ref().and_then(|p| p.recipient.as_deref())
    }

    pub fn shot_outcome(&self) -> Option<&str> {
        self.shot.as_ref().and_then(|s| s.outcome.as_deref())
    }

    /// Key used for chronological ordering
    pub fn clock(&self) -> (u32, u32) {
        (self.minute, self.second)
    }
}

/// One player entry of a team sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player: String,
    pub jersey: JerseyNumber,
}

/// Team sheet for one team in one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub team: String,
    pub players: Vec<LineupEntry>,
}

impl Lineup {
    pub fn matches_team(&self, name: &str) -> bool {
        self.team.to_lowercase() == name.to_lowercase()
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum PassNetError {
    #[error("No lineup for team {team}")]
    MissingLineup { team: String },

    #[error("Player not in lineup: {0}")]
    UnknownPlayer(String),

    #[error("Jersey number out of range 0-99: {0}")]
    InvalidJersey(i64),

    #[error("Invalid token codes: {0}")]
    InvalidTokenCodes(String),

    #[error("Incomplete match data: {0}")]
    IncompleteMatch(String),

    #[error("Feed failed for match {match_id}: {message}")]
    Feed { match_id: u64, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PassNetError>;

/// Application configuration loaded from passnet.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub buildup: BuildupConfig,
    #[serde(default)]
    pub playtime: PlaytimeConfig,
    #[serde(default)]
    pub tokens: TokenCodes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    /// Directory for cached feed JSON, none disables caching
    pub cache_dir: Option<String>,
    pub offline: bool,
    pub timeout_secs: u64,
    pub max_attempts: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            base_url: "https://raw.githubusercontent.com/statsbomb/open-data/master/data"
                .to_string(),
            cache_dir: Some("data/cache".to_string()),
            offline: false,
            timeout_secs: 30,
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildupConfig {
    /// Buildups must be strictly longer than this
    pub min_length: usize,
}

impl Default for BuildupConfig {
    fn default() -> Self {
        BuildupConfig { min_length: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaytimeConfig {
    /// Only used when a substitution carries no usable period
    pub substitution_tolerance_minutes: u32,
}

impl Default for PlaytimeConfig {
    fn default() -> Self {
        PlaytimeConfig {
            substitution_tolerance_minutes: 2,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PassNetError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| PassNetError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PassNetError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.tokens.validate()?;
        self.patterns.validate()?;
        if self.feed.max_attempts == 0 {
            return Err(PassNetError::Config(
                "feed.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jersey_range() {
        assert_eq!(JerseyNumber::new(0).unwrap().get(), 0);
        assert_eq!(JerseyNumber::new(99).unwrap().get(), 99);
        assert!(matches!(
            JerseyNumber::new(100),
            Err(PassNetError::InvalidJersey(100))
        ));
        assert!(JerseyNumber::new(-1).is_err());
    }

    #[test]
    fn test_token_codes() {
        let codes = TokenCodes::default();
        assert_eq!(Token::BadPass.code(&codes), -1);
        assert_eq!(Token::Shot.code(&codes), 100);
        assert_eq!(Token::Goal.code(&codes), 101);
        assert_eq!(Token::from_code(101, &codes).unwrap(), Token::Goal);
        assert_eq!(
            Token::from_code(7, &codes).unwrap(),
            Token::Player(JerseyNumber::new(7).unwrap())
        );
        assert!(Token::from_code(150, &codes).is_err());
    }

    #[test]
    fn test_token_codes_reject_jersey_range() {
        let codes = TokenCodes {
            shot: 10,
            ..TokenCodes::default()
        };
        assert!(matches!(
            codes.validate(),
            Err(PassNetError::InvalidTokenCodes(_))
        ));

        let duplicate = TokenCodes {
            goal: 100,
            ..TokenCodes::default()
        };
        assert!(duplicate.validate().is_err());
        assert!(TokenCodes::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.patterns.min_len, 3);
        assert_eq!(parsed.patterns.max_len, 10);
        assert_eq!(parsed.buildup.min_length, 3);
        assert_eq!(parsed.tokens, TokenCodes::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[buildup]\nmin_length = 5\n").unwrap();
        assert_eq!(parsed.buildup.min_length, 5);
        assert_eq!(parsed.feed.max_attempts, 3);
    }

    #[test]
    fn test_lineup_team_match_ignores_case() {
        let lineup = Lineup {
            team: "Barcelona".to_string(),
            players: vec![],
        };
        assert!(lineup.matches_team("barcelona"));
        assert!(!lineup.matches_team("Real Madrid"));
    }
}
