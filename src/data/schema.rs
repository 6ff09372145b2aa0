//! Wire format of the StatsBomb open-data JSON files
//!
//! Only the fields used by the analyses are declared; everything else in
//! the feed is ignored.

use chrono::NaiveTime;
use serde::Deserialize;

use crate::{
    Event, EventKind, JerseyNumber, Lineup, LineupEntry, Location, PassDetails, PassNetError,
    Result, ShotDetails, SubstitutionDetails,
};

/// `{"id": .., "name": ..}` reference used throughout the feed
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub index: u32,
    pub period: u8,
    pub timestamp: String,
    pub minute: u32,
    pub second: u32,
    #[serde(rename = "type")]
    pub event_type: NamedRef,
    pub team: NamedRef,
    #[serde(default)]
    pub player: Option<NamedRef>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
    #[serde(default)]
    pub pass: Option<RawPass>,
    #[serde(default)]
    pub shot: Option<RawShot>,
    #[serde(default)]
    pub substitution: Option<RawSubstitution>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPass {
    #[serde(default)]
    pub recipient: Option<NamedRef>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub end_location: Option<Vec<f64>>,
    #[serde(default)]
    pub outcome: Option<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShot {
    #[serde(default)]
    pub outcome: Option<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSubstitution {
    pub replacement: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineup {
    pub team_name: String,
    pub lineup: Vec<RawLineupPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineupPlayer {
    pub player_name: String,
    pub jersey_number: i64,
}

fn to_location(coords: Option<Vec<f64>>) -> Option<Location> {
    match coords.as_deref() {
        Some([x, y, ..]) => Some(Location { x: *x, y: *y }),
        _ => None,
    }
}

/// Parse a `hh:mm:ss.fff` period clock
pub fn parse_timestamp(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .map_err(|e| PassNetError::Parse(format!("Bad timestamp {:?}: {}", value, e)))
}

impl TryFrom<RawEvent> for Event {
    type Error = PassNetError;

    fn try_from(raw: RawEvent) -> Result<Self> {
        Ok(Event {
            index: raw.index,
            period: raw.period,
            timestamp: parse_timestamp(&raw.timestamp)?,
            minute: raw.minute,
            second: raw.second,
            kind: EventKind::from_name(&raw.event_type.name),
            team: raw.team.name,
            player: raw.player.map(|p| p.name),
            location: to_location(raw.location),
            pass: raw.pass.map(|p| PassDetails {
                recipient: p.recipient.map(|r| r.name),
                outcome: p.outcome.map(|o| o.name),
                length: p.length,
                end_location: to_location(p.end_location),
            }),
            shot: raw.shot.map(|s| ShotDetails {
                outcome: s.outcome.map(|o| o.name),
            }),
            substitution: raw.substitution.map(|s| SubstitutionDetails {
                replacement: s.replacement.name,
            }),
        })
    }
}

impl TryFrom<RawLineup> for Lineup {
    type Error = PassNetError;

    fn try_from(raw: RawLineup) -> Result<Self> {
        let players = raw
            .lineup
            .into_iter()
            .map(|p| {
                Ok(LineupEntry {
                    jersey: JerseyNumber::new(p.jersey_number)?,
                    player: p.player_name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Lineup {
            team: raw.team_name,
            players,
        })
    }
}

/// Decode an events file into domain events, in feed order
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let raw: Vec<RawEvent> = serde_json::from_str(json)?;
    let mut events = raw
        .into_iter()
        .map(Event::try_from)
        .collect::<Result<Vec<_>>>()?;
    events.sort_by_key(|e| e.index);
    Ok(events)
}

/// Decode a lineups file
pub fn parse_lineups(json: &str) -> Result<Vec<Lineup>> {
    let raw: Vec<RawLineup> = serde_json::from_str(json)?;
    raw.into_iter().map(Lineup::try_from).collect()
}
