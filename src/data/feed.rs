//! Event feed abstraction
//!
//! A feed supplies the events and lineups of one match. Analyses only ever
//! see the materialized [`MatchData`].

use std::collections::HashMap;

use crate::analysis::jersey::{lineup_for_team, JerseyMap};
use crate::{Event, Lineup, PassNetError, Result};

/// Source of match events and lineups
pub trait EventFeed {
    /// All events of the match, in feed order
    fn events(&self, match_id: u64) -> Result<Vec<Event>>;

    /// Lineups of both teams
    fn lineups(&self, match_id: u64) -> Result<Vec<Lineup>>;

    fn fetch_match(&self, match_id: u64) -> Result<MatchData> {
        let events = self.events(match_id)?;
        let lineups = self.lineups(match_id)?;
        log::info!(
            "Match {}: {} events, {} lineups",
            match_id,
            events.len(),
            lineups.len()
        );
        Ok(MatchData {
            match_id,
            events,
            lineups,
        })
    }
}

/// Everything fetched for one match
#[derive(Debug, Clone)]
pub struct MatchData {
    pub match_id: u64,
    pub events: Vec<Event>,
    pub lineups: Vec<Lineup>,
}

impl MatchData {
    pub fn team_names(&self) -> Vec<&str> {
        self.lineups.iter().map(|l| l.team.as_str()).collect()
    }

    /// Canonical team name as spelled by the feed
    pub fn resolve_team(&self, name: &str) -> Result<String> {
        lineup_for_team(&self.lineups, name).map(|l| l.team.clone())
    }

    pub fn jerseys(&self, team: &str) -> Result<JerseyMap> {
        JerseyMap::for_team(&self.lineups, team)
    }
}

/// Retry a feed operation with exponential backoff
pub fn with_retry<T, F>(mut operation: F, max_attempts: u32) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut last_error = None;
    for attempt in 0..max_attempts {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) => {
                log::warn!("Attempt {} failed: {}", attempt + 1, e);
                last_error = Some(e);
                if attempt + 1 < max_attempts {
                    let delay = std::time::Duration::from_millis(100 * 2u64.pow(attempt));
                    std::thread::sleep(delay);
                }
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        PassNetError::Config("max_attempts must be at least 1".to_string())
    }))
}

/// Feed backed by data already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    matches: HashMap<u64, (Vec<Event>, Vec<Lineup>)>,
}

impl StaticFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(mut self, match_id: u64, events: Vec<Event>, lineups: Vec<Lineup>) -> Self {
        self.matches.insert(match_id, (events, lineups));
        self
    }

    fn get(&self, match_id: u64) -> Result<&(Vec<Event>, Vec<Lineup>)> {
        self.matches.get(&match_id).ok_or_else(|| PassNetError::Feed {
            match_id,
            message: "match not loaded".to_string(),
        })
    }
}

impl EventFeed for StaticFeed {
    fn events(&self, match_id: u64) -> Result<Vec<Event>> {
        self.get(match_id).map(|(events, _)| events.clone())
    }

    fn lineups(&self, match_id: u64) -> Result<Vec<Lineup>> {
        self.get(match_id).map(|(_, lineups)| lineups.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::tests::{EVENTS_JSON, LINEUPS_JSON};
    use crate::data::schema::{parse_events, parse_lineups};
    use std::cell::Cell;

    fn sample_feed() -> StaticFeed {
        StaticFeed::new().with_match(
            3773386,
            parse_events(EVENTS_JSON).unwrap(),
            parse_lineups(LINEUPS_JSON).unwrap(),
        )
    }

    #[test]
    fn test_fetch_match() {
        let data = sample_feed().fetch_match(3773386).unwrap();
        assert_eq!(data.team_names(), vec!["Barcelona", "Deportivo Alavés"]);
        assert_eq!(data.resolve_team("barcelona").unwrap(), "Barcelona");
        assert_eq!(
            data.jerseys("Barcelona").unwrap().get("Sergio Busquets i Burgos").unwrap().get(),
            5
        );
        assert!(matches!(
            data.resolve_team("Sevilla"),
            Err(PassNetError::MissingLineup { .. })
        ));
    }

    #[test]
    fn test_unknown_match() {
        assert!(matches!(
            sample_feed().fetch_match(1),
            Err(PassNetError::Feed { match_id: 1, .. })
        ));
    }

    #[test]
    fn test_retry_until_success() {
        let calls = Cell::new(0);
        let result = with_retry(
            || {
                calls.set(calls.get() + 1);
                if calls.get() < 2 {
                    Err(PassNetError::Parse("transient".to_string()))
                } else {
                    Ok(calls.get())
                }
            },
            3,
        );
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn test_retry_gives_up() {
        let calls = Cell::new(0);
        let result: Result<()> = with_retry(
            || {
                calls.set(calls.get() + 1);
                Err(PassNetError::Parse("always".to_string()))
            },
            2,
        );
        assert!(matches!(result, Err(PassNetError::Parse(_))));
        assert_eq!(calls.get(), 2);
    }
}
