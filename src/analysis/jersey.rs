//! Player name to jersey number lookup
//!
//! Jersey numbers are the node identity for every downstream structure.

use std::collections::HashMap;

use crate::{JerseyNumber, Lineup, PassNetError, Result};

/// Find the lineup of `team` among the lineups of one match
pub fn lineup_for_team<'a>(lineups: &'a [Lineup], team: &str) -> Result<&'a Lineup> {
    lineups
        .iter()
        .find(|l| l.matches_team(team))
        .ok_or_else(|| PassNetError::MissingLineup {
            team: team.to_string(),
        })
}

/// Mapping from player name to shirt number for one team
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JerseyMap {
    numbers: HashMap<String, JerseyNumber>,
}

impl JerseyMap {
    pub fn from_lineup(lineup: &Lineup) -> Self {
        let numbers = lineup
            .players
            .iter()
            .map(|entry| (entry.player.clone(), entry.jersey))
            .collect();
        JerseyMap { numbers }
    }

    /// Build the map for `team` directly from the match lineups
    pub fn for_team(lineups: &[Lineup], team: &str) -> Result<Self> {
        lineup_for_team(lineups, team).map(Self::from_lineup)
    }

    pub fn get(&self, player: &str) -> Option<JerseyNumber> {
        self.numbers.get(player).copied()
    }

    /// Lookup that fails for players missing from the lineup
    pub fn require(&self, player: &str) -> Result<JerseyNumber> {
        self.get(player)
            .ok_or_else(|| PassNetError::UnknownPlayer(player.to_string()))
    }

    pub fn contains(&self, player: &str) -> bool {
        self.numbers.contains_key(player)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Reverse lookup, used for labelling output
    pub fn player_for(&self, jersey: JerseyNumber) -> Option<&str> {
        self.numbers
            .iter()
            .find(|(_, &n)| n == jersey)
            .map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, JerseyNumber)> for JerseyMap {
    fn from_iter<I: IntoIterator<Item = (String, JerseyNumber)>>(iter: I) -> Self {
        JerseyMap {
            numbers: iter.into_iter().collect(),
        }
    }
}
