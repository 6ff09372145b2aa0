//! Pass report for a single player

use serde::Serialize;

use crate::{Event, Location};

/// Label used for passes the feed records without an outcome
pub const SUCCESSFUL: &str = "Successful";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassVector {
    pub minute: u32,
    pub start: Option<Location>,
    pub end: Option<Location>,
    pub outcome: String,
}

impl PassVector {
    pub fn is_successful(&self) -> bool {
        self.outcome == SUCCESSFUL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPassReport {
    pub player: String,
    pub passes: Vec<PassVector>,
    /// Outcome label and its share of all passes in percent
    pub outcome_shares: Vec<(String, f64)>,
}

/// Collect every pass made by `player`
pub fn player_passes(events: &[Event], player: &str) -> PlayerPassReport {
    let passes: Vec<PassVector> = events
        .iter()
        .filter(|e| e.is_pass() && e.player.as_deref() == Some(player))
        .map(|e| PassVector {
            minute: e.minute,
            start: e.location,
            end: e.pass.as_ref().and_then(|p| p.end_location),
            outcome: e.pass_outcome().unwrap_or(SUCCESSFUL).to_string(),
        })
        .collect();

    let mut counts: Vec<(String, usize)> = Vec::new();
    for pass in &passes {
        match counts.iter_mut().find(|(label, _)| *label == pass.outcome) {
            Some((_, n)) => *n += 1,
            None => counts.push((pass.outcome.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = passes.len() as f64;
    let outcome_shares = counts
        .into_iter()
        .map(|(label, n)| (label, n as f64 * 100.0 / total))
        .collect();

    PlayerPassReport {
        player: player.to_string(),
        passes,
        outcome_shares,
    }
}
