//! Lengths of completed passes per player

use serde::Serialize;
use std::collections::BTreeMap;

use crate::Event;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassLengths {
    pub by_player: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassLengthSummary {
    pub player: String,
    pub count: usize,
    pub mean: f64,
    pub max: f64,
}

impl PassLengths {
    pub fn get(&self, player: &str) -> Option<&[f64]> {
        self.by_player.get(player).map(Vec::as_slice)
    }

    pub fn summaries(&self) -> Vec<PassLengthSummary> {
        self.by_player
            .iter()
            .filter(|(_, lengths)| !lengths.is_empty())
            .map(|(player, lengths)| PassLengthSummary {
                player: player.clone(),
                count: lengths.len(),
                mean: lengths.iter().sum::<f64>() / lengths.len() as f64,
                max: lengths.iter().copied().fold(f64::MIN, f64::max),
            })
            .collect()
    }
}

/// Lengths of the completed passes of `team`, in feed order per player
pub fn pass_lengths(events: &[Event], team: &str) -> PassLengths {
    let mut by_player: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for event in events.iter().filter(|e| e.team == team && e.is_successful_pass()) {
        let Some(player) = event.player.as_ref() else {
            continue;
        };
        let lengths = by_player.entry(player.clone()).or_default();
        if let Some(length) = event.pass.as_ref().and_then(|p| p.length) {
            lengths.push(length);
        }
    }

    PassLengths { by_player }
}
