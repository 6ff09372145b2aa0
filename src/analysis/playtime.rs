//! Seconds on the pitch per player
//!
//! Every player who made a pass starts with the full match duration, then
//! substitutions shorten the time of the outgoing and incoming players.

use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{Event, EventKind, PassNetError, PlaytimeConfig, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayingTime {
    /// Sum of both half durations
    pub match_seconds: u32,
    pub seconds: BTreeMap<String, u32>,
}

impl PlayingTime {
    pub fn get(&self, player: &str) -> Option<u32> {
        self.seconds.get(player).copied()
    }

    pub fn minutes(&self, player: &str) -> Option<f64> {
        self.get(player).map(|s| s as f64 / 60.0)
    }
}

fn seconds_into_period(event: &Event) -> u32 {
    event.timestamp.num_seconds_from_midnight()
}

/// Durations of the first and second half from the team's half-end events
pub fn half_durations(events: &[Event], team: &str) -> Result<(u32, u32)> {
    let mut half_ends: Vec<&Event> = events
        .iter()
        .filter(|e| e.kind == EventKind::HalfEnd && e.team == team)
        .collect();
    half_ends.sort_by_key(|e| (e.period, e.clock()));

    match half_ends.as_slice() {
        [first, second, ..] => Ok((seconds_into_period(first), seconds_into_period(second))),
        _ => Err(PassNetError::IncompleteMatch(format!(
            "expected two half end events for {}, found {}",
            team,
            half_ends.len()
        ))),
    }
}

/// Whether a substitution happened in the second half
///
/// Falls back to comparing the match minute with the time into the period
/// when the feed gives no usable period.
fn in_second_half(sub: &Event, tolerance_minutes: u32) -> bool {
    match sub.period {
        1 => false,
        2 => true,
        _ => {
            let into_period = seconds_into_period(sub) as f64 / 60.0;
            (sub.minute as f64 - into_period).abs() > tolerance_minutes as f64
        }
    }
}

/// Estimate how long each player of `team` was on the pitch
pub fn seconds_played(events: &[Event], team: &str, config: &PlaytimeConfig) -> Result<PlayingTime> {
    let (first_half, second_half) = half_durations(events, team)?;
    let total = first_half + second_half;

    let mut seconds: BTreeMap<String, u32> = events
        .iter()
        .filter(|e| e.is_pass() && e.team == team)
        .filter_map(|e| e.player.clone())
        .map(|player| (player, total))
        .collect();

    let substitutions = events
        .iter()
        .filter(|e| e.kind == EventKind::Substitution && e.team == team);

    for sub in substitutions {
        let (Some(off), Some(details)) = (sub.player.as_deref(), sub.substitution.as_ref()) else {
            log::warn!("Skipping substitution event {} without players", sub.index);
            continue;
        };
        let on = details.replacement.as_str();
        let at = seconds_into_period(sub);

        let (off_time, on_time) = if in_second_half(sub, config.substitution_tolerance_minutes) {
            let current = seconds.get(off).copied().unwrap_or(total);
            ((current + at).saturating_sub(second_half), second_half.saturating_sub(at))
        } else {
            let current = seconds.get(on).copied().unwrap_or(total);
            (at, current.saturating_sub(at))
        };

        log::debug!("Substitution {} -> {} at {}s into the period", off, on, at);
        seconds.insert(off.to_string(), off_time);
        seconds.insert(on.to_string(), on_time);
    }

    Ok(PlayingTime {
        match_seconds: total,
        seconds,
    })
}
