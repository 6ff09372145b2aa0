//! Pass network with average player positions
//!
//! The receiver of a pass is taken to be the player making the team's next
//! pass. Only completed passes in regular time are counted.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analysis::jersey::JerseyMap;
use crate::analysis::pass_graph::GraphNode;
use crate::{Event, EventKind, Location, PassNetError, Result};

/// Pitch length in the feed's coordinate system
pub const PITCH_LENGTH: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkNode {
    pub player: String,
    /// Mean starting location of the player's passes
    pub location: Location,
    pub passes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    pub passes: usize,
    pub from_location: Location,
    pub to_location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassNetwork {
    pub team: String,
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

impl PassNetwork {
    /// Flip the x axis, for the team attacking right to left
    pub fn mirrored(&self, pitch_length: f64) -> PassNetwork {
        let flip = |loc: Location| Location {
            x: pitch_length - loc.x,
            y: loc.y,
        };
        PassNetwork {
            team: self.team.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|n| NetworkNode {
                    location: flip(n.location),
                    ..n.clone()
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| NetworkEdge {
                    from_location: flip(e.from_location),
                    to_location: flip(e.to_location),
                    ..e.clone()
                })
                .collect(),
        }
    }

    pub fn node(&self, player: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.player == player)
    }

    /// Weighted edges relabelled by jersey number
    pub fn jersey_edges(&self, jerseys: &JerseyMap) -> Vec<(GraphNode, GraphNode, usize)> {
        let label = |name: &str| {
            jerseys
                .get(name)
                .map(GraphNode::Player)
                .unwrap_or(GraphNode::Unknown)
        };
        self.edges
            .iter()
            .map(|e| (label(&e.from), label(&e.to), e.passes))
            .collect()
    }

    pub fn total_passes(&self) -> usize {
        self.edges.iter().map(|e| e.passes).sum()
    }
}

/// Last minute of regular time: the minute of the third half-end event
pub fn regular_time_end(events: &[Event]) -> Result<u32> {
    let mut half_ends: Vec<&Event> = events
        .iter()
        .filter(|e| e.kind == EventKind::HalfEnd)
        .collect();
    half_ends.sort_by_key(|e| e.clock());

    half_ends.get(2).map(|e| e.minute).ok_or_else(|| {
        PassNetError::IncompleteMatch(format!(
            "expected at least 3 half end events, found {}",
            half_ends.len()
        ))
    })
}

#[derive(Default)]
struct PositionSum {
    x: f64,
    y: f64,
    count: usize,
}

/// Build the pass network of `team`
pub fn pass_network(events: &[Event], team: &str) -> Result<PassNetwork> {
    let last_minute = regular_time_end(events)?;

    let team_passes: Vec<&Event> = events
        .iter()
        .filter(|e| e.is_pass() && e.team == team)
        .collect();

    let mut positions: BTreeMap<&str, PositionSum> = BTreeMap::new();
    let mut pair_counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for (i, pass) in team_passes.iter().enumerate() {
        if !pass.is_successful_pass() || pass.minute > last_minute {
            continue;
        }
        let Some(maker) = pass.player.as_deref() else {
            continue;
        };

        if let Some(loc) = pass.location {
            let sum = positions.entry(maker).or_default();
            sum.x += loc.x;
            sum.y += loc.y;
            sum.count += 1;
        }

        let receiver = team_passes.get(i + 1).and_then(|next| next.player.as_deref());
        if let Some(receiver) = receiver {
            *pair_counts.entry((maker, receiver)).or_insert(0) += 1;
        }
    }

    let averages: BTreeMap<&str, (Location, usize)> = positions
        .into_iter()
        .map(|(player, sum)| {
            let n = sum.count as f64;
            (
                player,
                (
                    Location {
                        x: sum.x / n,
                        y: sum.y / n,
                    },
                    sum.count,
                ),
            )
        })
        .collect();

    let nodes = averages
        .iter()
        .map(|(&player, &(location, passes))| NetworkNode {
            player: player.to_string(),
            location,
            passes,
        })
        .collect();

    let edges = pair_counts
        .into_iter()
        .filter(|((maker, receiver), _)| maker != receiver)
        .filter_map(|((maker, receiver), passes)| {
            let (from_location, _) = averages.get(maker)?;
            let (to_location, _) = averages.get(receiver)?;
            Some(NetworkEdge {
                from: maker.to_string(),
                to: receiver.to_string(),
                passes,
                from_location: *from_location,
                to_location: *to_location,
            })
        })
        .collect();

    Ok(PassNetwork {
        team: team.to_string(),
        nodes,
        edges,
    })
}
