//! Directed pass multigraph keyed by jersey number

use std::collections::BTreeMap;
use std::fmt;

use crate::analysis::jersey::JerseyMap;
use crate::{Event, JerseyNumber, Result};

/// Receiving end of a pass edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphNode {
    Player(JerseyNumber),
    /// Recipient missing or not in the lineup
    Unknown,
}

impl GraphNode {
    pub const UNKNOWN_CODE: i64 = -1;

    pub fn code(self) -> i64 {
        match self {
            GraphNode::Player(n) => n.get() as i64,
            GraphNode::Unknown => Self::UNKNOWN_CODE,
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code(), f)
    }
}

/// One edge per pass attempt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassGraph {
    nodes: Vec<JerseyNumber>,
    edges: Vec<(JerseyNumber, GraphNode)>,
}

impl PassGraph {
    /// Passers in order of first appearance
    pub fn nodes(&self) -> &[JerseyNumber] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(JerseyNumber, GraphNode)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of parallel edges from `from` to `to`
    pub fn multiplicity(&self, from: JerseyNumber, to: GraphNode) -> usize {
        self.edges.iter().filter(|&&e| e == (from, to)).count()
    }

    pub fn out_degree(&self, node: JerseyNumber) -> usize {
        self.edges.iter().filter(|(from, _)| *from == node).count()
    }

    pub fn in_degree(&self, node: GraphNode) -> usize {
        self.edges.iter().filter(|(_, to)| *to == node).count()
    }

    /// Parallel edges collapsed into counts
    pub fn weighted_edges(&self) -> BTreeMap<(JerseyNumber, GraphNode), usize> {
        let mut weights = BTreeMap::new();
        for &edge in &self.edges {
            *weights.entry(edge).or_insert(0) += 1;
        }
        weights
    }
}

/// Build the multigraph of the given passes
///
/// Unmapped passers are an error, unmapped recipients point to
/// [`GraphNode::Unknown`].
pub fn build_pass_graph(passes: &[&Event], jerseys: &JerseyMap) -> Result<PassGraph> {
    let mut graph = PassGraph::default();

    for pass in passes {
        let passer = pass.player.as_deref().unwrap_or_default();
        let sender = jerseys.require(passer)?;
        if !graph.nodes.contains(&sender) {
            graph.nodes.push(sender);
        }

        let receiver = pass
            .pass_recipient()
            .and_then(|name| jerseys.get(name))
            .map(GraphNode::Player)
            .unwrap_or(GraphNode::Unknown);
        graph.edges.push((sender, receiver));
    }

    Ok(graph)
}

/// Graphs of the successful and unsuccessful passes of `team`
pub fn pass_graphs(events: &[Event], team: &str, jerseys: &JerseyMap) -> Result<(PassGraph, PassGraph)> {
    let mut passes: Vec<&Event> = events
        .iter()
        .filter(|e| e.is_pass() && e.team == team)
        .collect();
    passes.sort_by_key(|e| e.clock());

    let (successful, unsuccessful): (Vec<&Event>, Vec<&Event>) =
        passes.into_iter().partition(|e| e.is_successful_pass());

    let successful = build_pass_graph(&successful, jerseys)?;
    let unsuccessful = build_pass_graph(&unsuccessful, jerseys)?;
    log::debug!(
        "Pass graphs for {}: {} successful, {} unsuccessful edges",
        team,
        successful.edge_count(),
        unsuccessful.edge_count()
    );

    Ok((successful, unsuccessful))
}
