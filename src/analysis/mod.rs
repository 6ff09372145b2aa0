//! Analyses computed from one match's events
//!
//! Everything here is a pure function of already-fetched events and
//! lineups.

pub mod buildup;
pub mod jersey;
pub mod network;
pub mod pass_graph;
pub mod pass_length;
pub mod patterns;
pub mod player;
pub mod playtime;
pub mod sequence;

pub use buildup::extract_shot_buildups;
pub use jersey::JerseyMap;
pub use network::{pass_network, PassNetwork};
pub use pass_graph::{pass_graphs, GraphNode, PassGraph};
pub use pass_length::{pass_lengths, PassLengths};
pub use patterns::{find_patterns, PatternConfig, PatternCount, Patterns, WindowBound};
pub use player::{player_passes, PlayerPassReport};
pub use playtime::{seconds_played, PlayingTime};
pub use sequence::{encode, Sequence};
