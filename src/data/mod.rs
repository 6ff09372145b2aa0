//! Match data acquisition
//!
//! The StatsBomb open-data client, its wire schema, and the feed trait the
//! analyses are fed through.

pub mod feed;
pub mod schema;
pub mod statsbomb;

pub use feed::{EventFeed, MatchData, StaticFeed};
pub use statsbomb::StatsBombFeed;
