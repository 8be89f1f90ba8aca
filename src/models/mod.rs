//! Records returned by the API.

mod league;
mod matches;
mod summoner;

pub use league::LeagueEntry;
pub use matches::{Info, Match, Metadata, Participant, Trait, Unit};
pub use summoner::Summoner;

/// Opaque identifier of one completed match, scoped to a region
pub type MatchId = String;
