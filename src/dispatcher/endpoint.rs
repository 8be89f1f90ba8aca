//! Fixed endpoint shapes of the TFT API.

use crate::routing::RoutingScope;
use std::fmt;

const SUMMONER_PREFIX: &[&str] = &["tft", "summoner", "v1", "summoners"];
const LEAGUE_PREFIX: &[&str] = &["tft", "league", "v1"];
const MATCH_PREFIX: &[&str] = &["tft", "match", "v1", "matches"];

/// A read endpoint together with its path parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `/tft/summoner/v1/summoners/by-name/{name}`
    SummonerByName { name: &'a str },
    /// `/tft/league/v1/entries/by-summoner/{summonerId}`
    LeagueEntries { summoner_id: &'a str },
    /// `/tft/match/v1/matches/by-puuid/{puuid}/ids?count={count}`
    MatchIds { puuid: &'a str, count: u32 },
    /// `/tft/match/v1/matches/{matchId}`
    Match { match_id: &'a str },
}

impl<'a> Endpoint<'a> {
    /// Short name used in logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::SummonerByName { .. } => "summoner_by_name",
            Endpoint::LeagueEntries { .. } => "league_entries",
            Endpoint::MatchIds { .. } => "match_ids",
            Endpoint::Match { .. } => "match",
        }
    }

    /// Kind of routing domain the endpoint is served from
    pub fn scope(&self) -> RoutingScope {
        match self {
            Endpoint::SummonerByName { .. } | Endpoint::LeagueEntries { .. } => {
                RoutingScope::Platform
            }
            Endpoint::MatchIds { .. } | Endpoint::Match { .. } => RoutingScope::Region,
        }
    }

    /// Unencoded path segments
    pub fn segments(&self) -> Vec<&'a str> {
        let (prefix, rest): (&[&str], Vec<&'a str>) = match *self {
            Endpoint::SummonerByName { name } => (SUMMONER_PREFIX, vec!["by-name", name]),
            Endpoint::LeagueEntries { summoner_id } => {
                (LEAGUE_PREFIX, vec!["entries", "by-summoner", summoner_id])
            }
            Endpoint::MatchIds { puuid, .. } => (MATCH_PREFIX, vec!["by-puuid", puuid, "ids"]),
            Endpoint::Match { match_id } => (MATCH_PREFIX, vec![match_id]),
        };
        prefix.iter().copied().chain(rest).collect()
    }

    /// Query parameters
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::MatchIds { count, .. } => vec![("count", count.to_string())],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            write!(f, "/{}", segment)?;
        }
        for (i, (key, value)) in self.query().iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}
