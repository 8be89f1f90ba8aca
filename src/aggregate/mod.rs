//! Match history of a summoner within one game-set.
//!
//! Match ids come back newest first and a player's set only changes when a
//! new season starts, so the first match from another set marks the end of
//! the target set. Individual match failures are collected instead of
//! aborting the scan.

use crate::client::TftClient;
use crate::context::Context;
use crate::error::{AggregateError, Result};
use crate::models::{Match, Summoner};
use tracing::{debug, info, warn};

/// Matches found in the target set, plus the ids that could not be fetched
#[derive(Debug)]
pub struct SetMatches {
    /// Matches in the set, newest first
    pub matches: Vec<Match>,
    /// Present when at least one match failed to fetch
    pub failures: Option<AggregateError>,
}

impl SetMatches {
    pub fn is_complete(&self) -> bool {
        self.failures.is_none()
    }

    /// Convert to a `Result`, discarding the partial matches on failure
    pub fn into_result(self) -> std::result::Result<Vec<Match>, AggregateError> {
        match self.failures {
            Some(failures) => Err(failures),
            None => Ok(self.matches),
        }
    }
}

/// All ranked matches `summoner` played in set `target_set`.
///
/// Failing to fetch the league entry or the match ids fails the whole
/// operation. A failed match is recorded and the scan continues, except when
/// the context was cancelled, which ends the scan with what was collected.
pub async fn matches_in_set(
    ctx: &Context,
    client: &TftClient,
    summoner: &Summoner,
    target_set: i32,
) -> Result<SetMatches> {
    let league = client
        .league(ctx, summoner)
        .await
        .map_err(|e| e.context("league", summoner.name.clone()))?;

    let total_games = league.total_games();
    debug!(summoner = %summoner.name, total_games, "Fetched league entry");

    if total_games == 0 {
        return Ok(SetMatches {
            matches: Vec::new(),
            failures: None,
        });
    }

    let ids = client
        .matches(ctx, summoner, total_games)
        .await
        .map_err(|e| e.context("matches", summoner.name.clone()))?;

    let mut matches = Vec::new();
    let mut failures = AggregateError::new();

    for id in &ids {
        match client.get_match(ctx, &summoner.region, id).await {
            Ok(m) if m.info.set != target_set => {
                debug!(match_id = %id, set = m.info.set, "Reached match outside target set");
                break;
            }
            Ok(m) => matches.push(m),
            Err(e) => {
                let cancelled = e.is_cancelled();
                warn!(match_id = %id, error = %e, "Failed to fetch match");
                failures.insert(id.clone(), e);
                if cancelled {
                    break;
                }
            }
        }
    }

    info!(
        summoner = %summoner.name,
        set = target_set,
        matches = matches.len(),
        failed = failures.len(),
        scanned_of = ids.len(),
        "Collected matches in set"
    );

    Ok(SetMatches {
        matches,
        failures: (!failures.is_empty()).then_some(failures),
    })
}
