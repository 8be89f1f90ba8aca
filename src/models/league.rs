use serde::{Deserialize, Serialize};

/// Ranked standing of a summoner in one queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    #[serde(default)]
    pub league_id: String,
    pub summoner_id: String,
    #[serde(default)]
    pub summoner_name: String,

    #[serde(default)]
    pub queue_type: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub league_points: i32,

    /// First places
    pub wins: u32,
    /// Second through eighth places
    pub losses: u32,

    #[serde(default)]
    pub hot_streak: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub inactive: bool,
}

impl LeagueEntry {
    /// Ranked games played over the queue's lifetime
    pub fn total_games(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }
}
