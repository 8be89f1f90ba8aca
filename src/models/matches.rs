use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A completed game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub metadata: Metadata,
    pub info: Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "data_version")]
    pub version: String,
    #[serde(rename = "match_id")]
    pub id: String,
    /// Encrypted PUUIDs of the players
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Unix timestamp in milliseconds
    #[serde(rename = "game_datetime")]
    pub time: i64,

    /// Game length in seconds
    #[serde(rename = "game_length")]
    pub length: f64,

    /// Galaxy name, only present for some sets
    #[serde(rename = "game_variation", default)]
    pub variation: Option<String>,

    /// Client version the game was played on
    #[serde(rename = "game_version")]
    pub version: String,

    pub participants: Vec<Participant>,

    #[serde(rename = "queue_id")]
    pub queue_id: i32,

    #[serde(rename = "tft_set_number")]
    pub set: i32,
}

impl Info {
    pub fn played_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.time.max(0) as u64)
    }

    /// Performance of the player with `puuid`, if they took part
    pub fn participant(&self, puuid: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub gold_left: i32,
    pub last_round: i32,
    pub level: i32,
    pub placement: i32,
    pub players_eliminated: i32,
    pub puuid: String,
    /// Seconds into the game the player was eliminated
    pub time_eliminated: f64,
    pub total_damage_to_players: i32,
    #[serde(default)]
    pub traits: Vec<Trait>,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Participant {
    pub fn is_top_four(&self) -> bool {
        (1..=4).contains(&self.placement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub num_units: i32,
    pub tier_current: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub items: Vec<i32>,
    #[serde(rename = "character_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub rarity: i32,
    pub tier: i32,
}
