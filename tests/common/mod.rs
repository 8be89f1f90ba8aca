#![allow(dead_code)]

use secrecy::Secret;
use serde_json::{json, Value};
use tft_stats::config::ClientConfig;
use tft_stats::models::Summoner;
use tft_stats::rate_limit::RateLimitConfig;
use tft_stats::TftClient;
use wiremock::MockServer;

pub const API_KEY: &str = "RGAPI-test-key";

/// Client pointed at `server`, with the routing domain as the first path segment
pub fn client_for(server: &MockServer) -> TftClient {
    let mut config = ClientConfig::default();
    config.api.base_url = format!("{}/{{routing}}", server.uri());
    config.api.timeout_secs = 5;
    config.rate_limit = RateLimitConfig::production();

    TftClient::new(&config, Secret::new(API_KEY.to_string())).unwrap()
}

pub fn summoner_json() -> Value {
    json!({
        "name": "tnekk",
        "revisionDate": 1600000000000i64,
        "summonerLevel": 150,
        "profileIconId": 29,
        "accountId": "account-1",
        "id": "summoner-1",
        "puuid": "puuid-1"
    })
}

/// The summoner as returned by `summoner_by_name` on na1
pub fn summoner() -> Summoner {
    let mut summoner: Summoner = serde_json::from_value(summoner_json()).unwrap();
    summoner.platform = "na1".to_string();
    summoner.region = "americas".to_string();
    summoner
}

pub fn league_json(wins: u32, losses: u32) -> Value {
    json!([{
        "leagueId": "league-1",
        "summonerId": "summoner-1",
        "summonerName": "tnekk",
        "queueType": "RANKED_TFT",
        "tier": "PLATINUM",
        "rank": "III",
        "leaguePoints": 55,
        "wins": wins,
        "losses": losses,
        "hotStreak": false,
        "veteran": false,
        "freshBlood": true,
        "inactive": false
    }])
}

pub fn match_json(id: &str, set: i32) -> Value {
    json!({
        "metadata": {
            "data_version": "5",
            "match_id": id,
            "participants": ["puuid-1", "puuid-2"]
        },
        "info": {
            "game_datetime": 1600000000000i64,
            "game_length": 1985.4,
            "game_variation": "TFT3_GameVariation_None",
            "game_version": "Version 10.19.334.1309",
            "queue_id": 1100,
            "tft_set_number": set,
            "participants": [{
                "gold_left": 2,
                "last_round": 31,
                "level": 8,
                "placement": 3,
                "players_eliminated": 1,
                "puuid": "puuid-1",
                "time_eliminated": 1890.5,
                "total_damage_to_players": 97,
                "traits": [{"name": "Set5_Forgotten", "num_units": 3, "tier_current": 1}],
                "units": [{"items": [16, 44], "character_id": "TFT5_Draven", "name": "", "rarity": 3, "tier": 2}]
            }]
        }
    })
}
