use serde::{Deserialize, Serialize};

/// A TFT account as looked up on one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    pub name: String,

    /// Epoch milliseconds of the last name, level or icon change
    #[serde(default)]
    pub revision_date: i64,

    #[serde(default)]
    pub summoner_level: i64,

    #[serde(default)]
    pub profile_icon_id: i32,

    /// Encrypted account id, at most 56 characters
    pub account_id: String,

    /// Encrypted summoner id, at most 63 characters
    pub id: String,

    /// Encrypted PUUID, 78 characters
    pub puuid: String,

    /// Platform the summoner was looked up on; set by the client
    #[serde(default)]
    pub platform: String,

    /// Region serving `platform`; set by the client
    #[serde(default)]
    pub region: String,
}
