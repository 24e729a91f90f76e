use crate::enums::AssetType;
use crate::serializers::{string, steamid_as_string, bool_as_numeric_string};
use std::collections::HashSet;
use serde::Serialize;
use steamid_ng::SteamID;
use uuid::Uuid;

/// The form payload of an announcement. Numeric fields are sent as strings; `MatchableTypes`
/// is a JSON array of category codes embedded as a single form field.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnnounceRequest {
    #[serde(rename = "SteamID", serialize_with = "steamid_as_string")]
    pub steam_id: SteamID,
    /// Persistent identifier of this installation, stable across restarts.
    #[serde(rename = "Guid")]
    pub guid: Uuid,
    /// The bot's current nickname, or empty when unknown.
    #[serde(rename = "Nickname")]
    pub nickname: String,
    /// The bot's current avatar hash, or empty when unknown.
    #[serde(rename = "AvatarHash")]
    pub avatar_hash: String,
    /// The number of distinct apps with matchable items in the announced inventory.
    #[serde(rename = "GamesCount", with = "string")]
    pub games_count: usize,
    /// The total number of matchable items in the announced inventory.
    #[serde(rename = "ItemsCount", with = "string")]
    pub items_count: usize,
    #[serde(rename = "MatchableTypes")]
    pub matchable_types: String,
    #[serde(rename = "MatchEverything", serialize_with = "bool_as_numeric_string")]
    pub match_everything: bool,
    #[serde(rename = "TradeToken")]
    pub trade_token: String,
}

impl AnnounceRequest {
    /// Encodes a set of matchable categories as the JSON array the directory expects. Codes
    /// are sorted so the payload is stable across runs.
    pub fn matchable_types_payload(matchable_types: &HashSet<AssetType>) -> String {
        let mut codes = matchable_types
            .iter()
            .map(|asset_type| u8::from(*asset_type))
            .collect::<Vec<_>>();

        codes.sort_unstable();

        serde_json::to_string(&codes).unwrap_or_else(|_| String::from("[]"))
    }
}

/// The form payload of a heartbeat.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HeartbeatRequest {
    #[serde(rename = "SteamID", serialize_with = "steamid_as_string")]
    pub steam_id: SteamID,
    #[serde(rename = "Guid")]
    pub guid: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_announce_request() {
        let request = AnnounceRequest {
            steam_id: SteamID::from(76561198080179568u64),
            guid: Uuid::nil(),
            nickname: String::from("bot"),
            avatar_hash: String::new(),
            games_count: 50,
            items_count: 250,
            matchable_types: AnnounceRequest::matchable_types_payload(&HashSet::from([
                AssetType::TradingCard,
                AssetType::FoilTradingCard,
                AssetType::Emoticon,
            ])),
            match_everything: false,
            trade_token: String::from("ABC1"),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["SteamID"], "76561198080179568");
        assert_eq!(value["GamesCount"], "50");
        assert_eq!(value["ItemsCount"], "250");
        assert_eq!(value["MatchableTypes"], "[2,3,5]");
        assert_eq!(value["MatchEverything"], "0");
        assert_eq!(value["TradeToken"], "ABC1");
    }

    #[test]
    fn matchable_types_payload_is_sorted() {
        let payload = AnnounceRequest::matchable_types_payload(&HashSet::from([
            AssetType::ProfileBackground,
            AssetType::Emoticon,
        ]));

        assert_eq!(payload, "[2,4]");
    }
}
