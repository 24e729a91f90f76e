use crate::enums::AssetType;
use crate::error::ParameterError;
use std::collections::HashSet;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer, Deserialize};
use steamid_ng::SteamID;

/// One entry of the matching directory: a user listed as available for matching.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawListedUser")]
pub struct ListedUser {
    /// The user's Steam ID.
    pub steam_id: SteamID,
    /// Token granting the right to send this user a trade offer.
    pub trade_token: String,
    /// The number of distinct apps the user holds matchable items for.
    pub games_count: u16,
    /// The total number of matchable items the user holds.
    pub items_count: u16,
    /// The item categories this user is willing to match.
    pub matchable_types: HashSet<AssetType>,
    /// Whether the user accepts any 1-for-1 same-set exchange.
    pub match_everything: bool,
    score: f64,
}

impl ListedUser {
    /// Creates a listed user. Fails when `items_count` is zero since the desirability score is
    /// undefined for an empty listing.
    pub fn new(
        steam_id: SteamID,
        trade_token: String,
        games_count: u16,
        items_count: u16,
        matchable_types: HashSet<AssetType>,
        match_everything: bool,
    ) -> Result<Self, ParameterError> {
        if items_count == 0 {
            return Err(ParameterError::ZeroItemsCount(u64::from(steam_id)));
        }

        Ok(Self {
            steam_id,
            trade_token,
            games_count,
            items_count,
            matchable_types,
            match_everything,
            score: f64::from(games_count) / f64::from(items_count),
        })
    }

    /// The user's desirability as a dump target. Higher for users holding few items spread
    /// across many apps. Computed once at decode.
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// The on-the-wire form of a directory entry. Every field is required; entries with a missing
/// field are rejected.
#[derive(Deserialize)]
struct RawListedUser {
    steam_id: u64,
    trade_token: String,
    games_count: u16,
    items_count: u16,
    matchable_backgrounds: u8,
    matchable_cards: u8,
    matchable_emoticons: u8,
    matchable_foil_cards: u8,
    match_everything: u8,
}

/// Reads a `0`/`1` wire flag. Any other value is tolerated with a warning and reads as unset.
fn read_flag(steam_id: u64, field: &'static str, value: u8) -> bool {
    match value {
        0 => false,
        1 => true,
        other => {
            log::warn!("Listed user {steam_id} has unrecognized value {other} for {field}; ignoring");
            false
        },
    }
}

impl TryFrom<RawListedUser> for ListedUser {
    type Error = ParameterError;

    fn try_from(raw: RawListedUser) -> Result<Self, Self::Error> {
        let mut matchable_types = HashSet::new();

        if read_flag(raw.steam_id, "matchable_cards", raw.matchable_cards) {
            matchable_types.insert(AssetType::TradingCard);
        }

        if read_flag(raw.steam_id, "matchable_foil_cards", raw.matchable_foil_cards) {
            matchable_types.insert(AssetType::FoilTradingCard);
        }

        if read_flag(raw.steam_id, "matchable_emoticons", raw.matchable_emoticons) {
            matchable_types.insert(AssetType::Emoticon);
        }

        if read_flag(raw.steam_id, "matchable_backgrounds", raw.matchable_backgrounds) {
            matchable_types.insert(AssetType::ProfileBackground);
        }

        Self::new(
            SteamID::from(raw.steam_id),
            raw.trade_token,
            raw.games_count,
            raw.items_count,
            matchable_types,
            read_flag(raw.steam_id, "match_everything", raw.match_everything),
        )
    }
}

impl Serialize for ListedUser {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        fn flag(present: bool) -> u8 {
            u8::from(present)
        }

        let mut entry = serializer.serialize_struct("ListedUser", 9)?;

        entry.serialize_field("steam_id", &u64::from(self.steam_id))?;
        entry.serialize_field("trade_token", &self.trade_token)?;
        entry.serialize_field("games_count", &self.games_count)?;
        entry.serialize_field("items_count", &self.items_count)?;
        entry.serialize_field("matchable_backgrounds", &flag(self.matchable_types.contains(&AssetType::ProfileBackground)))?;
        entry.serialize_field("matchable_cards", &flag(self.matchable_types.contains(&AssetType::TradingCard)))?;
        entry.serialize_field("matchable_emoticons", &flag(self.matchable_types.contains(&AssetType::Emoticon)))?;
        entry.serialize_field("matchable_foil_cards", &flag(self.matchable_types.contains(&AssetType::FoilTradingCard)))?;
        entry.serialize_field("match_everything", &flag(self.match_everything))?;
        entry.end()
    }
}
