//! The seam between this module and the surrounding trading agent. All external
//! collaborators (inventory retrieval, trade-offer dispatch, mobile confirmations, persona
//! requests) are reached through [`AgentBridge`].

use crate::enums::AssetType;
use crate::error::Error;
use crate::request::NewTradeOffer;
use crate::response::{Asset, SentOffer};
use crate::types::{SetKey, TradeOfferId};
use std::collections::HashSet;
use std::sync::Arc;
use async_trait::async_trait;
use steamid_ng::SteamID;
use tokio::sync::Mutex;

/// Filters applied when fetching an inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryQuery {
    pub steam_id: SteamID,
    /// Restrict to items that are currently tradable.
    pub tradable_only: bool,
    /// Restrict to items of these categories.
    pub wanted_types: Option<HashSet<AssetType>>,
    /// Restrict to items belonging to these sets.
    pub wanted_sets: Option<HashSet<SetKey>>,
    /// Exclude items belonging to these sets.
    pub skipped_sets: Option<HashSet<SetKey>>,
}

impl InventoryQuery {
    /// Tradable items of the given categories.
    pub fn tradable_of_types(steam_id: SteamID, wanted_types: HashSet<AssetType>) -> Self {
        Self {
            steam_id,
            tradable_only: true,
            wanted_types: Some(wanted_types),
            wanted_sets: None,
            skipped_sets: None,
        }
    }

    /// Tradable items belonging to `wanted_sets`, minus those in `skipped_sets`.
    pub fn tradable_of_sets(
        steam_id: SteamID,
        wanted_sets: HashSet<SetKey>,
        skipped_sets: HashSet<SetKey>,
    ) -> Self {
        Self {
            steam_id,
            tradable_only: true,
            wanted_types: None,
            wanted_sets: Some(wanted_sets),
            skipped_sets: if skipped_sets.is_empty() {
                None
            } else {
                Some(skipped_sets)
            },
        }
    }
}

/// External collaborators provided by the surrounding agent.
#[async_trait]
pub trait AgentBridge: Send + Sync {
    /// The bot's Steam ID.
    fn steamid(&self) -> SteamID;

    /// Whether the bot is currently connected and logged on.
    fn is_connected(&self) -> bool;

    /// Whether a mobile authenticator is bound to the account.
    fn has_mobile_authenticator(&self) -> bool;

    /// Whether the bot's inventory is publicly visible. This is a remote check and may fail
    /// transiently.
    async fn inventory_is_public(&self) -> Result<bool, Error>;

    /// Whether the account holds a valid web API key. This is a remote check and may fail
    /// transiently.
    async fn has_valid_api_key(&self) -> Result<bool, Error>;

    /// The token granting third parties the right to send this bot a trade offer.
    async fn trade_token(&self) -> Result<String, Error>;

    /// Fetches an inventory. An `Err` is a failed fetch, distinguished from an empty
    /// inventory.
    async fn fetch_inventory(&self, query: &InventoryQuery) -> Result<Vec<Asset>, Error>;

    /// Submits a trade offer.
    async fn send_trade_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer, Error>;

    /// Accepts pending mobile confirmations for the given trade offers.
    async fn accept_confirmations(&self, trade_offer_ids: &[TradeOfferId]) -> Result<(), Error>;

    /// Asks the platform to report this bot's current persona state. The eventual callback
    /// drives the announcement path.
    async fn request_persona_state(&self);

    /// Joins the given Steam group. Best effort.
    async fn join_group(&self, group_id: u64) -> Result<(), Error>;

    /// Whether trades with the given user are locally blacklisted.
    fn is_blacklisted(&self, steamid: SteamID) -> bool;

    /// The lock serializing all trading activity of the surrounding agent. Held for the
    /// duration of each matching round.
    fn trading_lock(&self) -> Arc<Mutex<()>>;
}
