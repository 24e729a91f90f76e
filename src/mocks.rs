//! Shared test doubles for the collaborator seams.

use crate::api::MatchingDirectory;
use crate::bridge::{AgentBridge, InventoryQuery};
use crate::enums::AssetType;
use crate::error::Error;
use crate::request::{AnnounceRequest, HeartbeatRequest, NewTradeOffer};
use crate::response::{Asset, ListedUser, SentOffer};
use crate::types::{AppId, ClassId, TradeOfferId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use steamid_ng::SteamID;

/// Generates `count` trading cards with distinct class IDs spread across `apps` apps.
pub(crate) fn card_assets(count: u64, apps: u32) -> Vec<Asset> {
    (0..count)
        .map(|i| Asset {
            appid: 753,
            contextid: 6,
            assetid: 1000 + i,
            classid: 5000 + i,
            real_appid: 100 + (i as u32 % apps),
            r#type: AssetType::TradingCard,
            amount: 1,
            tradable: true,
        })
        .collect()
}

/// A single trading card.
pub(crate) fn card(assetid: u64, classid: ClassId, real_appid: AppId) -> Asset {
    Asset {
        appid: 753,
        contextid: 6,
        assetid,
        classid,
        real_appid,
        r#type: AssetType::TradingCard,
        amount: 1,
        tradable: true,
    }
}

pub(crate) struct MockBridge {
    pub steamid: SteamID,
    pub connected: bool,
    pub authenticator: bool,
    /// `None` scripts a transient remote failure.
    pub inventory_public: Option<bool>,
    pub api_key_valid: Option<bool>,
    pub trade_token: Option<String>,
    /// The bot's own inventory. `None` scripts a failed fetch.
    pub own_inventory: Option<Vec<Asset>>,
    /// Inventories of other users by Steam ID. Missing entries script failed fetches.
    pub other_inventories: HashMap<u64, Vec<Asset>>,
    pub blacklist: HashSet<u64>,
    pub offers_fail: bool,
    pub confirmations_fail: bool,
    pub inventory_queries: Mutex<Vec<InventoryQuery>>,
    pub sent_offers: Mutex<Vec<NewTradeOffer>>,
    pub confirmed: Mutex<Vec<TradeOfferId>>,
    pub persona_requests: AtomicUsize,
    pub joined_groups: Mutex<Vec<u64>>,
    pub inventory_public_checks: AtomicUsize,
    pub api_key_checks: AtomicUsize,
    pub connection_checks: AtomicUsize,
    pub trading_lock: Arc<tokio::sync::Mutex<()>>,
    pub next_offer_id: AtomicU64,
}

impl Default for MockBridge {
    fn default() -> Self {
        Self {
            steamid: SteamID::from(76561198000000001u64),
            connected: true,
            authenticator: true,
            inventory_public: Some(true),
            api_key_valid: Some(true),
            trade_token: Some(String::from("Token123")),
            own_inventory: Some(Vec::new()),
            other_inventories: HashMap::new(),
            blacklist: HashSet::new(),
            offers_fail: false,
            confirmations_fail: false,
            inventory_queries: Mutex::new(Vec::new()),
            sent_offers: Mutex::new(Vec::new()),
            confirmed: Mutex::new(Vec::new()),
            persona_requests: AtomicUsize::new(0),
            joined_groups: Mutex::new(Vec::new()),
            inventory_public_checks: AtomicUsize::new(0),
            api_key_checks: AtomicUsize::new(0),
            connection_checks: AtomicUsize::new(0),
            trading_lock: Arc::new(tokio::sync::Mutex::new(())),
            next_offer_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl AgentBridge for MockBridge {
    fn steamid(&self) -> SteamID {
        self.steamid
    }

    fn is_connected(&self) -> bool {
        self.connection_checks.fetch_add(1, Ordering::SeqCst);
        self.connected
    }

    fn has_mobile_authenticator(&self) -> bool {
        self.authenticator
    }

    async fn inventory_is_public(&self) -> Result<bool, Error> {
        self.inventory_public_checks.fetch_add(1, Ordering::SeqCst);
        self.inventory_public.ok_or(Error::ResponseUnsuccessful)
    }

    async fn has_valid_api_key(&self) -> Result<bool, Error> {
        self.api_key_checks.fetch_add(1, Ordering::SeqCst);
        self.api_key_valid.ok_or(Error::ResponseUnsuccessful)
    }

    async fn trade_token(&self) -> Result<String, Error> {
        self.trade_token.clone().ok_or(Error::ResponseUnsuccessful)
    }

    async fn fetch_inventory(&self, query: &InventoryQuery) -> Result<Vec<Asset>, Error> {
        self.inventory_queries.lock().unwrap().push(query.clone());

        if query.steam_id == self.steamid {
            self.own_inventory.clone().ok_or(Error::ResponseUnsuccessful)
        } else {
            self.other_inventories
                .get(&u64::from(query.steam_id))
                .cloned()
                .ok_or(Error::ResponseUnsuccessful)
        }
    }

    async fn send_trade_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer, Error> {
        if self.offers_fail {
            return Err(Error::TradeOffer(String::from("Fail")));
        }

        self.sent_offers.lock().unwrap().push(offer.clone());

        Ok(SentOffer {
            tradeofferid: self.next_offer_id.fetch_add(1, Ordering::SeqCst),
            needs_mobile_confirmation: true,
        })
    }

    async fn accept_confirmations(&self, trade_offer_ids: &[TradeOfferId]) -> Result<(), Error> {
        if self.confirmations_fail {
            return Err(Error::ConfirmationUnsuccessful(trade_offer_ids[0]));
        }

        self.confirmed.lock().unwrap().extend_from_slice(trade_offer_ids);

        Ok(())
    }

    async fn request_persona_state(&self) {
        self.persona_requests.fetch_add(1, Ordering::SeqCst);
    }

    async fn join_group(&self, group_id: u64) -> Result<(), Error> {
        self.joined_groups.lock().unwrap().push(group_id);

        Ok(())
    }

    fn is_blacklisted(&self, steamid: SteamID) -> bool {
        self.blacklist.contains(&u64::from(steamid))
    }

    fn trading_lock(&self) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(&self.trading_lock)
    }
}

pub(crate) struct MockDirectory {
    pub announce_ok: bool,
    pub heartbeat_ok: bool,
    pub listed_users: Vec<ListedUser>,
    pub announces: Mutex<Vec<AnnounceRequest>>,
    pub heartbeats: Mutex<Vec<HeartbeatRequest>>,
    pub listing_fetches: AtomicUsize,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self {
            announce_ok: true,
            heartbeat_ok: true,
            listed_users: Vec::new(),
            announces: Mutex::new(Vec::new()),
            heartbeats: Mutex::new(Vec::new()),
            listing_fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MatchingDirectory for MockDirectory {
    async fn announce(&self, request: &AnnounceRequest) -> Result<(), Error> {
        if !self.announce_ok {
            return Err(Error::ResponseUnsuccessful);
        }

        self.announces.lock().unwrap().push(request.clone());

        Ok(())
    }

    async fn heartbeat(&self, request: &HeartbeatRequest) -> Result<(), Error> {
        if !self.heartbeat_ok {
            return Err(Error::ResponseUnsuccessful);
        }

        self.heartbeats.lock().unwrap().push(request.clone());

        Ok(())
    }

    async fn get_listed_users(&self) -> Result<Vec<ListedUser>, Error> {
        self.listing_fetches.fetch_add(1, Ordering::SeqCst);

        Ok(self.listed_users.clone())
    }
}
