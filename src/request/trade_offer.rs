use crate::response::Asset;
use crate::serializers::string;
use crate::types::{Amount, AppId, AssetId, ContextId};
use serde::Serialize;
use steamid_ng::SteamID;

/// A trade offer ready to be submitted through the trading collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTradeOffer {
    pub partner: SteamID,
    pub items_to_give: Vec<Item>,
    pub items_to_receive: Vec<Item>,
    pub message: Option<String>,
    /// Trade token of the partner. Required when the partner is not a friend.
    pub token: Option<String>,
    /// Skips checking whether the items would be held in escrow before submitting.
    pub skip_escrow_check: bool,
}

impl NewTradeOffer {
    pub fn is_empty(&self) -> bool {
        self.items_to_give.is_empty() &&
        self.items_to_receive.is_empty()
    }
}

/// A reference to an asset included in a trade offer.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Item {
    pub appid: AppId,
    #[serde(with = "string")]
    pub contextid: ContextId,
    #[serde(with = "string")]
    pub assetid: AssetId,
    #[serde(with = "string")]
    pub amount: Amount,
}

impl From<&Asset> for Item {
    fn from(asset: &Asset) -> Self {
        Self {
            appid: asset.appid,
            contextid: asset.contextid,
            assetid: asset.assetid,
            amount: asset.amount,
        }
    }
}
