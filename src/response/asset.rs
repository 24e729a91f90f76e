use crate::enums::AssetType;
use crate::serializers::string;
use crate::types::{Amount, AppId, AssetId, ClassId, ContextId, SetKey};
use serde::{Serialize, Deserialize};

/// An item in a Steam Community inventory. Assets are immutable values.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Asset {
    /// The app ID the inventory lives under e.g. `753` for Steam Community items.
    pub appid: AppId,
    /// The context ID.
    #[serde(with = "string")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(with = "string")]
    pub assetid: AssetId,
    /// The class ID, unique per item template.
    #[serde(with = "string")]
    pub classid: ClassId,
    /// The app the item actually belongs to e.g. `730` for a Counter-Strike trading card.
    pub real_appid: AppId,
    /// The category of the item.
    #[serde(rename = "type")]
    pub r#type: AssetType,
    /// The amount. If this item is not stackable the amount will be `1`.
    #[serde(with = "string")]
    pub amount: Amount,
    #[serde(default)]
    pub tradable: bool,
}

impl Asset {
    /// The key of the collectable set this asset belongs to.
    pub fn set_key(&self) -> SetKey {
        (self.real_appid, self.r#type)
    }
}
