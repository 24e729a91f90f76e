//! Contains types for common values in Steam responses.

use crate::enums::AssetType;

pub type AppId = u32;
pub type ContextId = u64;
pub type AssetId = u64;
pub type Amount = u32;
pub type ClassId = u64;
pub type TradeOfferId = u64;
/// The key identifying a collectable set. Two assets belong to the same set
/// iff they share the owning app and the asset type.
pub type SetKey = (AppId, AssetType);
