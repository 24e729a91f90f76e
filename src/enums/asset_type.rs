use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};

/// The category of a Steam Community item. The numeric codes are the ones used on the wire by
/// the matching directory.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum AssetType {
    /// A catch-all for categories this module does not recognize.
    Unknown = 0,
    BoosterPack = 1,
    Emoticon = 2,
    FoilTradingCard = 3,
    ProfileBackground = 4,
    TradingCard = 5,
    SteamGems = 6,
    SaleItem = 7,
    Consumable = 8,
    ProfileModifier = 9,
    Sticker = 10,
    ChatEffect = 11,
    MiniProfileBackground = 12,
    AvatarProfileFrame = 13,
    AnimatedAvatar = 14,
    KeyboardSkin = 15,
}

impl AssetType {
    /// The categories accepted by the matching directory. Everything else is excluded at every
    /// boundary.
    pub const MATCHABLE: [AssetType; 4] = [
        AssetType::TradingCard,
        AssetType::FoilTradingCard,
        AssetType::Emoticon,
        AssetType::ProfileBackground,
    ];

    /// Whether the directory accepts items of this category.
    pub fn is_matchable(&self) -> bool {
        Self::MATCHABLE.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matchable_types() {
        assert!(AssetType::TradingCard.is_matchable());
        assert!(AssetType::FoilTradingCard.is_matchable());
        assert!(AssetType::Emoticon.is_matchable());
        assert!(AssetType::ProfileBackground.is_matchable());
        assert!(!AssetType::BoosterPack.is_matchable());
        assert!(!AssetType::Unknown.is_matchable());
    }

    #[test]
    fn converts_from_primitive() {
        assert_eq!(AssetType::try_from(5u8).unwrap(), AssetType::TradingCard);
        assert_eq!(u8::from(AssetType::FoilTradingCard), 3);
        assert!(AssetType::try_from(200u8).is_err());
    }
}
