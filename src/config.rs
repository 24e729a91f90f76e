use crate::enums::AssetType;
use std::collections::HashSet;
use serde::{Serialize, Deserialize};

/// Trading preference flags from the bot's configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingPreferences {
    /// Participate in the public matching directory.
    pub steam_trade_matcher: bool,
    /// Periodically run duplicate-reduction matching rounds against listed users.
    pub match_actively: bool,
    /// Accept any 1-for-1 same-set exchange. This strategy is handled by a different
    /// subsystem; active matching refuses to run when it is set.
    pub match_everything: bool,
}

/// Per-bot configuration consumed by this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// The item categories this bot is willing to match.
    pub matchable_types: HashSet<AssetType>,
    pub trading_preferences: TradingPreferences,
    /// Inventories with fewer matchable items than this are not announced.
    pub min_items_count: usize,
    /// Maximum number of trade offers sent to a single account per matching round.
    pub max_trades_per_account: usize,
    /// Maximum number of items in a single trade offer.
    pub max_items_per_trade: usize,
}

impl BotConfig {
    /// The configured matchable types intersected with the categories the directory accepts.
    pub fn accepted_matchable_types(&self) -> HashSet<AssetType> {
        self.matchable_types
            .iter()
            .copied()
            .filter(AssetType::is_matchable)
            .collect()
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            matchable_types: HashSet::from(AssetType::MATCHABLE),
            trading_preferences: TradingPreferences::default(),
            min_items_count: 100,
            max_trades_per_account: 5,
            max_items_per_trade: 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_types_excludes_unmatchable() {
        let config = BotConfig {
            matchable_types: HashSet::from([
                AssetType::TradingCard,
                AssetType::BoosterPack,
                AssetType::SteamGems,
            ]),
            ..BotConfig::default()
        };

        assert_eq!(config.accepted_matchable_types(), HashSet::from([AssetType::TradingCard]));
    }

    #[test]
    fn default_config_accepts_all_matchable_types() {
        let config = BotConfig::default();

        assert_eq!(config.accepted_matchable_types().len(), 4);
        assert_eq!(config.min_items_count, 100);
    }
}
