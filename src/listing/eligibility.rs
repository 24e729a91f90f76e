use crate::bridge::AgentBridge;
use crate::config::BotConfig;

/// Whether the bot may participate in the matching directory.
///
/// Evaluates, in order and with short-circuit semantics: mobile authenticator bound, the
/// matcher trading preference enabled, configured matchable types overlapping the accepted
/// categories, inventory publicly visible, and a valid web API key. The last two are remote
/// checks; their transient failures report as ineligible rather than errors, and the caller
/// re-evaluates on the next tick. Results are never cached.
pub async fn is_eligible(bridge: &dyn AgentBridge, config: &BotConfig) -> bool {
    if !bridge.has_mobile_authenticator() {
        log::trace!("No mobile authenticator");
        return false;
    }

    if !config.trading_preferences.steam_trade_matcher {
        log::trace!("Matcher preference is not enabled");
        return false;
    }

    if config.accepted_matchable_types().is_empty() {
        log::trace!("No accepted matchable types configured");
        return false;
    }

    match bridge.inventory_is_public().await {
        Ok(true) => {},
        Ok(false) => {
            log::trace!("Inventory is not public");
            return false;
        },
        Err(error) => {
            log::trace!("Failed to check inventory visibility: {error}");
            return false;
        },
    }

    match bridge.has_valid_api_key().await {
        Ok(true) => true,
        Ok(false) => {
            log::trace!("No valid API key");
            false
        },
        Err(error) => {
            log::trace!("Failed to check API key: {error}");
            false
        },
    }
}
