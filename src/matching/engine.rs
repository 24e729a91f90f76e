use super::pair_finder;
use super::state::InventoryState;
use crate::bridge::{AgentBridge, InventoryQuery};
use crate::api::MatchingDirectory;
use crate::config::BotConfig;
use crate::enums::AssetType;
use crate::listing::is_eligible;
use crate::request::{Item, NewTradeOffer};
use crate::response::{Asset, ListedUser};
use crate::types::{Amount, AssetId, ClassId, SetKey};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// At most this many listed users are visited per round.
pub const MAX_MATCHED_BOTS_HARD: usize = 40;
/// The round gives up after this many consecutive users yielded no exchange.
pub const MAX_MATCHED_BOTS_SOFT: usize = 20;
/// At most this many rounds per matching pass.
pub const MAX_MATCHING_ROUNDS: usize = 10;

/// Pause between rounds, giving counterparties time to accept.
const ROUND_DELAY: Duration = Duration::from_secs(5 * 60);

/// Runs duplicate-reduction matching rounds against other listed users: a greedy bipartite
/// exchange that trades away surplus duplicates in return for items the bot is missing in the
/// same set, without ever worsening its own inventory distribution.
pub struct MatchingEngine {
    bridge: Arc<dyn AgentBridge>,
    directory: Arc<dyn MatchingDirectory>,
    config: Arc<BotConfig>,
    /// At most one matching pass per bot at a time; re-entry is refused without waiting.
    match_actively_lock: Mutex<()>,
}

impl MatchingEngine {
    pub fn new(
        bridge: Arc<dyn AgentBridge>,
        directory: Arc<dyn MatchingDirectory>,
        config: Arc<BotConfig>,
    ) -> Self {
        Self {
            bridge,
            directory,
            config,
            match_actively_lock: Mutex::new(()),
        }
    }

    /// Runs a matching pass of up to [`MAX_MATCHING_ROUNDS`] rounds, stopping early once a
    /// round makes no progress. Each round runs under the agent's trading lock, serialized
    /// against other trading activity.
    pub async fn match_actively(&self) {
        if !self.guards_hold().await {
            return;
        }

        let accepted_types = self.config.accepted_matchable_types();

        if accepted_types.is_empty() {
            log::error!("Configured matchable types do not intersect the accepted categories");
            return;
        }

        let Ok(_guard) = self.match_actively_lock.try_lock() else {
            log::trace!("A matching pass is already in progress");
            return;
        };

        for round in 0..MAX_MATCHING_ROUNDS {
            if round > 0 {
                tokio::time::sleep(ROUND_DELAY).await;

                if !self.guards_hold().await {
                    break;
                }
            }

            let trading_lock = self.bridge.trading_lock();
            let _trading = trading_lock.lock().await;
            let made_progress = self.match_actively_round(&accepted_types).await;

            log::debug!("Finished matching round {}, progress: {made_progress}", round + 1);

            if !made_progress {
                break;
            }
        }
    }

    async fn guards_hold(&self) -> bool {
        if !self.bridge.is_connected() {
            log::trace!("Not connected");
            return false;
        }

        let preferences = self.config.trading_preferences;

        if !preferences.match_actively {
            log::trace!("Active matching is not enabled");
            return false;
        }

        if preferences.match_everything {
            // Match-everything accounts are matched passively by their counterparties.
            log::trace!("Match-everything accounts do not match actively");
            return false;
        }

        if !is_eligible(&*self.bridge, &self.config).await {
            log::trace!("Not eligible for matching");
            return false;
        }

        true
    }

    /// Runs a single round. Returns whether any set was exchanged, which is the signal to
    /// keep going.
    async fn match_actively_round(&self, accepted_types: &HashSet<AssetType>) -> bool {
        let our_steamid = self.bridge.steamid();
        let query = InventoryQuery::tradable_of_types(our_steamid, accepted_types.clone());
        let our_assets = match self.bridge.fetch_inventory(&query).await {
            Ok(assets) if !assets.is_empty() => assets,
            Ok(_) => {
                log::debug!("Own inventory holds no matchable items");
                return false;
            },
            Err(error) => {
                log::trace!("Failed to fetch own inventory: {error}");
                return false;
            },
        };
        let mut our_state = InventoryState::from_assets(&our_assets);

        if !our_state.has_surplus() {
            log::debug!("No duplicates to trade away");
            return false;
        }

        let listed_users = match self.directory.get_listed_users().await {
            Ok(users) if !users.is_empty() => users,
            Ok(_) => {
                log::debug!("The directory listed no users");
                return false;
            },
            Err(error) => {
                log::trace!("Failed to fetch listed users: {error}");
                return false;
            },
        };
        let candidates = self.select_candidates(&listed_users, accepted_types);
        let mut skipped_sets_round: HashSet<SetKey> = HashSet::new();
        let mut given_asset_ids: HashSet<AssetId> = HashSet::new();
        let mut empty_matches = 0;

        'users: for user in candidates {
            let their_query = InventoryQuery::tradable_of_sets(
                user.steam_id,
                our_state.set_keys(),
                skipped_sets_round.clone(),
            );
            let their_assets = match self.bridge.fetch_inventory(&their_query).await {
                Ok(assets) if !assets.is_empty() => assets,
                Ok(_) => {
                    log::trace!("User {} has nothing we want", u64::from(user.steam_id));
                    continue;
                },
                Err(error) => {
                    log::trace!(
                        "Failed to fetch inventory of {}: {error}",
                        u64::from(user.steam_id),
                    );
                    continue;
                },
            };
            let mut their_state = InventoryState::from_assets(&their_assets);
            let mut taken_asset_ids: HashSet<AssetId> = HashSet::new();
            let mut skipped_sets_user: HashSet<SetKey> = HashSet::new();

            'offers: for _ in 0..self.config.max_trades_per_account {
                let mut give: HashMap<ClassId, Amount> = HashMap::new();
                let mut take: HashMap<ClassId, Amount> = HashMap::new();
                let mut items_in_trade = 0;

                for set_key in our_state.sorted_set_keys() {
                    if skipped_sets_user.contains(&set_key) {
                        continue;
                    }

                    if !user.matchable_types.contains(&set_key.1) {
                        continue;
                    }

                    if !our_state.set_has_surplus(&set_key) {
                        continue;
                    }

                    let Some(theirs) = their_state.get_mut(&set_key) else {
                        continue;
                    };
                    let Some(ours) = our_state.get_mut(&set_key) else {
                        continue;
                    };
                    let matched = pair_finder::match_set(
                        ours,
                        theirs,
                        &mut give,
                        &mut take,
                        &mut items_in_trade,
                        self.config.max_items_per_trade,
                    );

                    if matched {
                        skipped_sets_user.insert(set_key);
                    }

                    if items_in_trade >= self.config.max_items_per_trade.saturating_sub(1) {
                        break;
                    }
                }

                if give.is_empty() && take.is_empty() {
                    empty_matches += 1;

                    if empty_matches >= MAX_MATCHED_BOTS_SOFT {
                        log::debug!("Giving up on the round after {empty_matches} users without an exchange");
                        return !skipped_sets_round.is_empty();
                    }

                    break 'offers;
                }

                empty_matches = 0;

                let offer = NewTradeOffer {
                    partner: user.steam_id,
                    items_to_give: select_items(&our_assets, &give, &mut given_asset_ids),
                    items_to_receive: select_items(&their_assets, &take, &mut taken_asset_ids),
                    message: None,
                    token: Some(user.trade_token.clone()),
                    skip_escrow_check: true,
                };

                if offer.is_empty() {
                    // The matched counts no longer resolve to concrete assets, so the
                    // inventory snapshot is inconsistent with the matched state.
                    log::error!(
                        "Matched counts resolved to an empty offer for {}; skipping user",
                        u64::from(user.steam_id),
                    );
                    break 'offers;
                }

                match self.bridge.send_trade_offer(&offer).await {
                    Ok(sent) => {
                        log::debug!(
                            "Sent trade offer {} to {}",
                            sent.tradeofferid,
                            u64::from(user.steam_id),
                        );

                        if sent.needs_mobile_confirmation && self.bridge.has_mobile_authenticator() {
                            if let Err(error) = self.bridge.accept_confirmations(&[sent.tradeofferid]).await {
                                // The submitted trade is now in an ambiguous state, fatal
                                // to the round.
                                log::warn!("Failed to confirm trade offer {}: {error}", sent.tradeofferid);
                                return false;
                            }
                        }
                    },
                    Err(error) => {
                        // The speculative state changes are kept for the next attempt.
                        log::trace!(
                            "Failed to send trade offer to {}: {error}",
                            u64::from(user.steam_id),
                        );
                    },
                }
            }

            for set_key in &skipped_sets_user {
                our_state.remove_set(set_key);
            }

            skipped_sets_round.extend(skipped_sets_user);

            if !our_state.has_surplus() {
                break 'users;
            }
        }

        !skipped_sets_round.is_empty()
    }

    /// Users worth trading with, most desirable first, capped at
    /// [`MAX_MATCHED_BOTS_HARD`]. Only match-everything users overlapping our accepted
    /// categories are considered.
    fn select_candidates<'a>(
        &self,
        listed_users: &'a [ListedUser],
        accepted_types: &HashSet<AssetType>,
    ) -> Vec<&'a ListedUser> {
        let our_steamid = self.bridge.steamid();
        let mut candidates = listed_users
            .iter()
            .filter(|user| {
                user.match_everything
                    && user.steam_id != our_steamid
                    && user.matchable_types.iter().any(|asset_type| accepted_types.contains(asset_type))
                    && !self.bridge.is_blacklisted(user.steam_id)
            })
            .collect::<Vec<_>>();

        candidates.sort_unstable_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then_with(|| u64::from(a.steam_id).cmp(&u64::from(b.steam_id)))
        });
        candidates.truncate(MAX_MATCHED_BOTS_HARD);
        candidates
    }
}

/// Resolves per-class counts back to concrete assets, skipping assets already committed to an
/// earlier offer. Assets are visited in a fixed order so a run is deterministic.
fn select_items(
    assets: &[Asset],
    wanted: &HashMap<ClassId, Amount>,
    used_asset_ids: &mut HashSet<AssetId>,
) -> Vec<Item> {
    let mut remaining = wanted.clone();
    let mut candidates = assets.iter().collect::<Vec<_>>();

    candidates.sort_unstable_by_key(|asset| asset.assetid);

    let mut items = Vec::new();

    for asset in candidates {
        if used_asset_ids.contains(&asset.assetid) {
            continue;
        }

        let Some(needed) = remaining.get_mut(&asset.classid) else {
            continue;
        };

        if *needed == 0 {
            continue;
        }

        let amount = (*needed).min(asset.amount);

        *needed -= amount;
        used_asset_ids.insert(asset.assetid);
        items.push(Item {
            amount,
            ..Item::from(asset)
        });
    }

    items
}
