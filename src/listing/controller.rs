use super::eligibility;
use crate::api::MatchingDirectory;
use crate::bridge::{AgentBridge, InventoryQuery};
use crate::config::BotConfig;
use crate::request::{AnnounceRequest, HeartbeatRequest};
use crate::time::{self, ServerTime};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use uuid::Uuid;

/// The Steam group of the matching directory, joined after the first successful
/// announcement.
pub const DIRECTORY_GROUP_ID: u64 = 103582791440160998;

const MIN_ANNOUNCEMENT_CHECK_TTL_SECS: i64 = 6 * 60 * 60;
const MIN_HEARTBEAT_TTL_SECS: i64 = 10 * 60;
const MIN_PERSONA_STATE_TTL_SECS: i64 = 8 * 60 * 60;

/// Publishes the bot to the matching directory and keeps the listing alive.
///
/// Announcements are driven by persona-state callbacks and gated by a six-hour
/// time-to-live; heartbeats ride the agent's periodic tick and refresh liveness every ten
/// minutes while the last announcement is known good.
pub struct ListingController {
    bridge: Arc<dyn AgentBridge>,
    directory: Arc<dyn MatchingDirectory>,
    config: Arc<BotConfig>,
    /// Persistent identifier of this installation, stable across restarts.
    guid: Uuid,
    /// Serializes the announcement and heartbeat request paths. Gates are re-evaluated
    /// after acquisition so two coincident events cannot both send a request.
    requests_lock: Mutex<()>,
    /// Written only while `requests_lock` is held.
    clocks: RwLock<LifecycleClocks>,
    joined_group: AtomicBool,
}

#[derive(Debug, Clone)]
struct LifecycleClocks {
    last_announcement_check: ServerTime,
    last_heartbeat: ServerTime,
    last_persona_state_request: ServerTime,
    /// True only while the most recent announcement succeeded.
    should_send_heartbeats: bool,
}

impl Default for LifecycleClocks {
    fn default() -> Self {
        Self {
            last_announcement_check: time::epoch(),
            last_heartbeat: time::epoch(),
            last_persona_state_request: time::epoch(),
            should_send_heartbeats: false,
        }
    }
}

fn elapsed_secs(since: ServerTime, now: ServerTime) -> i64 {
    now.timestamp() - since.timestamp()
}

impl ListingController {
    pub fn new(
        bridge: Arc<dyn AgentBridge>,
        directory: Arc<dyn MatchingDirectory>,
        config: Arc<BotConfig>,
        guid: Uuid,
    ) -> Self {
        Self {
            bridge,
            directory,
            config,
            guid,
            requests_lock: Mutex::new(()),
            clocks: RwLock::new(LifecycleClocks::default()),
            joined_group: AtomicBool::new(false),
        }
    }

    /// Invoked by the agent's periodic heartbeat. Requests a persona refresh when an
    /// announcement check is due, and refreshes the listing's liveness.
    pub async fn on_heartbeat_tick(&self) {
        self.maybe_request_persona_state().await;
        self.maybe_send_heartbeat().await;
    }

    /// Invoked when the platform reports a profile change for this bot. Drives the
    /// announcement path.
    pub async fn on_persona_state(&self, nickname: Option<&str>, avatar_hash: Option<&str>) {
        let announcement_due = {
            let clocks = self.clocks.read().unwrap();

            elapsed_secs(clocks.last_announcement_check, time::get_server_time_now())
                >= MIN_ANNOUNCEMENT_CHECK_TTL_SECS
        };

        if !announcement_due {
            return;
        }

        let _guard = self.requests_lock.lock().await;
        let now = time::get_server_time_now();
        let still_due = {
            let clocks = self.clocks.read().unwrap();

            elapsed_secs(clocks.last_announcement_check, now) >= MIN_ANNOUNCEMENT_CHECK_TTL_SECS
        };

        if !still_due {
            return;
        }

        self.try_announce(now, nickname, avatar_hash).await;
    }

    /// A persona refresh is requested when both the persona clock and the announcement clock
    /// have expired. The refresh races an announcement check: the eventual persona-state
    /// callback drives [`ListingController::on_persona_state`].
    async fn maybe_request_persona_state(&self) {
        let refresh_due = |clocks: &LifecycleClocks, now: ServerTime| {
            elapsed_secs(clocks.last_persona_state_request, now) > MIN_PERSONA_STATE_TTL_SECS
                && elapsed_secs(clocks.last_announcement_check, now) > MIN_ANNOUNCEMENT_CHECK_TTL_SECS
        };
        let due = {
            let clocks = self.clocks.read().unwrap();

            refresh_due(&clocks, time::get_server_time_now())
        };

        if !due {
            return;
        }

        let _guard = self.requests_lock.lock().await;
        let now = time::get_server_time_now();
        let still_due = {
            let clocks = self.clocks.read().unwrap();

            refresh_due(&clocks, now)
        };

        if !still_due {
            return;
        }

        self.clocks.write().unwrap().last_persona_state_request = now;
        self.bridge.request_persona_state().await;
    }

    async fn maybe_send_heartbeat(&self) {
        let heartbeat_due = |clocks: &LifecycleClocks, now: ServerTime| {
            clocks.should_send_heartbeats
                && elapsed_secs(clocks.last_heartbeat, now) >= MIN_HEARTBEAT_TTL_SECS
        };
        let due = {
            let clocks = self.clocks.read().unwrap();

            heartbeat_due(&clocks, time::get_server_time_now())
        };

        if !due {
            return;
        }

        let _guard = self.requests_lock.lock().await;
        let now = time::get_server_time_now();
        let still_due = {
            let clocks = self.clocks.read().unwrap();

            heartbeat_due(&clocks, now)
        };

        if !still_due {
            return;
        }

        let request = HeartbeatRequest {
            steam_id: self.bridge.steamid(),
            guid: self.guid,
        };

        match self.directory.heartbeat(&request).await {
            Ok(()) => {
                self.clocks.write().unwrap().last_heartbeat = now;
            },
            Err(error) => {
                // Best effort. The clock stays put and the next tick retries.
                log::trace!("Heartbeat failed: {error}");
            },
        }
    }

    /// The announcement path. Callers hold `requests_lock` and have verified the
    /// announcement gate.
    async fn try_announce(&self, now: ServerTime, nickname: Option<&str>, avatar_hash: Option<&str>) {
        if !eligibility::is_eligible(&*self.bridge, &self.config).await {
            self.finish_announcement_check(now);
            return;
        }

        let trade_token = match self.bridge.trade_token().await {
            Ok(token) if !token.is_empty() => token,
            Ok(_) => {
                log::debug!("Trade token is empty");
                self.finish_announcement_check(now);
                return;
            },
            Err(error) => {
                log::trace!("Failed to obtain trade token: {error}");
                self.finish_announcement_check(now);
                return;
            },
        };
        let matchable_types = self.config.accepted_matchable_types();

        if matchable_types.is_empty() {
            log::error!("Configured matchable types do not intersect the accepted categories");
            self.finish_announcement_check(now);
            return;
        }

        let query = InventoryQuery::tradable_of_types(self.bridge.steamid(), matchable_types.clone());
        let inventory = match self.bridge.fetch_inventory(&query).await {
            Ok(inventory) => inventory,
            Err(error) => {
                // The check clock is left untouched so the next persona-state callback
                // retries immediately.
                log::trace!("Failed to fetch own inventory: {error}");
                self.clocks.write().unwrap().should_send_heartbeats = false;
                return;
            },
        };

        if inventory.len() < self.config.min_items_count {
            log::debug!(
                "Inventory holds {} matchable items, below the announce threshold of {}",
                inventory.len(),
                self.config.min_items_count,
            );
            self.finish_announcement_check(now);
            return;
        }

        let games_count = inventory
            .iter()
            .map(|asset| asset.real_appid)
            .collect::<HashSet<_>>()
            .len();
        let request = AnnounceRequest {
            steam_id: self.bridge.steamid(),
            guid: self.guid,
            nickname: nickname.unwrap_or_default().to_string(),
            avatar_hash: avatar_hash.unwrap_or_default().to_string(),
            games_count,
            items_count: inventory.len(),
            matchable_types: AnnounceRequest::matchable_types_payload(&matchable_types),
            match_everything: self.config.trading_preferences.match_everything,
            trade_token,
        };

        match self.directory.announce(&request).await {
            Ok(()) => {
                {
                    let mut clocks = self.clocks.write().unwrap();

                    clocks.last_announcement_check = now;
                    clocks.should_send_heartbeats = true;
                }

                log::debug!("Announced {} matchable items", request.items_count);
                self.join_directory_group().await;
            },
            Err(error) => {
                // The POST is attempted at most once. The check clock is left untouched so
                // the next persona-state callback retries.
                log::trace!("Announcement failed: {error}");
                self.clocks.write().unwrap().should_send_heartbeats = false;
            },
        }
    }

    /// Marks the announcement check done without a live listing.
    fn finish_announcement_check(&self, now: ServerTime) {
        let mut clocks = self.clocks.write().unwrap();

        clocks.last_announcement_check = now;
        clocks.should_send_heartbeats = false;
    }

    async fn join_directory_group(&self) {
        if self.joined_group.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(error) = self.bridge.join_group(DIRECTORY_GROUP_ID).await {
            log::debug!("Failed to join the directory group: {error}");
        }
    }
}
