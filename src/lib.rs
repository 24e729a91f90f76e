mod config;
mod helpers;
mod scheduler;
mod serializers;

#[cfg(test)]
mod mocks;

pub mod api;
pub mod bridge;
pub mod enums;
pub mod error;
pub mod listing;
pub mod matching;
pub mod request;
pub mod response;
pub mod time;
pub mod types;

pub use api::{DirectoryApi, MatchingDirectory};
pub use bridge::{AgentBridge, InventoryQuery};
pub use config::{BotConfig, TradingPreferences};
pub use listing::ListingController;
pub use matching::MatchingEngine;
pub use response::{Asset, ListedUser};
pub use scheduler::MatchTimer;
pub use time::ServerTime;

pub use steamid_ng::SteamID;
