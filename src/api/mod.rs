mod api;

pub use api::{DirectoryApi, DEFAULT_HOSTNAME};

use crate::error::Error;
use crate::request::{AnnounceRequest, HeartbeatRequest};
use crate::response::ListedUser;
use async_trait::async_trait;

/// The announcement endpoint family of the matching directory.
#[async_trait]
pub trait MatchingDirectory: Send + Sync {
    /// Publishes the bot's listing. Attempted at most once per call.
    async fn announce(&self, request: &AnnounceRequest) -> Result<(), Error>;
    /// Refreshes the listing's liveness. Attempted at most once per call.
    async fn heartbeat(&self, request: &HeartbeatRequest) -> Result<(), Error>;
    /// Fetches all listed users.
    async fn get_listed_users(&self) -> Result<Vec<ListedUser>, Error>;
}
