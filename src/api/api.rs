use super::MatchingDirectory;
use crate::error::Error;
use crate::helpers::{
    USER_AGENT_STRING,
    check_response,
    get_default_middleware,
    get_single_attempt_middleware,
    parses_response,
};
use crate::request::{AnnounceRequest, HeartbeatRequest};
use crate::response::ListedUser;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;

pub const DEFAULT_HOSTNAME: &str = "https://api.steamitemmatcher.com";

/// HTTP client for the matching directory.
#[derive(Debug)]
pub struct DirectoryApi {
    /// Client for idempotent reads. Retries transient failures.
    client: ClientWithMiddleware,
    /// Client for announcement and heartbeat posts. These are attempted at most once, so no
    /// retry layer is attached.
    post_client: ClientWithMiddleware,
    hostname: String,
}

impl DirectoryApi {
    pub fn new() -> Self {
        Self::with_hostname(DEFAULT_HOSTNAME)
    }

    pub fn with_hostname<T>(hostname: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            client: get_default_middleware(USER_AGENT_STRING),
            post_client: get_single_attempt_middleware(USER_AGENT_STRING),
            hostname: hostname.into(),
        }
    }

    fn get_uri(&self, pathname: &str) -> String {
        format!("{}{}", self.hostname, pathname)
    }

    async fn post_announce(&self, request: &AnnounceRequest) -> Result<(), Error> {
        let uri = self.get_uri("/Api/Announce");
        let response = self.post_client.post(&uri)
            .form(request)
            .send()
            .await?;

        check_response(response).await?;

        Ok(())
    }

    async fn post_heartbeat(&self, request: &HeartbeatRequest) -> Result<(), Error> {
        let uri = self.get_uri("/Api/HeartBeat");
        let response = self.post_client.post(&uri)
            .form(request)
            .send()
            .await?;

        check_response(response).await?;

        Ok(())
    }

    async fn fetch_listed_users(&self) -> Result<Vec<ListedUser>, Error> {
        let uri = self.get_uri("/Api/Bots");
        let response = self.client.get(&uri)
            .send()
            .await?;
        let entries = parses_response::<Vec<serde_json::Value>>(response).await?;
        // Bad entries are dropped without failing the whole fetch.
        let users = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<ListedUser>(entry) {
                Ok(user) => Some(user),
                Err(error) => {
                    log::warn!("Dropping malformed directory entry: {error}");
                    None
                },
            })
            .collect();

        Ok(users)
    }
}

impl Default for DirectoryApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchingDirectory for DirectoryApi {
    async fn announce(&self, request: &AnnounceRequest) -> Result<(), Error> {
        self.post_announce(request).await
    }

    async fn heartbeat(&self, request: &HeartbeatRequest) -> Result<(), Error> {
        self.post_heartbeat(request).await
    }

    async fn get_listed_users(&self) -> Result<Vec<ListedUser>, Error> {
        self.fetch_listed_users().await
    }
}
