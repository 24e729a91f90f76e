use crate::error::Error;
use reqwest::header;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
    RetryTransientMiddleware,
    policies::ExponentialBackoff,
};
use serde::de::DeserializeOwned;

pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// Builds a client which retries transient failures with exponential backoff. Suitable for
/// idempotent requests only.
pub fn get_default_middleware(user_agent_string: &'static str) -> ClientWithMiddleware {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

    ClientBuilder::new(build_client(user_agent_string))
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}

/// Builds a client with no retry layer. Requests made through this client are attempted at
/// most once.
pub fn get_single_attempt_middleware(user_agent_string: &'static str) -> ClientWithMiddleware {
    ClientBuilder::new(build_client(user_agent_string)).build()
}

fn build_client(user_agent_string: &'static str) -> reqwest::Client {
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    reqwest::ClientBuilder::new()
        .default_headers(headers)
        .build()
        // The builder only fails when passed malformed TLS or proxy settings, neither of which
        // is configured here.
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        return Err(Error::StatusCode(status));
    }

    Ok(response.bytes().await?)
}

pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, Error>
where
    D: DeserializeOwned
{
    let body = check_response(response).await?;

    serde_json::from_slice::<D>(&body).map_err(Error::Parse)
}
