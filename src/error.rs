//! Error types.

use crate::types::TradeOfferId;

/// Any range of errors encountered when making requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An input parameter is missing or invalid.
    #[error("Invalid parameter: {}", .0)]
    Parameter(#[from] ParameterError),
    /// An error was encountered making a request.
    #[error("reqwest error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    /// An error was encountered within the request middleware.
    #[error("reqwest middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    /// An error was encountered parsing a JSON response body.
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    /// An error was encountered on response. This is a response with an HTTP code other than 200.
    #[error("Error {}", .0)]
    StatusCode(reqwest::StatusCode),
    /// A response returned a JSON response where `success` is `false`.
    #[error("Response unsuccessful")]
    ResponseUnsuccessful,
    /// An error was encountered when sending a trade offer.
    #[error("Trade error: {}", .0)]
    TradeOffer(String),
    /// A confirmation could not be confirmed for the given trade offer. The trade is in an
    /// ambiguous state; check confirmations again to verify.
    #[error("Confirmation unsuccessful for offer {}", .0)]
    ConfirmationUnsuccessful(TradeOfferId),
}

/// Any number of issues with a provided parameter.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    /// The listed user holds no items. Its desirability score cannot be computed.
    #[error("Listed user {} has an items count of zero.", .0)]
    ZeroItemsCount(u64),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}
