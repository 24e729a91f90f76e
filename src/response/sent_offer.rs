use crate::serializers::string;
use crate::types::TradeOfferId;
use serde::{Serialize, Deserialize};

/// The result of submitting a trade offer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct SentOffer {
    /// The ID of the newly created trade offer.
    #[serde(with = "string")]
    pub tradeofferid: TradeOfferId,
    /// Whether the offer still requires a mobile confirmation before it is visible to the
    /// recipient.
    #[serde(default)]
    pub needs_mobile_confirmation: bool,
}
