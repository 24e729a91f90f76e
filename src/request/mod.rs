mod announcement;
mod trade_offer;

pub use announcement::{AnnounceRequest, HeartbeatRequest};
pub use trade_offer::{Item, NewTradeOffer};
