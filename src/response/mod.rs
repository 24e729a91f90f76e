mod asset;
mod listed_user;
mod sent_offer;

pub use asset::Asset;
pub use listed_user::ListedUser;
pub use sent_offer::SentOffer;
