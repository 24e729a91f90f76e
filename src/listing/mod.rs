mod controller;
mod eligibility;

pub use controller::{ListingController, DIRECTORY_GROUP_ID};
pub use eligibility::is_eligible;
