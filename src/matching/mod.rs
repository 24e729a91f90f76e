mod engine;
mod pair_finder;
mod state;

pub use engine::{
    MatchingEngine,
    MAX_MATCHED_BOTS_HARD,
    MAX_MATCHED_BOTS_SOFT,
    MAX_MATCHING_ROUNDS,
};
pub use state::InventoryState;
