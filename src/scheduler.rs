use crate::matching::MatchingEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// How often a matching pass runs.
pub const MATCH_ACTIVELY_PERIOD: Duration = Duration::from_secs(8 * 60 * 60);

const INITIAL_DELAY_BASE: Duration = Duration::from_secs(60 * 60);

/// The periodic trigger for active matching. Cancelling the timer (or dropping it) aborts
/// any matching pass in flight.
pub struct MatchTimer {
    handle: JoinHandle<()>,
}

impl MatchTimer {
    /// Schedules matching passes with an initial delay of one hour plus a per-bot stagger, so
    /// concurrent bots in the same process do not all contact the directory simultaneously.
    pub fn spawn(
        engine: Arc<MatchingEngine>,
        load_balancing_delay: Duration,
        bots_in_process: u32,
    ) -> Self {
        let initial_delay = INITIAL_DELAY_BASE + load_balancing_delay * bots_in_process;
        let handle = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + initial_delay, MATCH_ACTIVELY_PERIOD);

            loop {
                timer.tick().await;
                engine.match_actively().await;
            }
        });

        Self { handle }
    }

    /// Cancels the timer.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for MatchTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
