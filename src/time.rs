use std::time::SystemTime;
use chrono::{DateTime, Utc};

/// The datetime format used for requests and lifecycle clocks.
pub type ServerTime = DateTime<Utc>;

/// Converts a unix timestamp to a [`DateTime`].
pub fn timestamp_to_server_time(timestamp: i64) -> ServerTime {
    DateTime::from_timestamp(
        timestamp,
        0,
    ).unwrap_or_default()
}

/// Gets current time.
pub fn get_server_time_now() -> ServerTime {
    ServerTime::from(SystemTime::now())
}

/// The zero epoch. Lifecycle clocks start here so that every time-to-live
/// gate passes on the first evaluation.
pub fn epoch() -> ServerTime {
    timestamp_to_server_time(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_before_now() {
        assert!(epoch() < get_server_time_now());
    }

    #[test]
    fn converts_timestamp() {
        let datetime = timestamp_to_server_time(1577836800);

        assert_eq!(datetime.timestamp(), 1577836800);
    }
}
