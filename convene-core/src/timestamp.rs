// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
#[cfg(not(test))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(test)]
use mock_instant::thread_local::{SystemTime, UNIX_EPOCH};
use serde::{Deserialize, Serialize};

/// Microseconds since the UNIX epoch based on system time.
///
/// This is using microseconds instead of leap seconds for larger precision (unlike standard UNIX
/// timestamps).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Construct a timestamp from microseconds since the UNIX epoch.
    pub fn from_micros(value: u64) -> Self {
        Self(value)
    }

    /// Microseconds since the UNIX epoch.
    pub fn as_micros(&self) -> u64 {
        self.0
    }

    /// Current system time.
    pub fn now() -> Self {
        let now = SystemTime::now();
        let duration = now
            .duration_since(UNIX_EPOCH)
            .expect("system time went backwards");
        Self(duration.as_micros() as u64)
    }
}

impl From<Timestamp> for u64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mock_instant::thread_local::MockClock;

    use super::Timestamp;

    #[test]
    fn now_follows_system_time() {
        MockClock::set_system_time(Duration::from_secs(5));
        assert_eq!(Timestamp::now(), Timestamp::from_micros(5_000_000));

        MockClock::advance_system_time(Duration::from_secs(1));
        assert_eq!(Timestamp::now(), Timestamp::from_micros(6_000_000));
    }

    #[test]
    fn convert_and_compare() {
        assert!(Timestamp::from_micros(5) > 3.into());
        assert_eq!(u64::from(Timestamp::from_micros(42)), 42);
    }
}
