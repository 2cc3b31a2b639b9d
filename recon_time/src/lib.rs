//! Time abstractions shared across the reconciler workspace.
//!
//! Event timestamps in the reconciliation loop come from producers and are
//! never read from the wall clock directly (see [`crate::Time`] below for the
//! wire representation). What *does* need a clock is anything that runs on a
//! schedule rather than in response to an event — e.g. the periodic snapshot
//! ticker. Routing all of those reads through [`TimeProvider`] rather than
//! `Utc::now()` lets tests drive the clock deterministically with
//! [`MockProvider`].
#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms
)]

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::fmt::Debug;

/// An instant in time, represented as nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(DateTime<Utc>);

impl Time {
    /// Construct a [`Time`] from a count of nanoseconds since the Unix epoch.
    pub fn from_timestamp_nanos(nanos: i64) -> Self {
        Self(Utc.timestamp_nanos(nanos))
    }

    /// Construct a [`Time`] from a count of milliseconds since the Unix epoch.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self::from_timestamp_nanos(millis * 1_000_000)
    }

    /// Construct a [`Time`] from a count of seconds since the Unix epoch.
    ///
    /// This is the representation used by [`NodeEvent::time`](../graph_types/struct.NodeEvent.html),
    /// which carries the producer's monotonic-ish unix-seconds timestamp.
    pub fn from_timestamp_secs(secs: i64) -> Self {
        Self::from_timestamp_nanos(secs.saturating_mul(1_000_000_000))
    }

    /// Construct a [`Time`] from `(seconds, nanoseconds)` since the Unix epoch.
    pub fn from_timestamp(secs: i64, nsecs: u32) -> Self {
        Self(Utc.timestamp_opt(secs, nsecs).single().expect("valid timestamp"))
    }

    /// Parse an RFC 3339 timestamp string.
    pub fn from_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)))
    }

    /// Nanoseconds since the Unix epoch.
    pub fn timestamp_nanos(&self) -> i64 {
        self.0.timestamp_nanos_opt().expect("time out of range")
    }

    /// Seconds since the Unix epoch, truncating any sub-second component.
    pub fn timestamp_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// The underlying [`DateTime<Utc>`].
    pub fn date_time(&self) -> DateTime<Utc> {
        self.0
    }

    /// `self + duration`, saturating rather than overflowing.
    pub fn checked_add(&self, duration: chrono::Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// A source of the current time.
///
/// Production code depends on `Arc<dyn TimeProvider>` so it can be swapped for
/// a [`MockProvider`] in tests without threading a generic parameter through
/// every type that cares what time it is.
pub trait TimeProvider: Debug + Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> Time;
}

/// A [`TimeProvider`] backed by the OS wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProvider {}

impl SystemProvider {
    /// Create a new [`SystemProvider`].
    pub fn new() -> Self {
        Self {}
    }
}

impl TimeProvider for SystemProvider {
    fn now(&self) -> Time {
        Time(Utc::now())
    }
}

/// A [`TimeProvider`] with a time that can be set and advanced explicitly.
///
/// Intended for tests that need deterministic control over "now" — e.g. to
/// assert a periodic snapshot fires after exactly N ticks.
#[derive(Debug)]
pub struct MockProvider {
    now: Mutex<Time>,
}

impl MockProvider {
    /// Create a new [`MockProvider`] fixed at `time`.
    pub fn new(time: Time) -> Self {
        Self {
            now: Mutex::new(time),
        }
    }

    /// Overwrite the current time.
    pub fn set(&self, time: Time) {
        *self.now.lock() = time;
    }

    /// Advance the current time by `duration`.
    pub fn inc(&self, duration: chrono::Duration) {
        let mut now = self.now.lock();
        *now = now.checked_add(duration).expect("mock time overflow");
    }
}

impl TimeProvider for MockProvider {
    fn now(&self) -> Time {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_seconds() {
        let t = Time::from_timestamp_secs(1_000);
        assert_eq!(t.timestamp_seconds(), 1_000);
    }

    #[test]
    fn mock_provider_advances() {
        let provider = MockProvider::new(Time::from_timestamp_secs(0));
        assert_eq!(provider.now().timestamp_seconds(), 0);
        provider.inc(chrono::Duration::seconds(42));
        assert_eq!(provider.now().timestamp_seconds(), 42);
    }

    #[test]
    fn ordering_matches_timestamp_order() {
        let earlier = Time::from_timestamp_secs(10);
        let later = Time::from_timestamp_secs(20);
        assert!(earlier < later);
    }
}
