use std::time::Duration;
use tokio::time::Instant;

/// Immutable snapshot of a token value and its validity window.
///
/// An `Entry` is never mutated after construction; refreshing a resource
/// means building a new `Entry` and swapping the slot pointer.
#[derive(Debug, Clone)]
pub struct Entry {
    pub content: String,
    pub ttl_seconds: i64,
    pub issued_at: Instant,
    pub expires_at: Instant,
}

impl Entry {
    /// Build an entry issued "now", as reported by the monotonic clock.
    pub fn new(content: String, ttl_seconds: i64) -> Self {
        let issued_at = Instant::now();
        let valid_for = Duration::from_secs(ttl_seconds.max(0) as u64);
        Self {
            content,
            ttl_seconds,
            issued_at,
            expires_at: issued_at + valid_for,
        }
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        now <= self.expires_at
    }

    /// Whole seconds until expiry, clamped to zero.
    pub fn remaining_secs(&self, now: Instant) -> i64 {
        self.expires_at.saturating_duration_since(now).as_secs() as i64
    }

    /// Point at which the refresher should refetch: `fraction` of the TTL
    /// past `issued_at`. A non-positive TTL yields `issued_at` itself, so
    /// the caller never ends up with a negative sleep.
    pub fn refresh_at(&self, fraction: f64) -> Instant {
        let secs = fraction * self.ttl_seconds.max(0) as f64;
        self.issued_at + Duration::from_secs_f64(secs.max(0.0))
    }
}
