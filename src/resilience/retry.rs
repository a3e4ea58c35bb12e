use tokio::time::Duration;

/// Capped exponential backoff, kept as a pure `attempt -> delay` function so
/// retry scheduling is testable without real time passing.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// will be multiplied by 2 on every attempt until max_delay_ms
    pub base_delay_ms: u64,
    /// max delay for retrying
    /// invariant: >= base_delay_ms
    pub max_delay_ms: u64,
}

impl BackoffPolicy {
    pub fn new(base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self { base_delay_ms, max_delay_ms }
    }

    /// Delay before retry attempt `attempt` (1-based):
    /// `min(base * 2^(attempt-1), max)`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(63);
        let ms = self.base_delay_ms.saturating_mul(1u64 << exp);
        Duration::from_millis(ms.min(self.max_delay_ms))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self { base_delay_ms: 100, max_delay_ms: 3_600_000 }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn doubles_until_the_cap() {
        let policy = BackoffPolicy::new(100, 1_000);
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
        assert_eq!(policy.delay(4), Duration::from_millis(800));
        assert_eq!(policy.delay(5), Duration::from_millis(1_000));
        assert_eq!(policy.delay(6), Duration::from_millis(1_000));
    }

    #[test]
    fn monotonically_non_decreasing() {
        let policy = BackoffPolicy::new(50, 60_000);
        let mut prev = Duration::ZERO;
        for attempt in 1..=40 {
            let d = policy.delay(attempt);
            assert!(d >= prev, "delay shrank at attempt {attempt}");
            prev = d;
        }
    }

    #[test]
    fn huge_attempt_counts_do_not_overflow() {
        let policy = BackoffPolicy::new(100, 3_600_000);
        assert_eq!(policy.delay(u32::MAX), Duration::from_millis(3_600_000));
    }
}
