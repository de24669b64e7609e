use std::time::{Duration, Instant};

/// Quiet interval before typed search text reaches the filter.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// Coalesces a stream of values, releasing the latest one only after
/// `interval` has passed without a newer push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replaces any pending value and restarts the quiet interval.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Releases the pending value if its quiet interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, pushed_at)| now.saturating_duration_since(*pushed_at) >= self.interval);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|(_, pushed_at)| *pushed_at + self.interval)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_pushes_coalesce_into_the_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(350));

        debouncer.push("G", start);
        debouncer.push("Ga", start + Duration::from_millis(100));
        debouncer.push("Gamma", start + Duration::from_millis(200));

        // 350 ms after the first push, but only 150 ms after the last one.
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(550)),
            Some("Gamma")
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn deadline_tracks_latest_push() {
        let start = Instant::now();
        let mut debouncer = Debouncer::<u8>::default();
        assert_eq!(debouncer.deadline(), None);
        debouncer.push(1, start);
        assert_eq!(debouncer.deadline(), Some(start + SEARCH_DEBOUNCE));
    }
}
