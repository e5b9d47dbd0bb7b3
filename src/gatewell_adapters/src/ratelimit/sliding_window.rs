use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Shrink the state map every N checks to keep one-shot clients from
/// accumulating forever.
const SHRINK_INTERVAL: u64 = 1000;

/// Sliding-window request limiter keyed by client origin.
///
/// Each key holds the timestamps of its requests inside the current
/// window; a check prunes expired entries and then applies
/// increment-and-compare under the shard lock of the dashmap entry, so
/// concurrent requests from one origin cannot both sneak past the cap.
pub struct SlidingWindowRateLimiter {
    hits: DashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
    check_count: AtomicU64,
}

impl SlidingWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            hits: DashMap::new(),
            max_requests: max_requests.max(1),
            window,
            check_count: AtomicU64::new(0),
        }
    }

    /// Register one request from `key`.
    ///
    /// Returns `Ok(())` when the request is admitted, or
    /// `Err(retry_after_secs)` when the window is full.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        let count = self.check_count.fetch_add(1, Ordering::Relaxed);
        if count > 0 && count % SHRINK_INTERVAL == 0 {
            self.shrink();
        }

        let now = Instant::now();
        let mut entry = self.hits.entry(key.to_owned()).or_default();

        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() >= self.max_requests as usize {
            // The oldest surviving hit is what has to age out before the
            // next request fits.
            let oldest = entry[0];
            let retry_after = self.window.saturating_sub(now.duration_since(oldest));
            return Err(retry_after.as_secs().max(1));
        }

        entry.push(now);
        Ok(())
    }

    fn shrink(&self) {
        let now = Instant::now();
        let window = self.window;
        self.hits
            .retain(|_, hits| hits.iter().any(|t| now.duration_since(*t) < window));
    }
}
