use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::LoginRateLimiter;

/// Buckets idle this long are full again and can be dropped.
const IDLE_TTL: Duration = Duration::from_secs(60 * 30);

pub async fn start_limiter_eviction_task(limiter: LoginRateLimiter) {
    let mut interval = interval(Duration::from_secs(60 * 5));

    loop {
        interval.tick().await;

        let evicted = limiter.evict_idle(IDLE_TTL);
        if evicted > 0 {
            tracing::info!(evicted, remaining = limiter.tracked_clients(), "Evicted idle login buckets");
        }
    }
}
