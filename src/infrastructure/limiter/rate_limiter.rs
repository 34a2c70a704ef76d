use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        let now = Instant::now();
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: now,
            last_seen: now,
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    fn try_consume(&mut self) -> RateDecision {
        let now = Instant::now();
        self.last_seen = now;
        self.refill(now);

        // epsilon guards against fp drift right at the boundary
        if self.tokens + 1e-9 >= 1.0 {
            self.tokens -= 1.0;
            return RateDecision::Allowed { remaining: self.tokens.floor() as u32 };
        }

        let retry_after_secs = if self.refill_per_sec > 0.0 {
            (((1.0 - self.tokens) / self.refill_per_sec).ceil() as u64).max(1)
        } else {
            u64::MAX
        };
        RateDecision::Limited { retry_after_secs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: u64 },
}

/// Per-client token buckets guarding the login endpoint.
#[derive(Clone)]
pub struct LoginRateLimiter {
    buckets: Arc<DashMap<String, Arc<Mutex<TokenBucket>>>>,
    capacity: f64,
    refill_per_sec: f64,
    trust_x_forwarded_for: bool,
}

impl LoginRateLimiter {
    pub fn new(burst: u32, refill_per_minute: u32, trust_x_forwarded_for: bool) -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            capacity: f64::from(burst),
            refill_per_sec: f64::from(refill_per_minute) / 60.0,
            trust_x_forwarded_for,
        }
    }

    pub fn trusts_forwarded_for(&self) -> bool {
        self.trust_x_forwarded_for
    }

    fn bucket(&self, key: &str) -> Arc<Mutex<TokenBucket>> {
        if let Some(existing) = self.buckets.get(key) {
            return existing.clone();
        }
        self.buckets
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TokenBucket::new(self.capacity, self.refill_per_sec))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        let bucket = self.bucket(key);
        let mut bucket = bucket.lock();
        bucket.try_consume()
    }

    /// Drops buckets idle for longer than `ttl`; returns how many were removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| now.duration_since(bucket.lock().last_seen) < ttl);
        before.saturating_sub(self.buckets.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_allowed_then_limited() {
        let limiter = LoginRateLimiter::new(3, 0, false);

        assert_eq!(limiter.check("1.2.3.4"), RateDecision::Allowed { remaining: 2 });
        assert_eq!(limiter.check("1.2.3.4"), RateDecision::Allowed { remaining: 1 });
        assert_eq!(limiter.check("1.2.3.4"), RateDecision::Allowed { remaining: 0 });
        assert!(matches!(limiter.check("1.2.3.4"), RateDecision::Limited { .. }));
    }

    #[test]
    fn clients_are_limited_independently() {
        let limiter = LoginRateLimiter::new(1, 0, false);

        assert!(matches!(limiter.check("a"), RateDecision::Allowed { .. }));
        assert!(matches!(limiter.check("a"), RateDecision::Limited { .. }));
        assert!(matches!(limiter.check("b"), RateDecision::Allowed { .. }));
    }

    #[test]
    fn retry_after_reflects_refill_rate() {
        let limiter = LoginRateLimiter::new(1, 6, false);
        limiter.check("a");

        match limiter.check("a") {
            RateDecision::Limited { retry_after_secs } => assert!((1..=10).contains(&retry_after_secs)),
            other => panic!("expected limit, got {other:?}"),
        }
    }

    #[test]
    fn idle_buckets_are_evicted() {
        let limiter = LoginRateLimiter::new(5, 5, false);
        limiter.check("a");
        limiter.check("b");

        assert_eq!(limiter.evict_idle(Duration::from_secs(60)), 0);
        assert_eq!(limiter.evict_idle(Duration::ZERO), 2);
        assert_eq!(limiter.tracked_clients(), 0);
    }
}
