//! Live tick streamer.
//!
//! Each subscriber gets an independent synthetic tick source and a pacing
//! state machine that guarantees strictly increasing emission timestamps.
//! The only state shared between subscriber loops is the
//! [`SubscriberRegistry`].
//!
//! Tick timestamps are Unix **milliseconds**, unlike the historical surface
//! (seconds). The tick price process is anchored at the configured base
//! price, independent of the historical walk, so a chart joining the two
//! feeds sees a seam at the handoff. Known boundary condition, not patched
//! here.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::candle::PRICE_DP;
use crate::config::StreamConfig;

/// One live streaming update. No `volumeto` and no envelope wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volumefrom: Decimal,
}

/// Per-subscriber synthetic tick source.
pub struct TickGenerator {
    config: StreamConfig,
    rng: ChaCha8Rng,
}

impl TickGenerator {
    /// Create a tick source, honoring `config.seed` when set.
    pub fn new(config: StreamConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Synthesize the tick for wall-clock second `now_secs`.
    pub fn next_tick(&mut self, now_secs: i64) -> Tick {
        let band = self.config.price_band;
        let wick = self.config.wick_band;

        let price = self.config.base_price + self.rng.gen_range(-band..=band);
        let high = price + self.rng.gen_range(0.0..=wick);
        let low = price - self.rng.gen_range(0.0..=wick);
        let volume = self
            .rng
            .gen_range(self.config.volume_min..=self.config.volume_max);

        let price = to_decimal(price);
        Tick {
            time: now_secs * 1000,
            open: price,
            high: to_decimal(high),
            low: to_decimal(low),
            close: price,
            volumefrom: to_decimal(volume),
        }
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(PRICE_DP)
}

/// Pacing state machine for one subscriber.
///
/// `poll` returns true at most once per distinct wall-clock second and never
/// for a timestamp at or before the previous emission.
#[derive(Debug, Clone, Copy)]
pub struct TickPacer {
    last_emitted: i64,
}

impl TickPacer {
    /// Start pacing at `now`; the first emission happens strictly after it.
    pub fn new(now: i64) -> Self {
        Self { last_emitted: now }
    }

    /// Whether a tick is due at `now`. Records the emission when true.
    pub fn poll(&mut self, now: i64) -> bool {
        if now > self.last_emitted {
            self.last_emitted = now;
            true
        } else {
            false
        }
    }
}

/// Subscriber bookkeeping shared across connection tasks.
#[derive(Debug, Clone)]
pub struct SubscriberInfo {
    /// Unix seconds at registration.
    pub connected_at: i64,
}

/// Service-owned registry of live stream subscribers.
///
/// Safe for concurrent registration and removal from independent connection
/// tasks; iteration order is unspecified.
#[derive(Debug)]
pub struct SubscriberRegistry {
    subscribers: DashMap<u64, SubscriberInfo>,
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new subscriber and return its id.
    pub fn register(&self, now: i64) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.insert(id, SubscriberInfo { connected_at: now });
        id
    }

    /// Remove a subscriber (client close or delivery failure).
    pub fn deregister(&self, id: u64) -> Option<SubscriberInfo> {
        self.subscribers.remove(&id).map(|(_, info)| info)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.subscribers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn seeded_generator(seed: u64) -> TickGenerator {
        TickGenerator::new(StreamConfig {
            seed: Some(seed),
            ..StreamConfig::default()
        })
    }

    #[test]
    fn test_pacer_skips_same_second() {
        let mut pacer = TickPacer::new(100);

        assert!(!pacer.poll(100));
        assert!(pacer.poll(101));
        assert!(!pacer.poll(101));
        assert!(pacer.poll(103));
        assert!(!pacer.poll(102)); // clock went backwards: no emission
    }

    #[test]
    fn test_pacer_emissions_strictly_increase() {
        let mut pacer = TickPacer::new(0);
        let mut emitted = Vec::new();

        for now in [0, 1, 1, 2, 2, 2, 3, 5, 5, 8] {
            if pacer.poll(now) {
                emitted.push(now);
            }
        }

        assert_eq!(emitted, vec![1, 2, 3, 5, 8]);
        for window in emitted.windows(2) {
            assert!(window[1] > window[0]);
        }
    }

    #[test]
    fn test_tick_time_is_milliseconds() {
        let mut generator = seeded_generator(42);
        let tick = generator.next_tick(1_700_000_123);
        assert_eq!(tick.time, 1_700_000_123_000);
    }

    #[test]
    fn test_tick_price_within_band() {
        let mut generator = seeded_generator(42);
        let min = Decimal::from_f64(40_000.0 - 50.0).unwrap();
        let max = Decimal::from_f64(40_000.0 + 50.0).unwrap();

        for i in 0..200 {
            let tick = generator.next_tick(i);
            assert!(tick.close >= min && tick.close <= max);
            assert_eq!(tick.open, tick.close);
            assert!(tick.high >= tick.close);
            assert!(tick.low <= tick.close);
        }
    }

    #[test]
    fn test_tick_wire_shape_has_no_volumeto() {
        let mut generator = seeded_generator(7);
        let tick = generator.next_tick(1_700_000_000);

        let value = serde_json::to_value(&tick).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["time", "open", "high", "low", "close", "volumefrom"] {
            assert!(obj.contains_key(key), "missing field {}", key);
        }
        assert!(!obj.contains_key("volumeto"));
    }

    #[test]
    fn test_seeded_ticks_reproducible() {
        let mut g1 = seeded_generator(9);
        let mut g2 = seeded_generator(9);
        for i in 0..20 {
            assert_eq!(g1.next_tick(i), g2.next_tick(i));
        }
    }

    #[test]
    fn test_registry_register_and_deregister() {
        let registry = SubscriberRegistry::new();

        let a = registry.register(100);
        let b = registry.register(101);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(a));

        let info = registry.deregister(a).unwrap();
        assert_eq!(info.connected_at, 100);
        assert!(!registry.contains(a));
        assert_eq!(registry.len(), 1);

        // Removing twice is a no-op.
        assert!(registry.deregister(a).is_none());
    }

    #[test]
    fn test_registry_concurrent_churn() {
        let registry = Arc::new(SubscriberRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let id = registry.register(0);
                        registry.deregister(id);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(registry.is_empty());
    }
}
