//! Base series generator.
//!
//! Produces the dense 1-minute synthetic series every coarser resolution is
//! derived from: a bounded multiplicative random walk over a running price,
//! with per-candle body and wick noise around the stepped price.
//!
//! Unseeded by default, so every call yields a fresh series; a seed makes the
//! output a pure function of (seed, parameters) for reproducible tests.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::candle::Candle;
use crate::config::GeneratorConfig;
use crate::error::FeedError;

/// Step size of the base series in seconds.
pub const BASE_STEP_SECS: i64 = 60;

/// Synthetic base-series generator.
pub struct BaseSeriesGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl BaseSeriesGenerator {
    /// Create a generator, honoring `config.seed` when set.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create a deterministic generator, overriding any `config.seed`.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate one candle per step from `start_time` to `end_time` inclusive.
    ///
    /// `start_time > end_time` yields an empty series. The running price
    /// state lives only for the duration of the call.
    pub fn generate(
        &mut self,
        start_time: i64,
        end_time: i64,
        step_secs: i64,
    ) -> Result<Vec<Candle>, FeedError> {
        if step_secs <= 0 {
            return Err(FeedError::InvalidParameter(format!(
                "step must be positive, got {step_secs}"
            )));
        }

        let walk = self.config.walk_range;
        let body = self.config.body_noise;
        let wick = self.config.wick_noise;

        let mut series = Vec::new();
        let mut price = self.config.base_price;
        let mut current = start_time;

        while current <= end_time {
            price *= 1.0 + self.rng.gen_range(-walk..=walk);

            let open = price * (1.0 + self.rng.gen_range(-body..=body));
            let high = price * (1.0 + self.rng.gen_range(0.0..=wick));
            let low = price * (1.0 - self.rng.gen_range(0.0..=wick));
            let close = price * (1.0 + self.rng.gen_range(-body..=body));
            let volume = self
                .rng
                .gen_range(self.config.volume_min..=self.config.volume_max);

            series.push(Candle::from_raw(
                current,
                to_decimal(open),
                to_decimal(high),
                to_decimal(low),
                to_decimal(close),
                to_decimal(volume),
            ));
            current += step_secs;
        }

        Ok(series)
    }
}

/// Convert a finite walk value to `Decimal`.
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}
