//! Service configuration.
//!
//! Plain structs with `Default` impls; `main` serves the defaults and tests
//! override individual fields.

use std::time::Duration;

/// Tuning for the base series random walk.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Starting price for the walk.
    pub base_price: f64,
    /// Symmetric per-step walk range as a fraction (0.002 = ±0.2%).
    pub walk_range: f64,
    /// Symmetric open/close perturbation around the stepped price.
    pub body_noise: f64,
    /// One-sided high/low perturbation.
    pub wick_noise: f64,
    /// Minimum base-asset volume per candle.
    pub volume_min: f64,
    /// Maximum base-asset volume per candle.
    pub volume_max: f64,
    /// Seed for reproducible output. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_price: 40_000.0,
            walk_range: 0.002,
            body_noise: 0.001,
            wick_noise: 0.002,
            volume_min: 1.0,
            volume_max: 10.0,
            seed: None,
        }
    }
}

/// Tuning for the live tick stream.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Center price for tick synthesis.
    pub base_price: f64,
    /// Symmetric absolute band around the center price.
    pub price_band: f64,
    /// One-sided absolute band for tick wicks.
    pub wick_band: f64,
    /// Minimum tick volume.
    pub volume_min: f64,
    /// Maximum tick volume.
    pub volume_max: f64,
    /// Pause between streamer loop iterations.
    pub tick_interval: Duration,
    /// Seed for reproducible output. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_price: 40_000.0,
            price_band: 50.0,
            wick_band: 5.0,
            volume_min: 1.0,
            volume_max: 100.0,
            tick_interval: Duration::from_secs(1),
            seed: None,
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// TCP port the HTTP/WS surface binds to.
    pub listen_port: u16,
    /// Candle count when a request omits `limit`.
    pub default_limit: i64,
    pub generator: GeneratorConfig,
    pub stream: StreamConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            listen_port: 8080,
            default_limit: 2000,
            generator: GeneratorConfig::default(),
            stream: StreamConfig::default(),
        }
    }
}
