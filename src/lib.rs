//! Synthetic Market Data Feed
//!
//! Mimics a real exchange data API for downstream charting clients without
//! any real market-data source behind it:
//! - Dense 1-minute synthetic OHLCV series via a bounded random walk
//! - Resolution aggregation into minute/hour/day buckets
//! - CryptoCompare-style historical response envelope over HTTP
//! - Live tick streaming over WebSocket, at most one tick per second
//!
//! # Architecture
//!
//! ```text
//! GET /data/histo{minute,hour,day}       GET /realtime
//!        │                                    │
//!  ┌─────▼──────┐                       ┌─────▼──────┐
//!  │Orchestrator│                       │ WS upgrade │
//!  └─────┬──────┘                       └─────┬──────┘
//!        │                                    │  one loop per
//!  ┌─────▼──────┐    ┌────────────┐     ┌─────▼──────┐ subscriber
//!  │Base series │───▶│ Aggregator │     │TickPacer + │
//!  │ generator  │    │ (buckets)  │     │ generator  │
//!  └────────────┘    └─────┬──────┘     └─────┬──────┘
//!                          │                  │
//!                 ┌────────▼──────┐   ┌───────▼───────┐
//!                 │ JSON envelope │   │  JSON ticks   │
//!                 └───────────────┘   └───────────────┘
//! ```
//!
//! The historical path is stateless per request; streaming loops share only
//! the subscriber registry.

pub mod aggregate;
pub mod candle;
pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod history;
pub mod resolution;
pub mod router;
pub mod state;
pub mod stream;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall clock as Unix seconds.
pub fn unix_time_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
