//! OHLCV candle type shared by the generation and aggregation paths.
//!
//! All prices and volumes are `Decimal`, rounded to two decimal places at
//! production time. Construction clamps `high`/`low` so the OHLC invariant
//! (`low <= open, close <= high`) holds for every candle leaving this module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places for every price and volume quantity on the wire.
pub const PRICE_DP: u32 = 2;

/// A single OHLCV candle.
///
/// `time` is a Unix timestamp in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volumefrom: Decimal,
    pub volumeto: Decimal,
}

impl Candle {
    /// Build a candle from raw generated quantities.
    ///
    /// Rounds everything to [`PRICE_DP`], clamps `high`/`low` to bound the
    /// body, and derives `volumeto = close * volumefrom`.
    pub fn from_raw(
        time: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volumefrom: Decimal,
    ) -> Self {
        let open = open.round_dp(PRICE_DP);
        let close = close.round_dp(PRICE_DP);
        let high = high.round_dp(PRICE_DP).max(open).max(close);
        let low = low.round_dp(PRICE_DP).min(open).min(close);
        let volumefrom = volumefrom.round_dp(PRICE_DP);
        let volumeto = (close * volumefrom).round_dp(PRICE_DP);

        Self {
            time,
            open,
            high,
            low,
            close,
            volumefrom,
            volumeto,
        }
    }

    /// Validate candle integrity (OHLCV invariants).
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
            && self.volumefrom >= Decimal::ZERO
            && self.volumeto >= Decimal::ZERO
    }
}
