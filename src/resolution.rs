//! Resolution token parsing.
//!
//! The API follows the CryptoCompare convention: a raw number is a minute
//! count and a `D` suffix scales by days, so `"1"` is one minute, `"60"` one
//! hour and `"1D"` one day.

use std::str::FromStr;

use crate::error::FeedError;
use crate::generator::BASE_STEP_SECS;

const MINUTES_PER_DAY: i64 = 1440;

/// A requested output resolution, stored as a minute count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    minutes: i64,
}

impl Resolution {
    pub const MINUTE: Resolution = Resolution { minutes: 1 };
    pub const HOUR: Resolution = Resolution { minutes: 60 };
    pub const DAY: Resolution = Resolution {
        minutes: MINUTES_PER_DAY,
    };

    /// Build from a minute count.
    pub fn from_minutes(minutes: i64) -> Result<Self, FeedError> {
        if minutes <= 0 {
            return Err(FeedError::InvalidParameter(format!(
                "resolution must be positive, got {minutes} minutes"
            )));
        }
        Ok(Self { minutes })
    }

    /// Bucket duration in seconds.
    pub fn seconds(&self) -> i64 {
        self.minutes * 60
    }

    /// Whether this is the base granularity (no aggregation needed).
    pub fn is_base(&self) -> bool {
        self.seconds() == BASE_STEP_SECS
    }
}

impl FromStr for Resolution {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Some(days) = token.strip_suffix(['D', 'd']) {
            let count: i64 = if days.is_empty() {
                1
            } else {
                days.parse().map_err(|_| invalid(token))?
            };
            let minutes = count
                .checked_mul(MINUTES_PER_DAY)
                .ok_or_else(|| invalid(token))?;
            return Resolution::from_minutes(minutes);
        }

        let minutes: i64 = token.parse().map_err(|_| invalid(token))?;
        Resolution::from_minutes(minutes)
    }
}

fn invalid(token: &str) -> FeedError {
    FeedError::InvalidParameter(format!("unrecognized resolution {token:?}"))
}
