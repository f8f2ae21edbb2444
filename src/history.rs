//! Historical query orchestration.
//!
//! Sizes the base-series span from the requested resolution and candle count,
//! runs the generator and (when needed) the aggregator, trims to the trailing
//! `limit` candles and shapes the CryptoCompare-style response envelope.

use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::candle::Candle;
use crate::config::GeneratorConfig;
use crate::error::FeedError;
use crate::generator::{BaseSeriesGenerator, BASE_STEP_SECS};
use crate::resolution::Resolution;

/// Parameters of one historical query.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub resolution: Resolution,
    /// End of the requested span; `None` means the caller's current time.
    pub to_ts: Option<i64>,
    /// Maximum number of candles returned.
    pub limit: i64,
}

/// Historical response envelope. `data` is ordered oldest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Data")]
    pub data: Vec<Candle>,
    #[serde(rename = "TimeTo")]
    pub time_to: i64,
    #[serde(rename = "TimeFrom")]
    pub time_from: i64,
    #[serde(rename = "FirstValueInArray")]
    pub first_value_in_array: bool,
    #[serde(rename = "ConversionType")]
    pub conversion_type: ConversionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionType {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "conversionSymbol")]
    pub conversion_symbol: String,
}

impl ConversionType {
    fn direct() -> Self {
        Self {
            kind: "direct".to_string(),
            conversion_symbol: String::new(),
        }
    }
}

/// Run one historical query, with `now` as the fallback for an omitted
/// `toTs`.
///
/// A non-positive `limit` is rejected rather than treated as an empty span.
pub fn run_query(
    config: &GeneratorConfig,
    query: &HistoryQuery,
    now: i64,
) -> Result<HistoryResponse, FeedError> {
    if query.limit <= 0 {
        return Err(FeedError::InvalidParameter(format!(
            "limit must be positive, got {}",
            query.limit
        )));
    }

    let end_time = query.to_ts.unwrap_or(now);
    let start_time = query
        .resolution
        .seconds()
        .checked_mul(query.limit)
        .and_then(|span| end_time.checked_sub(span))
        .ok_or_else(|| FeedError::InvalidParameter("requested span overflows".to_string()))?;

    let mut generator = BaseSeriesGenerator::new(config.clone());
    let base = generator.generate(start_time, end_time, BASE_STEP_SECS)?;

    let mut data = if query.resolution.is_base() {
        base
    } else {
        aggregate(&base, query.resolution.seconds())?
    };

    // Keep only the trailing `limit` candles, still oldest-first.
    let limit = query.limit as usize;
    if data.len() > limit {
        data = data.split_off(data.len() - limit);
    }

    Ok(HistoryResponse {
        response: "Success".to_string(),
        data,
        time_to: end_time,
        time_from: start_time,
        first_value_in_array: true,
        conversion_type: ConversionType::direct(),
    })
}
