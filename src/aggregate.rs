//! Resolution aggregator.
//!
//! Folds the base series into coarser fixed-duration buckets in a single
//! left-to-right pass. Bucket membership is measured from the first candle of
//! the bucket, so buckets anchor on the series start rather than on calendar
//! boundaries. The trailing bucket is emitted even when short; callers must
//! tolerate a final candle covering less than a full bucket.

use rust_decimal::Decimal;

use crate::candle::Candle;
use crate::error::FeedError;

/// Fold `base` into buckets of `bucket_secs`, one output candle per bucket.
///
/// Reduction per bucket: `time`/`open` from the first member, `close` from
/// the last, `high`/`low` as max/min over members, volumes summed.
pub fn aggregate(base: &[Candle], bucket_secs: i64) -> Result<Vec<Candle>, FeedError> {
    if bucket_secs <= 0 {
        return Err(FeedError::InvalidParameter(format!(
            "bucket size must be positive, got {bucket_secs}"
        )));
    }

    let mut aggregated = Vec::new();
    let mut bucket: Vec<&Candle> = Vec::new();

    for candle in base {
        let belongs = bucket
            .first()
            .map(|first| candle.time - first.time < bucket_secs)
            .unwrap_or(true);

        if !belongs {
            if let Some(reduced) = reduce(&bucket) {
                aggregated.push(reduced);
            }
            bucket.clear();
        }
        bucket.push(candle);
    }

    if let Some(reduced) = reduce(&bucket) {
        aggregated.push(reduced);
    }

    Ok(aggregated)
}

/// Reduce one bucket into its output candle. `None` for an empty bucket.
fn reduce(bucket: &[&Candle]) -> Option<Candle> {
    let first = bucket.first()?;
    let last = bucket.last()?;

    let mut high = first.high;
    let mut low = first.low;
    let mut volumefrom = Decimal::ZERO;
    let mut volumeto = Decimal::ZERO;
    for candle in bucket {
        high = high.max(candle.high);
        low = low.min(candle.low);
        volumefrom += candle.volumefrom;
        volumeto += candle.volumeto;
    }

    Some(Candle {
        time: first.time,
        open: first.open,
        high,
        low,
        close: last.close,
        volumefrom,
        volumeto,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, open: i64, high: i64, low: i64, close: i64, volume: i64) -> Candle {
        let volumefrom = Decimal::from(volume);
        Candle {
            time,
            open: Decimal::from(open),
            high: Decimal::from(high),
            low: Decimal::from(low),
            close: Decimal::from(close),
            volumefrom,
            volumeto: Decimal::from(close) * volumefrom,
        }
    }

    /// Uniform 1-minute series of n candles starting at t=0.
    fn minute_series(n: i64) -> Vec<Candle> {
        (0..n)
            .map(|i| candle(i * 60, 100 + i, 102 + i, 98 + i, 101 + i, 1))
            .collect()
    }

    #[test]
    fn test_two_minutes_into_one_bucket() {
        let base = vec![
            candle(0, 10, 12, 9, 11, 1),
            candle(60, 11, 13, 10, 12, 2),
        ];

        let out = aggregate(&base, 120).unwrap();
        assert_eq!(out.len(), 1);

        let agg = &out[0];
        assert_eq!(agg.time, 0);
        assert_eq!(agg.open, Decimal::from(10));
        assert_eq!(agg.high, Decimal::from(13));
        assert_eq!(agg.low, Decimal::from(9));
        assert_eq!(agg.close, Decimal::from(12));
        assert_eq!(agg.volumefrom, Decimal::from(3));
        assert_eq!(agg.volumeto, Decimal::from(35));
    }

    #[test]
    fn test_bucket_count_is_ceiling() {
        // 7 minutes into 3-minute buckets: 3 + 3 + 1.
        let out = aggregate(&minute_series(7), 180).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].time, 0);
        assert_eq!(out[1].time, 180);
        assert_eq!(out[2].time, 360);
    }

    #[test]
    fn test_partial_trailing_bucket_is_emitted() {
        let out = aggregate(&minute_series(7), 180).unwrap();

        // The last bucket holds a single minute; its reduction degenerates
        // to that candle.
        let last = &out[2];
        assert_eq!(last.open, Decimal::from(106));
        assert_eq!(last.close, Decimal::from(107));
        assert_eq!(last.volumefrom, Decimal::from(1));
    }

    #[test]
    fn test_unit_bucket_is_identity() {
        let base = minute_series(5);
        let out = aggregate(&base, 60).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn test_bucket_anchor_is_first_member_time() {
        // Series starting off any calendar boundary: anchors follow the
        // series, not the clock.
        let base: Vec<Candle> = (0..4)
            .map(|i| candle(7_213 + i * 60, 100, 102, 98, 101, 1))
            .collect();

        let out = aggregate(&base, 120).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].time, 7_213);
        assert_eq!(out[1].time, 7_213 + 120);
    }

    #[test]
    fn test_empty_input() {
        let out = aggregate(&[], 3600).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_positive_bucket_rejected() {
        let base = minute_series(2);
        assert!(aggregate(&base, 0).is_err());
        assert!(aggregate(&base, -60).is_err());
    }
}
