//! OHLC candle type and kline response parsing.

use chrono::{DateTime, Utc};

/// One OHLC candle of the charted series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Parse a Binance-style kline response.
///
/// The endpoint returns an array of arrays:
/// `[open_time_ms, "open", "high", "low", "close", "volume", ...]`
/// with prices encoded as strings. Rows that fail to parse are skipped
/// with a count reported in the error-free case via the caller's logging.
pub fn parse_klines(raw: &serde_json::Value) -> Result<Vec<Candle>, String> {
    let rows = raw
        .as_array()
        .ok_or_else(|| "kline response is not an array".to_string())?;

    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(candle) = parse_kline_row(row) {
            candles.push(candle);
        }
    }

    if candles.is_empty() && !rows.is_empty() {
        return Err("kline response contained no parsable rows".to_string());
    }

    Ok(candles)
}

fn parse_kline_row(row: &serde_json::Value) -> Option<Candle> {
    let fields = row.as_array()?;
    if fields.len() < 5 {
        return None;
    }

    let open_time = fields[0].as_i64()?;
    let date = DateTime::<Utc>::from_timestamp_millis(open_time)?;

    Some(Candle {
        date,
        open: price_field(&fields[1])?,
        high: price_field(&fields[2])?,
        low: price_field(&fields[3])?,
        close: price_field(&fields[4])?,
    })
}

/// Kline prices arrive as JSON strings ("26123.45"); tolerate plain numbers too.
fn price_field(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_klines() {
        let raw = json!([
            [1700000000000i64, "100.0", "110.0", "90.0", "105.0", "12.3"],
            [1700003600000i64, "105.0", "120.0", "100.0", "115.5", "9.1"],
        ]);

        let candles = parse_klines(&raw).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(candles[1].high, 120.0);
        assert!(candles[1].date > candles[0].date);
    }

    #[test]
    fn test_parse_klines_skips_malformed_rows() {
        let raw = json!([
            [1700000000000i64, "100.0", "110.0", "90.0", "105.0"],
            ["not-a-timestamp", "x", "y", "z", "w"],
        ]);

        let candles = parse_klines(&raw).unwrap();
        assert_eq!(candles.len(), 1);
    }

    #[test]
    fn test_parse_klines_rejects_non_array() {
        assert!(parse_klines(&json!({"error": "down"})).is_err());
    }

    #[test]
    fn test_empty_response_is_ok() {
        // An empty series is a degraded state, not an error
        let candles = parse_klines(&json!([])).unwrap();
        assert!(candles.is_empty());
    }

    #[test]
    fn test_numeric_price_fields_accepted() {
        let raw = json!([[1700000000000i64, 100.0, 110.0, 90.0, 105.0]]);
        let candles = parse_klines(&raw).unwrap();
        assert_eq!(candles[0].low, 90.0);
    }
}
