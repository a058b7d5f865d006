//! Binance depth stream decoding.
//!
//! Accepts either a combined-stream envelope
//!
//! ```text
//! {"stream":"btcusdt@depth","data":{"e":"depthUpdate","E":..,"U":..,"u":..,"pu":..,
//!                                   "a":[["100.00","1.5"]],"b":[["99.50","2.0"]]}}
//! ```
//!
//! or the bare `data` object. Only `a` and `b` matter to the book; the ids
//! and event time are carried along for sequence tracking and are optional.
//!
//! Every price and size is validated here. One bad number rejects the whole
//! message so the book never sees a partially decoded update.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::types::price::to_fixed;
use crate::types::{DepthUpdate, LevelChange};

/// Event type Binance uses for depth diffs.
pub const DEPTH_EVENT_TYPE: &str = "depthUpdate";

/// Longest excerpt of an unexpected message kept in the error.
const EXCERPT_LEN: usize = 80;

/// Raw depth event as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct BinanceDepthEvent {
    /// Event type (`"depthUpdate"`).
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,
    /// Event time (milliseconds since epoch).
    #[serde(rename = "E", default)]
    pub event_time: Option<u64>,
    /// First update ID in event.
    #[serde(rename = "U", default)]
    pub first_update_id: Option<u64>,
    /// Final update ID in event.
    #[serde(rename = "u", default)]
    pub final_update_id: Option<u64>,
    /// Final update ID of the previous event (futures streams only).
    #[serde(rename = "pu", default)]
    pub prev_final_update_id: Option<u64>,
    /// Ask levels as `[price, size]` string pairs.
    #[serde(rename = "a", default)]
    pub asks: Vec<[String; 2]>,
    /// Bid levels as `[price, size]` string pairs.
    #[serde(rename = "b", default)]
    pub bids: Vec<[String; 2]>,
}

/// A decoded depth message: the book update plus feed metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthEvent {
    /// Changes to apply to the book
    pub update: DepthUpdate,
    /// Event time (milliseconds since epoch)
    pub event_time: Option<u64>,
    /// First update ID covered by this event
    pub first_update_id: Option<u64>,
    /// Last update ID covered by this event
    pub final_update_id: Option<u64>,
    /// Last update ID of the event before this one
    pub prev_final_update_id: Option<u64>,
}

/// Decode one text frame into a [`DepthEvent`].
///
/// ```
/// use depth_book::feed::binance::decode_depth;
///
/// let msg = r#"{"stream":"btcusdt@depth","data":{"a":[["100.00","1.5"]],"b":[]}}"#;
/// let event = decode_depth(msg).unwrap();
/// assert_eq!(event.update.asks, vec![(10_000_000_000, 150_000_000)]);
/// ```
pub fn decode_depth(text: &str) -> Result<DepthEvent, DecodeError> {
    let mut value: Value = serde_json::from_str(text)?;

    let payload = match value.get_mut("data").map(Value::take) {
        Some(data) => data,
        None if value.get("a").is_some() || value.get("b").is_some() => value,
        None => return Err(DecodeError::UnexpectedMessage(excerpt(text))),
    };

    let raw: BinanceDepthEvent = serde_json::from_value(payload)?;
    raw.try_into()
}

impl TryFrom<BinanceDepthEvent> for DepthEvent {
    type Error = DecodeError;

    fn try_from(raw: BinanceDepthEvent) -> Result<Self, Self::Error> {
        if let Some(kind) = raw.event_type.as_deref() {
            if kind != DEPTH_EVENT_TYPE {
                return Err(DecodeError::UnexpectedMessage(format!("event type {kind:?}")));
            }
        }

        Ok(DepthEvent {
            update: DepthUpdate::from_levels(parse_levels(&raw.asks)?, parse_levels(&raw.bids)?),
            event_time: raw.event_time,
            first_update_id: raw.first_update_id,
            final_update_id: raw.final_update_id,
            prev_final_update_id: raw.prev_final_update_id,
        })
    }
}

/// Convert `[price, size]` string pairs to fixed-point.
pub fn parse_levels(pairs: &[[String; 2]]) -> Result<Vec<LevelChange>, DecodeError> {
    pairs
        .iter()
        .map(|[price, size]| Ok((parse_number("price", price)?, parse_number("size", size)?)))
        .collect()
}

fn parse_number(field: &'static str, value: &str) -> Result<u64, DecodeError> {
    to_fixed(value).ok_or_else(|| DecodeError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED: &str = r#"{
        "stream": "btcusdt@depth",
        "data": {
            "e": "depthUpdate",
            "E": 1703577600000,
            "T": 1703577599990,
            "s": "BTCUSDT",
            "U": 100,
            "u": 105,
            "pu": 99,
            "b": [["99.50", "2.0"], ["99.00", "0"]],
            "a": [["100.00", "1.5"]]
        }
    }"#;

    #[test]
    fn test_decode_combined_stream() {
        let event = decode_depth(COMBINED).expect("decode");

        assert_eq!(event.update.asks, vec![(10_000_000_000, 150_000_000)]);
        assert_eq!(
            event.update.bids,
            vec![(9_950_000_000, 200_000_000), (9_900_000_000, 0)]
        );
        assert_eq!(event.event_time, Some(1703577600000));
        assert_eq!(event.first_update_id, Some(100));
        assert_eq!(event.final_update_id, Some(105));
        assert_eq!(event.prev_final_update_id, Some(99));
    }

    #[test]
    fn test_decode_bare_event() {
        let msg = r#"{"e":"depthUpdate","U":1,"u":2,"b":[["1","1"]],"a":[]}"#;
        let event = decode_depth(msg).expect("decode");

        assert_eq!(event.update.bids, vec![(100_000_000, 100_000_000)]);
        assert!(event.update.asks.is_empty());
        assert_eq!(event.prev_final_update_id, None);
    }

    #[test]
    fn test_decode_minimal_fields() {
        let event = decode_depth(r#"{"a":[["101.00","1"]]}"#).expect("decode");
        assert_eq!(event.update.len(), 1);
        assert_eq!(event.event_time, None);
    }

    #[test]
    fn test_invalid_price_rejects_message() {
        let msg = r#"{"data":{"a":[["100.00","1"],["oops","1"]],"b":[]}}"#;
        match decode_depth(msg) {
            Err(DecodeError::InvalidNumber { field, value }) => {
                assert_eq!(field, "price");
                assert_eq!(value, "oops");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_size_rejected() {
        let msg = r#"{"data":{"a":[],"b":[["99.00","-1"]]}}"#;
        assert!(matches!(
            decode_depth(msg),
            Err(DecodeError::InvalidNumber { field: "size", .. })
        ));
    }

    #[test]
    fn test_sub_precision_size_is_not_a_removal() {
        let msg = r#"{"a":[["100","0.000000004"]]}"#;
        match decode_depth(msg) {
            Err(DecodeError::InvalidNumber { field, value }) => {
                assert_eq!(field, "size");
                assert_eq!(value, "0.000000004");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_precision_prices_rejected() {
        let msg = r#"{"b":[["100.000000001","1"],["100.000000004","2"]]}"#;
        assert!(matches!(
            decode_depth(msg),
            Err(DecodeError::InvalidNumber { field: "price", .. })
        ));

        // trailing zeros are not extra precision
        let event = decode_depth(r#"{"b":[["100.0000000000","1"]]}"#).expect("decode");
        assert_eq!(event.update.bids, vec![(10_000_000_000, 100_000_000)]);
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(decode_depth("not json"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_wrong_shape_is_json_error() {
        // pair with one element only
        let msg = r#"{"data":{"a":[["100.00"]],"b":[]}}"#;
        assert!(matches!(decode_depth(msg), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_subscription_ack_is_unexpected() {
        let msg = r#"{"result":null,"id":1}"#;
        assert!(matches!(
            decode_depth(msg),
            Err(DecodeError::UnexpectedMessage(_))
        ));
    }

    #[test]
    fn test_other_event_type_is_unexpected() {
        let msg = r#"{"data":{"e":"aggTrade","a":[],"b":[]}}"#;
        assert!(matches!(
            decode_depth(msg),
            Err(DecodeError::UnexpectedMessage(_))
        ));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(200);
        let short = excerpt(&long);
        assert_eq!(short.len(), EXCERPT_LEN + 3);
        assert_eq!(excerpt("short"), "short");
    }
}
