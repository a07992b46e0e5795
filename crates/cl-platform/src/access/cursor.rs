//! Cursor Codec
//!
//! Pagination cursors are base64 over an RFC 3339 timestamp with millisecond
//! precision - the same precision BSON datetimes are stored with, so
//! `decode(encode(t)) == t` holds for every timestamp the store can hold and
//! distinct stored timestamps always produce distinct cursors. The token is
//! opaque to callers and carries no storage-internal identifiers, so it stays
//! valid across process restarts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{PlatformError, Result};

pub fn encode(timestamp: DateTime<Utc>) -> String {
    STANDARD.encode(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Decode an opaque cursor back to its sort key.
///
/// Malformed input is a typed failure carrying the offending token, never a
/// silent default.
pub fn decode(cursor: &str) -> Result<DateTime<Utc>> {
    let bytes = STANDARD
        .decode(cursor)
        .map_err(|_| PlatformError::invalid_cursor(cursor))?;
    let text = String::from_utf8(bytes).map_err(|_| PlatformError::invalid_cursor(cursor))?;
    let parsed = DateTime::parse_from_rfc3339(&text)
        .map_err(|_| PlatformError::invalid_cursor(cursor))?;
    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn round_trips_millisecond_timestamps() {
        for millis in [0, 1, 999, 1_700_000_000_123, 4_102_444_800_000] {
            let t = ts(millis);
            assert_eq!(decode(&encode(t)).unwrap(), t);
        }
    }

    #[test]
    fn distinct_timestamps_produce_distinct_cursors() {
        assert_ne!(encode(ts(1_700_000_000_000)), encode(ts(1_700_000_000_001)));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let mut cursor = encode(ts(1_700_000_000_000));
        cursor.push('!');
        match decode(&cursor) {
            Err(PlatformError::InvalidCursor { token }) => assert_eq!(token, cursor),
            other => panic!("expected InvalidCursor, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn garbage_base64_is_rejected() {
        // Valid base64, but not a timestamp underneath.
        let cursor = STANDARD.encode("not-a-date");
        assert!(matches!(
            decode(&cursor),
            Err(PlatformError::InvalidCursor { .. })
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(decode(""), Err(PlatformError::InvalidCursor { .. })));
    }
}
