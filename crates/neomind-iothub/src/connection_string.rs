//! Tokenizer for `Key=Value;Key=Value` connection strings.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Split a connection string into its key/value pairs.
///
/// Blank segments are skipped. Each segment is split on its first `=`, so
/// base64 values with trailing padding survive intact. Keys and values are
/// trimmed; a repeated key keeps its last value.
pub fn parse(raw: &str) -> Result<HashMap<String, String>> {
    let mut pairs = HashMap::new();

    for segment in raw.trim().split(';') {
        if segment.trim().is_empty() {
            continue;
        }

        let (key, value) = segment.split_once('=').ok_or_else(|| {
            Error::MalformedConnectionString(
                "each part of the connection string must have an '=' assignment".to_string(),
            )
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::MalformedConnectionString(
                "connection string contains an empty key".to_string(),
            ));
        }

        pairs.insert(key.to_string(), value.trim().to_string());
    }

    tracing::trace!(keys = pairs.len(), "Parsed connection string");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let pairs = parse("HostName=a.b.c;SharedAccessKeyName=k;SharedAccessKey=s").unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs["HostName"], "a.b.c");
        assert_eq!(pairs["SharedAccessKeyName"], "k");
        assert_eq!(pairs["SharedAccessKey"], "s");
    }

    #[test]
    fn test_parse_keeps_padding_in_values() {
        let pairs = parse("SharedAccessKey=abc+def/ghi==").unwrap();
        assert_eq!(pairs["SharedAccessKey"], "abc+def/ghi==");
    }

    #[test]
    fn test_parse_skips_blank_segments_and_trims() {
        let pairs = parse("  HostName = h ;; DeviceId=d; ").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["HostName"], "h");
        assert_eq!(pairs["DeviceId"], "d");
    }

    #[test]
    fn test_parse_keys_are_case_sensitive() {
        let pairs = parse("hostname=h").unwrap();
        assert!(!pairs.contains_key("HostName"));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let pairs = parse("DeviceId=a;DeviceId=b").unwrap();
        assert_eq!(pairs["DeviceId"], "b");
    }

    #[test]
    fn test_parse_rejects_segment_without_assignment() {
        let err = parse("HostName=h;garbage").unwrap_err();
        assert!(matches!(err, Error::MalformedConnectionString(_)));
    }

    #[test]
    fn test_parse_rejects_empty_key() {
        assert!(matches!(
            parse("=value").unwrap_err(),
            Error::MalformedConnectionString(_)
        ));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
    }
}
