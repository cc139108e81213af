//! Payload parsing
//!
//! The body is parsed as plain JSON first, then walked bottom-up. Every
//! object property named after the params key whose value is a string is
//! replaced by an object built from that string read as a query string.
//! Values that look like JSON arrays or numbers are given back their type.

use crate::error::DecodeError;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Number, Value};

/// Largest integer a JSON number can carry without losing precision
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse a body and expand its `params_key` query strings
pub fn parse_payload(body: &str, params_key: &str) -> Result<Value, DecodeError> {
    let mut value: Value = serde_json::from_str(body)?;
    let rewritten = rewrite_params(&mut value, params_key);
    tracing::debug!(rewritten, "Parsed payload");
    Ok(value)
}

/// Post-order walk; returns the number of rewritten properties
fn rewrite_params(value: &mut Value, params_key: &str) -> usize {
    match value {
        Value::Object(map) => {
            let mut rewritten = 0;
            for (key, child) in map.iter_mut() {
                rewritten += rewrite_params(child, params_key);
                if key == params_key {
                    if let Some(query) = child.as_str() {
                        let decoded = decode_params(query);
                        *child = Value::Object(decoded);
                        rewritten += 1;
                    }
                }
            }
            rewritten
        }
        Value::Array(items) => items
            .iter_mut()
            .map(|item| rewrite_params(item, params_key))
            .sum(),
        _ => 0,
    }
}

/// Decode a URL-encoded query string into typed values
///
/// The whole string is percent-decoded once before being split into pairs.
/// A repeated key keeps its first position and its last value.
pub fn decode_params(query: &str) -> Map<String, Value> {
    let decoded = percent_decode_str(query).decode_utf8_lossy();
    let pairs = decoded.strip_prefix('?').unwrap_or(&*decoded);

    url::form_urlencoded::parse(pairs.as_bytes())
        .map(|(key, value)| (key.into_owned(), reinterpret(&value)))
        .fold(Map::new(), |mut map, (key, value)| {
            map.insert(key, value);
            map
        })
}

/// Recover the type of a flattened query value
fn reinterpret(value: &str) -> Value {
    if is_fake_array(value) {
        return serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    }
    if let Some(number) = parse_fake_number(value) {
        return Value::Number(number);
    }
    Value::String(value.to_string())
}

fn is_fake_array(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// Parse a decimal number literal
///
/// Accepts `[+-]? (digits ['.' digits*] | '.' digits) ([eE] [+-]? digits)?`
/// with no surrounding whitespace. Integral values are kept as integers.
pub fn parse_fake_number(value: &str) -> Option<Number> {
    if !is_decimal_literal(value) {
        return None;
    }
    let parsed: f64 = value.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    if parsed.fract() == 0.0 && parsed.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(parsed as i64));
    }
    Number::from_f64(parsed)
}

fn is_decimal_literal(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: &str) -> Value {
        parse_payload(body, "params").unwrap()
    }

    #[test]
    fn test_plain_json_passthrough() {
        let body = r#"{"requests":[{"indexName":"npm-search","query":"yarn","page":2}],"n":null}"#;
        assert_eq!(parse(body), serde_json::from_str::<Value>(body).unwrap());
        assert_eq!(parse("[1,2,3]"), json!([1, 2, 3]));
        assert_eq!(parse("\"text\""), json!("text"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_payload("{not json", "params").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(
            parse(r#"{"params":"page=0&query=yarn"}"#),
            json!({"params": {"page": 0, "query": "yarn"}})
        );
    }

    #[test]
    fn test_fake_arrays() {
        assert_eq!(
            parse(r#"{"params":"key=[1,2]"}"#),
            json!({"params": {"key": [1, 2]}})
        );
        assert_eq!(
            parse(r#"{"params":"key=[not json"}"#),
            json!({"params": {"key": "[not json"}})
        );
        assert_eq!(
            parse(r#"{"params":"key=[not json]"}"#),
            json!({"params": {"key": "[not json]"}})
        );
    }

    #[test]
    fn test_percent_decoded_before_split() {
        assert_eq!(
            parse(r#"{"params":"facets=%5B%22a%22%2C%22b%22%5D&tagFilters=&highlightPreTag=%3Cem%3E"}"#),
            json!({"params": {"facets": ["a", "b"], "tagFilters": "", "highlightPreTag": "<em>"}})
        );
    }

    #[test]
    fn test_repeated_key_keeps_first_position_last_value() {
        let map = decode_params("a=1&b=2&a=3");
        let entries: Vec<(&String, &Value)> = map.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (&"a".to_string(), &json!(3)));
        assert_eq!(entries[1], (&"b".to_string(), &json!(2)));
    }

    #[test]
    fn test_non_string_params_untouched() {
        let body = r#"{"params":{"page":"0","facets":["*"]}}"#;
        assert_eq!(parse(body), json!({"params": {"page": "0", "facets": ["*"]}}));
    }

    #[test]
    fn test_nested_params_rewritten() {
        assert_eq!(
            parse(r#"{"requests":[{"params":"hitsPerPage=5"},{"params":"query=a+b"}]}"#),
            json!({"requests": [{"params": {"hitsPerPage": 5}}, {"params": {"query": "a b"}}]})
        );
    }

    #[test]
    fn test_custom_params_key() {
        assert_eq!(
            parse_payload(r#"{"params":"a=1","query":"b=2"}"#, "query").unwrap(),
            json!({"params": "a=1", "query": {"b": 2}})
        );
    }

    #[test]
    fn test_parse_fake_number() {
        assert_eq!(parse_fake_number("0"), Some(Number::from(0)));
        assert_eq!(parse_fake_number("-12"), Some(Number::from(-12)));
        assert_eq!(parse_fake_number("1e3"), Some(Number::from(1000)));
        assert_eq!(parse_fake_number("2.5"), Number::from_f64(2.5));
        assert_eq!(parse_fake_number(".5"), Number::from_f64(0.5));
        assert_eq!(parse_fake_number("+7."), Some(Number::from(7)));
        assert_eq!(parse_fake_number(""), None);
        assert_eq!(parse_fake_number(" 1"), None);
        assert_eq!(parse_fake_number("0x10"), None);
        assert_eq!(parse_fake_number("1e"), None);
        assert_eq!(parse_fake_number("."), None);
        assert_eq!(parse_fake_number("Infinity"), None);
        assert_eq!(parse_fake_number("1e999"), None);
        assert_eq!(parse_fake_number("yarn"), None);
    }
}
