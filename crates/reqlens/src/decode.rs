//! Decode entry points
//!
//! The body branch (unescape, unwrap, unquote, parse) and the credential
//! branch (URL and headers from the raw input) run independently and
//! are joined into a [`DecodeResult`].

use crate::credentials::resolve_credentials;
use crate::error::DecodeError;
use crate::extract::{extract_headers, extract_url};
use crate::payload::parse_payload;
use crate::types::DecodeResult;
use crate::unwrap::{remove_escapes, strip_quotes, unwrap_invocation};
use crate::{DEFAULT_BASE_URL, DEFAULT_PARAMS_KEY};

/// Decode options that can be configured via tool builder
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Key whose string values are expanded as query strings
    pub params_key: String,
    /// Base URL for missing or relative URL arguments
    pub base_url: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            params_key: DEFAULT_PARAMS_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Decode a captured request with default options
///
/// For custom options, use [`decode_with_options`].
pub fn decode(raw: &str) -> Result<DecodeResult, DecodeError> {
    decode_with_options(raw, &DecodeOptions::default())
}

/// Decode a captured request with custom options
///
/// Either the whole decode succeeds or the first error is returned.
pub fn decode_with_options(
    raw: &str,
    options: &DecodeOptions,
) -> Result<DecodeResult, DecodeError> {
    let body = strip_quotes(&unwrap_invocation(&remove_escapes(raw))?);
    let payload = parse_payload(&body, &options.params_key)?;

    let url = extract_url(raw, &options.base_url)?;
    let headers = extract_headers(raw);
    let credentials = resolve_credentials(&url, &headers);

    tracing::debug!(
        url = %url,
        headers = headers.len(),
        agent_tokens = credentials.client_agent_tokens.len(),
        "Decoded request"
    );

    Ok(DecodeResult {
        payload,
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_options_default() {
        let options = DecodeOptions::default();
        assert_eq!(options.params_key, "params");
        assert_eq!(options.base_url, "https://example.org");
    }

    #[test]
    fn test_decode_bare_json() {
        let result = decode(r#"{"requests":[{"indexName":"npm-search","params":"query=yarn&page=0&hitsPerPage=5"}]}"#).unwrap();
        assert_eq!(
            result.payload,
            json!({"requests": [{"indexName": "npm-search", "params": {"query": "yarn", "page": 0, "hitsPerPage": 5}}]})
        );
        assert_eq!(result.credentials.application_id, None);
        assert_eq!(result.credentials.api_key, None);
        assert!(result.credentials.client_agent_tokens.is_empty());
    }

    #[test]
    fn test_decode_escaped_json() {
        let result = decode(r#""{\"query\":\"yarn\",\"params\":\"page=1\"}""#).unwrap();
        assert_eq!(result.payload, json!({"query": "yarn", "params": {"page": 1}}));
    }

    #[test]
    fn test_decode_single_quoted_body() {
        let result = decode(r#"'{"query":"yarn"}'"#).unwrap();
        assert_eq!(result.payload, json!({"query": "yarn"}));
    }

    #[test]
    fn test_decode_missing_body_flag() {
        let err = decode("curl 'https://x' -H 'a: b'").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedInvocation { .. }));
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(decode(""), Err(DecodeError::InvalidJson(_))));
        assert!(matches!(
            decode("curl 'https://x' --data-raw 'query=yarn'"),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_decode_with_custom_options() {
        let options = DecodeOptions {
            params_key: "query".to_string(),
            base_url: "https://fallback.example.com".to_string(),
        };
        let result = decode_with_options(r#"{"query":"page=2"}"#, &options).unwrap();
        assert_eq!(result.payload, json!({"query": {"page": 2}}));

        let options = DecodeOptions {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            decode_with_options("{}", &options),
            Err(DecodeError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let raw = "curl 'https://x/?x-algolia-api-key=k' -H 'x-algolia-agent: A; B' --data-raw '{\"params\":\"a=1\"}'";
        assert_eq!(decode(raw).unwrap(), decode(raw).unwrap());
    }
}
