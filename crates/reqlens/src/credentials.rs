//! Credential resolution
//!
//! Query parameters take precedence over headers for every field.

use crate::extract::Headers;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Application id parameter and header name
pub const APPLICATION_ID_KEY: &str = "x-algolia-application-id";

/// API key parameter and header name
pub const API_KEY_KEY: &str = "x-algolia-api-key";

/// Client agent parameter and header name
pub const AGENT_KEY: &str = "x-algolia-agent";

/// Credentials carried by a captured request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Application id, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// API key, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Client agent split on `;` and trimmed
    #[serde(default)]
    pub client_agent_tokens: Vec<String>,
}

/// Resolve credentials from the URL query and the header arguments
///
/// Empty values count as absent, so an empty query parameter falls through
/// to the header.
pub fn resolve_credentials(url: &Url, headers: &Headers) -> Credentials {
    let lookup = |key: &str| -> Option<String> {
        query_param(url, key).or_else(|| {
            headers
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
        })
    };

    Credentials {
        application_id: lookup(APPLICATION_ID_KEY),
        api_key: lookup(API_KEY_KEY),
        client_agent_tokens: lookup(AGENT_KEY)
            .map(|agent| split_agent(&agent))
            .unwrap_or_default(),
    }
}

/// First value of a query parameter, when it is not empty
fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Split a client agent string into trimmed tokens
///
/// Empty tokens (from a trailing `;`) are kept.
pub fn split_agent(agent: &str) -> Vec<String> {
    agent.split(';').map(|token| token.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_absent() {
        let creds = resolve_credentials(&url("https://example.org"), &Headers::new());
        assert_eq!(creds, Credentials::default());
    }

    #[test]
    fn test_query_beats_header() {
        let creds = resolve_credentials(
            &url("https://x/?x-algolia-api-key=from-query&x-algolia-application-id=APP"),
            &headers(&[
                ("x-algolia-api-key", "from-header"),
                ("x-algolia-application-id", "OTHER"),
            ]),
        );
        assert_eq!(creds.api_key.as_deref(), Some("from-query"));
        assert_eq!(creds.application_id.as_deref(), Some("APP"));
    }

    #[test]
    fn test_header_fallback() {
        let creds = resolve_credentials(
            &url("https://x/?x-algolia-api-key="),
            &headers(&[("x-algolia-api-key", "from-header")]),
        );
        assert_eq!(creds.api_key.as_deref(), Some("from-header"));
        assert_eq!(creds.application_id, None);
    }

    #[test]
    fn test_empty_first_query_value_falls_back_to_header() {
        let creds = resolve_credentials(
            &url("https://x/?x-algolia-api-key=&x-algolia-api-key=second"),
            &headers(&[("x-algolia-api-key", "from-header")]),
        );
        assert_eq!(creds.api_key.as_deref(), Some("from-header"));
    }

    #[test]
    fn test_header_names_are_exact() {
        let creds = resolve_credentials(
            &url("https://example.org"),
            &headers(&[("X-Algolia-API-Key", "key")]),
        );
        assert_eq!(creds.api_key, None);
    }

    #[test]
    fn test_agent_split() {
        let creds = resolve_credentials(
            &url("https://example.org"),
            &headers(&[("x-algolia-agent", "A (1.0); B (2.0)")]),
        );
        assert_eq!(creds.client_agent_tokens, vec!["A (1.0)", "B (2.0)"]);
    }

    #[test]
    fn test_agent_from_encoded_query() {
        let creds = resolve_credentials(
            &url("https://x/?x-algolia-agent=Algolia%20for%20JavaScript%20(4.0.0)%3B%20Browser%20(lite)"),
            &headers(&[("x-algolia-agent", "ignored")]),
        );
        assert_eq!(
            creds.client_agent_tokens,
            vec!["Algolia for JavaScript (4.0.0)", "Browser (lite)"]
        );
    }

    #[test]
    fn test_agent_trailing_separator_kept() {
        assert_eq!(split_agent("A; B;"), vec!["A", "B", ""]);
    }

    #[test]
    fn test_credentials_serialization() {
        let creds = Credentials {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&creds).unwrap();
        assert!(json.contains("\"apiKey\":\"key\""));
        assert!(json.contains("\"clientAgentTokens\":[]"));
        assert!(!json.contains("applicationId"));
    }
}
