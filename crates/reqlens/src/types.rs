//! Core types for Reqlens

use crate::credentials::Credentials;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to decode a captured request
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DecodeRequest {
    /// The raw transcript or JSON body (required)
    pub input: String,
}

impl DecodeRequest {
    /// Create a new request with the given input
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Result of a successful decode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecodeResult {
    /// The decoded JSON body
    pub payload: Value,

    /// Credentials found in the query string or headers
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl DecodeResult {
    /// Console snippet replaying the search with the decoded credentials
    ///
    /// Available only when both application id and API key are known and
    /// the payload carries a `requests` member.
    pub fn search_snippet(&self) -> Option<String> {
        let app_id = self.credentials.application_id.as_deref()?;
        let api_key = self.credentials.api_key.as_deref()?;
        let requests = self.payload.get("requests").filter(|r| !r.is_null())?;

        Some(format!(
            "window.algoliasearch(\"{}\",\"{}\").search({})",
            app_id, api_key, requests
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with(payload: Value, app_id: Option<&str>, api_key: Option<&str>) -> DecodeResult {
        DecodeResult {
            payload,
            credentials: Credentials {
                application_id: app_id.map(str::to_string),
                api_key: api_key.map(str::to_string),
                client_agent_tokens: vec![],
            },
        }
    }

    #[test]
    fn test_request_new() {
        let req = DecodeRequest::new("{}");
        assert_eq!(req.input, "{}");
    }

    #[test]
    fn test_result_serialization_is_flat() {
        let result = result_with(json!({"query": "yarn"}), Some("APP"), None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({"payload": {"query": "yarn"}, "applicationId": "APP", "clientAgentTokens": []})
        );
    }

    #[test]
    fn test_search_snippet() {
        let result = result_with(
            json!({"requests": [{"indexName": "npm-search"}]}),
            Some("APP"),
            Some("KEY"),
        );
        assert_eq!(
            result.search_snippet().as_deref(),
            Some(r#"window.algoliasearch("APP","KEY").search([{"indexName":"npm-search"}])"#)
        );
    }

    #[test]
    fn test_search_snippet_requires_everything() {
        let requests = json!({"requests": []});
        assert!(result_with(requests.clone(), None, Some("KEY")).search_snippet().is_none());
        assert!(result_with(requests, Some("APP"), None).search_snippet().is_none());
        assert!(result_with(json!({"query": ""}), Some("APP"), Some("KEY"))
            .search_snippet()
            .is_none());
        assert!(result_with(json!({"requests": null}), Some("APP"), Some("KEY"))
            .search_snippet()
            .is_none());
    }
}
