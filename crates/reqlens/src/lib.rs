//! Reqlens - decoder for captured search API requests
//!
//! This crate turns a raw captured request (a "copy as cURL" transcript or a
//! bare JSON body) into the decoded payload and the API credentials it
//! carries.
//!
//! ## Decoding Stages
//!
//! Decoding is a pure function of the input string. The stages are:
//! - [`unwrap`] - strips the `curl ...` envelope down to the body argument
//! - [`extract`] - finds the target URL and `-H` header arguments
//! - [`credentials`] - resolves application id, API key and agent tokens
//! - [`payload`] - parses the body as JSON and rewrites `params` query strings
//!
//! [`decode`] combines all of them into a [`DecodeResult`].

pub mod credentials;
mod decode;
mod error;
pub mod explain;
pub mod extract;
pub mod payload;
pub mod samples;
pub mod share;
mod tool;
mod types;
pub mod unwrap;

pub use credentials::{resolve_credentials, Credentials};
pub use decode::{decode, decode_with_options, DecodeOptions};
pub use error::DecodeError;
pub use explain::{explain, utf16_len, CodeUnitInfo};
pub use share::{restore_panels, share_query};
pub use tool::{Tool, ToolBuilder};
pub use types::{DecodeRequest, DecodeResult};

/// Reserved payload key whose string value is decoded as a query string
pub const DEFAULT_PARAMS_KEY: &str = "params";

/// Base URL used when the input carries no `curl '<url>'` argument
pub const DEFAULT_BASE_URL: &str = "https://example.org";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Decodes a captured search API request into its JSON payload and credentials.

- Accepts "copy as cURL" transcripts or bare JSON bodies
- Expands URL-encoded `params` strings into typed values
- Extracts application id, API key and client agent tokens
- Pure and offline: no network requests are made"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# Reqlens Tool

Decodes a captured search API request into its JSON payload and credentials.

## Capabilities
- Unwraps `curl` transcripts (`--data-raw`, `--data`, `-d`, `--data-binary`)
- Handles single, double and `$'...'` quoted bodies, and escaped JSON strings
- Rewrites `params` query strings into objects (numbers and arrays recovered)
- Resolves credentials from query parameters first, then `-H` headers

## Input Parameters
- `input` (required): The raw transcript or JSON body

## Output Fields
- `payload`: The decoded JSON body
- `applicationId`: `x-algolia-application-id`, when present
- `apiKey`: `x-algolia-api-key`, when present
- `clientAgentTokens`: `x-algolia-agent` split on `;` and trimmed

## Examples

### Decode a bare body
```json
{"input": "{\"requests\":[{\"indexName\":\"npm-search\",\"params\":\"query=yarn&page=0\"}]}"}
```

### Decode a transcript
```json
{"input": "curl 'https://app-dsn.algolia.net/1/indexes/*/queries' -H 'x-algolia-api-key: key' --data-raw '{\"query\":\"yarn\"}'"}
```

## Error Handling
- A `curl` transcript without a body flag returns an error naming the accepted flags
- A body that is not valid JSON returns the parser error
- A missing or unparseable URL falls back to https://example.org
"#;
