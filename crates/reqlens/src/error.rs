//! Error types for Reqlens

use thiserror::Error;

/// Errors that can occur while decoding a captured request
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input starts with `curl` but carries no inline body flag
    #[error("curl detected, but no {flags} option found")]
    MalformedInvocation {
        /// Accepted flag spellings, quoted and joined for display
        flags: String,
    },

    /// Body is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Configured placeholder base URL does not parse
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl DecodeError {
    /// Create the error for a transcript without a recognized body flag
    pub fn malformed_invocation(accepted: &[&str]) -> Self {
        let quoted: Vec<String> = accepted.iter().map(|flag| format!("\"{}\"", flag)).collect();
        DecodeError::MalformedInvocation {
            flags: list_format(&quoted),
        }
    }
}

/// Join items as a disjunctive list: `a, b or c`
pub fn list_format(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} or {}", head.join(", "), last),
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson(err)
    }
}
