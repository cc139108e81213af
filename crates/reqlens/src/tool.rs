//! Tool builder and contract for Reqlens

use crate::decode::{decode_with_options, DecodeOptions};
use crate::error::DecodeError;
use crate::types::{DecodeRequest, DecodeResult};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT};
use schemars::schema_for;

/// Builder for configuring the Reqlens tool
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    /// Reserved params key
    params_key: Option<String>,
    /// Placeholder base URL
    base_url: Option<String>,
}

impl ToolBuilder {
    /// Create a new tool builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key whose string values are expanded as query strings
    pub fn params_key(mut self, key: impl Into<String>) -> Self {
        self.params_key = Some(key.into());
        self
    }

    /// Set the base URL used when no URL argument is present
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        let defaults = DecodeOptions::default();
        Tool {
            options: DecodeOptions {
                params_key: self.params_key.unwrap_or(defaults.params_key),
                base_url: self.base_url.unwrap_or(defaults.base_url),
            },
        }
    }
}

/// Configured Reqlens tool
#[derive(Debug, Clone)]
pub struct Tool {
    options: DecodeOptions,
}

impl Default for Tool {
    fn default() -> Self {
        ToolBuilder::new().build()
    }
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get the options used by [`Tool::execute`]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(DecodeRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(DecodeResult);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Execute the tool with the given request
    pub fn execute(&self, req: DecodeRequest) -> Result<DecodeResult, DecodeError> {
        decode_with_options(&req.input, &self.options)
    }
}
