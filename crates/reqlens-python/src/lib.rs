//! Python bindings for Reqlens
//!
//! This module exposes the Reqlens tool contract to Python.

// Allow false positive clippy warning from pyo3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use reqlens::{DecodeError, DecodeRequest, DecodeResult, Tool, ToolBuilder};

/// Convert DecodeError to PyErr
fn to_py_err(e: DecodeError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python wrapper for DecodeResult
#[pyclass(name = "DecodeResult")]
#[derive(Clone)]
pub struct PyDecodeResult {
    inner: DecodeResult,
}

#[pymethods]
impl PyDecodeResult {
    #[getter]
    fn application_id(&self) -> Option<&str> {
        self.inner.credentials.application_id.as_deref()
    }

    #[getter]
    fn api_key(&self) -> Option<&str> {
        self.inner.credentials.api_key.as_deref()
    }

    #[getter]
    fn client_agent_tokens(&self) -> Vec<String> {
        self.inner.credentials.client_agent_tokens.clone()
    }

    /// Get the decoded payload as a JSON string
    fn payload_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.payload).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Get the client-library call snippet, if both keys were found
    fn search_snippet(&self) -> Option<String> {
        self.inner.search_snippet()
    }

    /// Convert to JSON string
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "DecodeResult(application_id={:?}, api_key={:?})",
            self.inner.credentials.application_id, self.inner.credentials.api_key
        )
    }
}

/// Python wrapper for Reqlens Tool
#[pyclass(name = "ReqlensTool")]
pub struct PyReqlensTool {
    inner: Tool,
}

#[pymethods]
impl PyReqlensTool {
    /// Create a new tool
    #[new]
    #[pyo3(signature = (params_key=None, base_url=None))]
    fn new(params_key: Option<String>, base_url: Option<String>) -> Self {
        let mut builder = ToolBuilder::new();

        if let Some(key) = params_key {
            builder = builder.params_key(key);
        }
        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }

        Self {
            inner: builder.build(),
        }
    }

    /// Get tool description
    fn description(&self) -> &'static str {
        self.inner.description()
    }

    /// Get full documentation (llmtxt)
    fn llmtxt(&self) -> &'static str {
        self.inner.llmtxt()
    }

    /// Get input schema as JSON string
    fn input_schema(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.input_schema())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Get output schema as JSON string
    fn output_schema(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.output_schema())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Decode a transcript or JSON body
    fn decode(&self, input: String) -> PyResult<PyDecodeResult> {
        self.inner
            .execute(DecodeRequest::new(input))
            .map(|inner| PyDecodeResult { inner })
            .map_err(to_py_err)
    }
}

/// Decode using default options (convenience function)
#[pyfunction]
fn decode(input: String) -> PyResult<PyDecodeResult> {
    PyReqlensTool::new(None, None).decode(input)
}

/// Build a shareable query string from panel inputs
#[pyfunction]
fn share_query(inputs: Vec<String>) -> String {
    reqlens::share_query(&inputs)
}

/// Recover panel inputs from a shareable query string
#[pyfunction]
fn restore_panels(query: &str) -> Vec<String> {
    reqlens::restore_panels(query)
}

/// Python module definition
#[pymodule]
fn reqlens_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDecodeResult>()?;
    m.add_class::<PyReqlensTool>()?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(share_query, m)?)?;
    m.add_function(wrap_pyfunction!(restore_panels, m)?)?;
    Ok(())
}
