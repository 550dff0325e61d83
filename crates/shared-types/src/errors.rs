//! Common error types used across all Graph Explorer crates
//!
//! Missing optional page elements are not errors: the feature that needs them
//! is skipped. These variants cover the failures that remain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum GraphExplorerError {
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },

    #[error("Chart widget call failed: {call}: {message}")]
    ChartWidget { call: String, message: String },

    #[error("Invalid event payload: {message}")]
    InvalidPayload { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type GraphExplorerResult<T> = Result<T, GraphExplorerError>;

impl GraphExplorerError {
    pub fn chart_widget(call: &str, err: impl std::fmt::Display) -> Self {
        GraphExplorerError::ChartWidget {
            call: call.to_string(),
            message: err.to_string(),
        }
    }

    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        GraphExplorerError::InvalidConfig {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: GraphExplorerError,
    pub component: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: GraphExplorerError) -> Self {
        Self {
            success: false,
            error,
            component: None,
        }
    }

    pub fn with_component(mut self, component: &str) -> Self {
        self.component = Some(component.to_string());
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"Internal","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for GraphExplorerError {
    fn from(err: serde_json::Error) -> Self {
        GraphExplorerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<wasm_bindgen::JsValue> for GraphExplorerError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        GraphExplorerError::JsInterop { message }
    }
}

impl From<GraphExplorerError> for wasm_bindgen::JsValue {
    fn from(err: GraphExplorerError) -> Self {
        wasm_bindgen::JsValue::from_str(&ErrorResponse::new(err).to_json())
    }
}
