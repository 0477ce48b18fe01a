//! Error types for widgetbay.
//!
//! Every failure a caller can observe maps onto one of the variants below.
//! Asset lookups are the exception to synchronous propagation: the server
//! turns [`WidgetError::AssetNotFound`] into a 404 at the HTTP boundary.

use thiserror::Error;

/// Main error type for the widgetbay library.
#[derive(Debug, Error)]
pub enum WidgetError {
    // Declaration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Instance call errors
    #[error("{message}")]
    Usage { message: String },

    #[error("Could not convert component args to JSON: {message}")]
    Marshalling {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Could not encode table argument '{arg}': {message}")]
    TableEncoding { arg: String, message: String },

    // Asset errors
    #[error("{path} {reason}")]
    AssetNotFound { path: String, reason: String },
}

/// Result type alias for widgetbay operations.
pub type Result<T> = std::result::Result<T, WidgetError>;

impl WidgetError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        WidgetError::Config {
            message: message.into(),
        }
    }

    /// Create an asset-not-found error for the original request path.
    pub fn asset_not_found(path: impl Into<String>, reason: impl Into<String>) -> Self {
        WidgetError::AssetNotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a JSON encode failure raised while marshalling instance arguments.
    pub fn marshalling(err: serde_json::Error) -> Self {
        WidgetError::Marshalling {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Whether this error should degrade to a 404 rather than propagate.
    pub fn is_asset_not_found(&self) -> bool {
        matches!(self, WidgetError::AssetNotFound { .. })
    }
}
