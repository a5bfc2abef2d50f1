//! Error types for resource-kit
//!
//! This module defines the error hierarchy for the entire toolkit.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Every variant stems from invalid input or configuration, so nothing in
//! this crate is retryable; errors are raised synchronously to the caller
//! and recovery (e.g. mapping to an HTTP 400 vs 422) belongs to the
//! surrounding request layer.

use crate::typecast::CoerceError;
use thiserror::Error;

/// The main error type for resource-kit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// The requested page size exceeds the resource's configured maximum
    #[error("Requested page size {requested} exceeds max page size {max}")]
    UnsupportedPageSize {
        /// Size the request asked for
        requested: u64,
        /// Maximum size the resource allows
        max: u64,
    },

    /// Pagination was requested on a nested scope shared by multiple parents
    #[error("Pagination not supported on nested relationships with multiple parents")]
    UnsupportedPagination,

    /// A `before`/`after` cursor token failed to decode
    #[error("Failed to decode pagination cursor: {message}")]
    CursorDecode {
        /// Which decode stage failed and why
        message: String,
    },

    // ============================================================================
    // Projection Errors
    // ============================================================================
    /// A readability guard denied the attribute in a structured-query context
    #[error("Attribute '{attribute}' on resource '{resource}' is not readable in this context")]
    UnreadableAttribute {
        /// Resource owning the attribute
        resource: String,
        /// The denied attribute
        attribute: String,
    },

    /// A read-side coercion rejected a non-null raw value
    #[error(
        "Failed to typecast attribute '{attribute}' on resource '{resource}' \
         (type '{type_name}', raw value {value}): {source}"
    )]
    TypecastFailed {
        /// Resource owning the attribute
        resource: String,
        /// The attribute being coerced
        attribute: String,
        /// The raw value handed to the coercion
        value: serde_json::Value,
        /// Declared type name of the attribute
        type_name: String,
        /// The underlying coercion failure
        source: CoerceError,
    },

    /// An attribute declares a type name the registry does not know
    #[error("Unknown attribute type '{type_name}'")]
    UnknownType {
        /// The unregistered type name
        type_name: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// A `page[...]` parameter failed to parse or is out of range
    #[error("Invalid page parameter '{param}': {message}")]
    InvalidPageParam {
        /// The offending parameter, e.g. `page[size]`
        param: String,
        /// Why it was rejected
        message: String,
    },

    /// Resource configuration failed to parse as YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A JSON payload failed to parse or serialize
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a cursor decode error
    pub fn cursor_decode(message: impl Into<String>) -> Self {
        Self::CursorDecode {
            message: message.into(),
        }
    }

    /// Create an unreadable attribute error
    pub fn unreadable(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UnreadableAttribute {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an unknown type error
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid page parameter error
    pub fn invalid_page_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPageParam {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Always false today: every variant stems from invalid input or
    /// configuration, not from a transient condition. Kept so callers can
    /// branch uniformly alongside errors from their own layers.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for resource-kit
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedPageSize {
            requested: 500,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "Requested page size 500 exceeds max page size 100"
        );

        let err = Error::cursor_decode("not base64");
        assert_eq!(
            err.to_string(),
            "Failed to decode pagination cursor: not base64"
        );

        let err = Error::unreadable("employees", "salary");
        assert_eq!(
            err.to_string(),
            "Attribute 'salary' on resource 'employees' is not readable in this context"
        );
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!Error::UnsupportedPagination.is_retryable());
        assert!(!Error::cursor_decode("bad").is_retryable());
        assert!(!Error::unknown_type("uuid").is_retryable());
        assert!(!Error::invalid_page_param("page[size]", "not a number").is_retryable());
    }
}
