//! Pagination request and resolved window types

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Pagination parameters as supplied by the request
///
/// All fields are optional; the resolver fills in resource defaults. The
/// `before`/`after` fields hold opaque cursor tokens and are decoded during
/// resolution, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationRequest {
    /// Requested page number (1-based)
    pub number: Option<u64>,

    /// Requested page size
    pub size: Option<u64>,

    /// Explicit record offset into the scope
    pub offset: Option<u64>,

    /// Opaque backward cursor token
    pub before: Option<String>,

    /// Opaque forward cursor token
    pub after: Option<String>,
}

impl PaginationRequest {
    /// Create an empty pagination request
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `page[...]` parameter bag of string-encoded values
    ///
    /// Keys are the bare parameter names (`number`, `size`, `offset`,
    /// `before`, `after`); integer values arrive as decimal strings, the
    /// way a query-string layer hands them over. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageParam`] when an integer parameter fails
    /// to parse or is zero where a positive value is required.
    pub fn from_page_params(params: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            number: parse_positive(params, "number")?,
            size: parse_positive(params, "size")?,
            offset: parse_non_negative(params, "offset")?,
            before: params.get("before").cloned(),
            after: params.get("after").cloned(),
        })
    }

    /// Set the page number
    #[must_use]
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set an explicit offset
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set a backward cursor token
    #[must_use]
    pub fn with_before(mut self, token: impl Into<String>) -> Self {
        self.before = Some(token.into());
        self
    }

    /// Set a forward cursor token
    #[must_use]
    pub fn with_after(mut self, token: impl Into<String>) -> Self {
        self.after = Some(token.into());
        self
    }

    /// Whether pagination was explicitly requested
    ///
    /// True when `size` or `number` is present; this is what gates
    /// pagination for resources configured with `default_paginate: false`,
    /// and what makes pagination on a shared nested scope an error.
    pub fn requested(&self) -> bool {
        self.size.is_some() || self.number.is_some()
    }
}

fn parse_positive(params: &HashMap<String, String>, key: &str) -> Result<Option<u64>> {
    match parse_non_negative(params, key)? {
        Some(0) => Err(Error::invalid_page_param(
            format!("page[{key}]"),
            "must be a positive integer",
        )),
        other => Ok(other),
    }
}

fn parse_non_negative(params: &HashMap<String, String>, key: &str) -> Result<Option<u64>> {
    params
        .get(key)
        .map(|value| {
            value.trim().parse::<u64>().map_err(|_| {
                Error::invalid_page_param(
                    format!("page[{key}]"),
                    format!("'{value}' is not a non-negative integer"),
                )
            })
        })
        .transpose()
}

/// The resolved page window for one request
///
/// Created fresh per request and immutable once computed; consumed both by
/// the scope windowing call and by per-record cursor metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    /// Page number (1-based)
    pub number: u64,

    /// Page size
    pub size: u64,

    /// Record offset to apply to the scope
    pub offset: u64,

    /// Base offset for per-record cursor metadata: `(number - 1) * size`,
    /// replaced by the decoded `after` cursor offset when one was supplied
    pub starting_offset: u64,
}
