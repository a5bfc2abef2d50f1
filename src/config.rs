//! Resource-level configuration
//!
//! This module contains the static, per-resource settings consumed by window
//! resolution and attribute projection. Configuration is read-only at
//! request time; it can be built in code or loaded from YAML / JSON.

use crate::error::Result;
use serde::{Deserialize, Serialize};

// ============================================================================
// Resource Config
// ============================================================================

/// Static configuration for a single resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Unique resource name (e.g., "employees")
    pub name: String,

    /// Maximum page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Page size used when the request does not specify one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Whether pagination applies even when the request has no page params
    #[serde(default = "default_true")]
    pub default_paginate: bool,

    /// Whether records in this resource carry a resumption cursor
    #[serde(default)]
    pub cursor_paginatable: bool,

    /// Whether raw values pass through read-side type coercion
    #[serde(default = "default_true")]
    pub typecast_reads: bool,
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_page_size() -> u64 {
    20
}

fn default_true() -> bool {
    true
}

impl ResourceConfig {
    /// Create a config with default settings for the named resource
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_page_size: default_max_page_size(),
            default_page_size: default_page_size(),
            default_paginate: true,
            cursor_paginatable: false,
            typecast_reads: true,
        }
    }

    /// Load a resource config from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML fails to parse.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a resource config from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON fails to parse.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the maximum page size
    #[must_use]
    pub fn with_max_page_size(mut self, max: u64) -> Self {
        self.max_page_size = max;
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set whether pagination applies without explicit page params
    #[must_use]
    pub fn with_default_paginate(mut self, default_paginate: bool) -> Self {
        self.default_paginate = default_paginate;
        self
    }

    /// Mark this resource as cursor paginatable
    #[must_use]
    pub fn with_cursor_pagination(mut self) -> Self {
        self.cursor_paginatable = true;
        self
    }

    /// Set whether read-side typecasting applies
    #[must_use]
    pub fn with_typecast_reads(mut self, typecast_reads: bool) -> Self {
        self.typecast_reads = typecast_reads;
        self
    }
}
