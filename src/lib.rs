// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # resource-kit
//!
//! A minimal, Rust-native toolkit for resource pagination and attribute
//! projection: given one data-listing request, compute the exact page
//! window to apply to an underlying data scope, and decide which fields of
//! each fetched record are exposed, how their values are coerced, and what
//! resumption cursor each record carries.
//!
//! ## Features
//!
//! - **Window Resolution**: Reconciles page number, explicit offset, and
//!   forward/backward cursors into one offset, with size limits enforced
//! - **Opaque Cursors**: Base64 JSON tokens with round-tripped extra keys
//! - **Attribute Guards**: Per-attribute readability checks, omission or
//!   hard error depending on caller context
//! - **Read Typecasting**: Registry-driven value coercion on the way out
//! - **Pluggable Windowing**: Adapter trait plus a custom hook for applying
//!   the window to the host's data scope
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_kit::{
//!     AttributeDeclaration, AttributeProjector, PageWindowResolver,
//!     PaginationRequest, RequestContext, ResourceConfig, TypeRegistry,
//! };
//! use serde_json::json;
//!
//! # fn main() -> resource_kit::Result<()> {
//! let config = ResourceConfig::new("employees").with_cursor_pagination();
//! let context = RequestContext::new();
//!
//! // Resolve the page window for the request.
//! let request = PaginationRequest::new().with_number(2).with_size(10);
//! let window = PageWindowResolver::new(&request, &config)
//!     .resolve(&context)?
//!     .expect("pagination active by default");
//! assert_eq!(window.offset, 0);
//!
//! // Project one fetched record at its position within the page.
//! let registry = TypeRegistry::builtin();
//! let declarations = vec![
//!     AttributeDeclaration::new("id", "integer_id"),
//!     AttributeDeclaration::new("name", "string"),
//! ];
//! let record = json!({"id": 7, "name": "Jane"});
//! let projected = AttributeProjector::new(&config, &registry)
//!     .with_window(&window)
//!     .project_record(&declarations, &record, &context, 3)?;
//!
//! assert_eq!(projected.attributes["id"], json!("7"));
//! assert!(projected.meta.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        One Request                           │
//! │  PaginationRequest ──► PageWindowResolver ──► ResolvedWindow │
//! │                                                   │          │
//! │        WindowAdapter / WindowApplier ◄────────────┤          │
//! │        (host applies skip/take to scope)          │          │
//! │                                                   ▼          │
//! │  per record:  AttributeProjector ──► ProjectedRecord         │
//! │               guards → accessor → typecast → meta.cursor     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Window resolution and projection are pure, synchronous computations over
//! already-fetched inputs. Configuration and attribute declarations are
//! read-only at request time; resolvers and projectors borrow them fresh
//! per request and hold no shared mutable state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the toolkit
pub mod error;

/// Resource-level configuration
pub mod config;

/// Per-request context flags
pub mod context;

/// Opaque cursor token codec
pub mod cursor;

/// Page window resolution and application
pub mod page;

/// Attribute projection over fetched records
pub mod project;

/// Read-side type coercion registry
pub mod typecast;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ResourceConfig;
pub use context::RequestContext;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use page::{
    apply_window, PageWindowResolver, PaginationRequest, ResolvedWindow, WindowAdapter,
    WindowApplier,
};
pub use project::{
    Accessor, AttributeDeclaration, AttributeProjector, Projected, ProjectedRecord, ReadGuard,
    RecordMeta,
};
pub use typecast::{CoerceError, TypeRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
