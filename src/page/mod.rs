//! Page window resolution
//!
//! Reconciles the four pagination input styles (page number, explicit
//! offset, forward cursor, backward cursor) into a single resolved
//! `(number, size, offset)` window, enforces the resource's size limits,
//! and applies the window to an underlying data scope through a pluggable
//! adapter or custom hook.

mod resolver;
mod types;

pub use resolver::{apply_window, PageWindowResolver, WindowAdapter, WindowApplier};
pub use types::{PaginationRequest, ResolvedWindow};
