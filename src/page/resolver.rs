//! Page window resolution and application

use super::types::{PaginationRequest, ResolvedWindow};
use crate::config::ResourceConfig;
use crate::context::RequestContext;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use tracing::debug;

// ============================================================================
// Resolver
// ============================================================================

/// Resolves one request's pagination parameters into a page window
///
/// Borrowed inputs only; a resolver is built per request and holds no
/// state of its own, so nothing here is shared across requests.
#[derive(Debug, Clone, Copy)]
pub struct PageWindowResolver<'a> {
    request: &'a PaginationRequest,
    config: &'a ResourceConfig,
}

impl<'a> PageWindowResolver<'a> {
    /// Create a resolver for one request against one resource
    pub fn new(request: &'a PaginationRequest, config: &'a ResourceConfig) -> Self {
        Self { request, config }
    }

    /// Resolve the page window
    ///
    /// Returns `Ok(None)` when pagination does not apply: the resource has
    /// `default_paginate: false` and the request carries no explicit page
    /// params. The size limit is still enforced in that case, before the
    /// activation decision.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedPageSize`] when the size exceeds the resource max
    /// - [`Error::UnsupportedPagination`] when pagination is explicitly
    ///   requested on a nested scope shared by more than one parent record
    /// - [`Error::CursorDecode`] when a `before`/`after` token is malformed;
    ///   never silently falls back to offset 0
    /// - [`Error::InvalidPageParam`] for a zero page size or number
    pub fn resolve(&self, context: &RequestContext) -> Result<Option<ResolvedWindow>> {
        let size = self.request.size.unwrap_or(self.config.default_page_size);
        if size > self.config.max_page_size {
            return Err(Error::UnsupportedPageSize {
                requested: size,
                max: self.config.max_page_size,
            });
        }

        // A single child scope serving multiple parents cannot be windowed:
        // the offset would apply per parent while the scope is shared.
        if self.request.requested() && context.sideload_parent_count > 1 {
            return Err(Error::UnsupportedPagination);
        }

        if !self.config.default_paginate && !self.request.requested() {
            debug!(resource = %self.config.name, "pagination not requested, skipping");
            return Ok(None);
        }

        if size == 0 {
            return Err(Error::invalid_page_param(
                "page[size]",
                "must be a positive integer",
            ));
        }

        let number = self.request.number.unwrap_or(1);
        if number == 0 {
            return Err(Error::invalid_page_param(
                "page[number]",
                "must be a positive integer",
            ));
        }

        let mut offset = self.request.offset.unwrap_or(0);

        if let Some(before) = self.decode_cursor(self.request.before.as_deref())? {
            if let Some(before_offset) = before.offset {
                // Reconstructs the page immediately preceding the cursor's
                // recorded position. The -2 pairs with the forward cursor's
                // one-based "+1" encoding; preserved exactly for token
                // compatibility.
                let back = i128::from(size) * i128::from(number) + 2;
                offset = u64::try_from(i128::from(before_offset) - back).unwrap_or(0);
            }
        }

        // number >= 1 here, but number * size can still exceed u64 on
        // hostile input; reject rather than wrap.
        let mut starting_offset = (number - 1).checked_mul(size).ok_or_else(|| {
            Error::invalid_page_param("page[number]", "page window exceeds addressable offsets")
        })?;

        if let Some(after) = self.decode_cursor(self.request.after.as_deref())? {
            if let Some(after_offset) = after.offset {
                // Forward cursor wins over any offset computed above.
                offset = after_offset;
                starting_offset = after_offset;
            }
        }

        let window = ResolvedWindow {
            number,
            size,
            offset,
            starting_offset,
        };
        debug!(
            resource = %self.config.name,
            number = window.number,
            size = window.size,
            offset = window.offset,
            "resolved page window"
        );
        Ok(Some(window))
    }

    fn decode_cursor(&self, token: Option<&str>) -> Result<Option<Cursor>> {
        token.map(Cursor::decode).transpose()
    }
}

// ============================================================================
// Window Application
// ============================================================================

/// Adapter seam for applying a window to an underlying data scope
///
/// Implemented by the host's data layer; this crate never constructs the
/// actual "skip N / take M" query.
pub trait WindowAdapter<S> {
    /// Whether this adapter accepts an offset parameter
    ///
    /// Legacy adapters that only understand `(scope, number, size)` return
    /// false and are invoked through [`WindowAdapter::paginate_legacy`].
    fn supports_offset(&self) -> bool {
        true
    }

    /// Apply the window to the scope
    fn paginate(&self, scope: S, number: u64, size: u64, offset: u64) -> S;

    /// Apply the window without an offset (legacy adapter form)
    fn paginate_legacy(&self, scope: S, number: u64, size: u64) -> S {
        self.paginate(scope, number, size, 0)
    }
}

/// Custom pagination hook, configured per resource
///
/// When supplied, it replaces the standard adapter windowing call and is
/// expected to apply an equivalent windowing operation on the scope.
pub trait WindowApplier<S>: Send + Sync {
    /// Apply the resolved window to the scope
    fn apply(&self, scope: S, window: &ResolvedWindow, context: &RequestContext) -> S;
}

impl<S, F> WindowApplier<S> for F
where
    F: Fn(S, &ResolvedWindow, &RequestContext) -> S + Send + Sync,
{
    fn apply(&self, scope: S, window: &ResolvedWindow, context: &RequestContext) -> S {
        self(scope, window, context)
    }
}

/// Apply a resolved window to a scope
///
/// Delegates to the custom hook when one is configured, otherwise to the
/// standard adapter call, using the legacy offsetless form for adapters
/// that do not accept an offset.
pub fn apply_window<S>(
    scope: S,
    window: &ResolvedWindow,
    context: &RequestContext,
    adapter: &dyn WindowAdapter<S>,
    custom: Option<&dyn WindowApplier<S>>,
) -> S {
    if let Some(hook) = custom {
        hook.apply(scope, window, context)
    } else if adapter.supports_offset() {
        adapter.paginate(scope, window.number, window.size, window.offset)
    } else {
        adapter.paginate_legacy(scope, window.number, window.size)
    }
}
