//! Attribute projection over fetched records

use super::types::{
    Accessor, AttributeDeclaration, Projected, ProjectedRecord, ReadGuard, RecordMeta,
};
use crate::config::ResourceConfig;
use crate::context::RequestContext;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::page::ResolvedWindow;
use crate::typecast::TypeRegistry;
use serde_json::Value;
use tracing::trace;

/// Projects declared attributes of one resource's records
///
/// Built per request from borrowed, read-only inputs. The resolved window,
/// when present, feeds per-record cursor metadata; nothing is cached
/// between records, so projecting record *i* never observes state from
/// record *j*.
#[derive(Debug, Clone, Copy)]
pub struct AttributeProjector<'a> {
    config: &'a ResourceConfig,
    registry: &'a TypeRegistry,
    window: Option<&'a ResolvedWindow>,
    include_extra: bool,
}

impl<'a> AttributeProjector<'a> {
    /// Create a projector for one resource
    pub fn new(config: &'a ResourceConfig, registry: &'a TypeRegistry) -> Self {
        Self {
            config,
            registry,
            window: None,
            include_extra: false,
        }
    }

    /// Attach the resolved page window, enabling cursor metadata
    #[must_use]
    pub fn with_window(mut self, window: &'a ResolvedWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Also project attributes declared as extra
    #[must_use]
    pub fn with_extra_fields(mut self) -> Self {
        self.include_extra = true;
        self
    }

    /// Project a single attribute of a record
    ///
    /// # Errors
    ///
    /// - [`Error::UnreadableAttribute`] when a closure guard denies access
    ///   in a structured-query context
    /// - [`Error::TypecastFailed`] when the read-side coercion rejects a
    ///   non-null raw value
    /// - [`Error::UnknownType`] when the declared type is not registered
    pub fn project(
        &self,
        declaration: &AttributeDeclaration,
        record: &Value,
        context: &RequestContext,
    ) -> Result<Projected> {
        if declaration.extra && !self.include_extra {
            return Ok(Projected::Omitted);
        }

        let allowed = match &declaration.readable {
            ReadGuard::Always => true,
            // Never omits silently even in structured-query contexts; only
            // a denying closure guard is an error there.
            ReadGuard::Never => return Ok(Projected::Omitted),
            ReadGuard::ContextFree(check) => check(),
            ReadGuard::RecordAware(check) => check(record),
            ReadGuard::FieldAware(check) => check(record, &declaration.name),
        };
        if !allowed {
            if context.structured_query {
                return Err(Error::unreadable(&self.config.name, &declaration.name));
            }
            trace!(
                resource = %self.config.name,
                attribute = %declaration.name,
                "guard denied attribute, omitting"
            );
            return Ok(Projected::Omitted);
        }

        let raw = match &declaration.accessor {
            Accessor::Field => record
                .get(&declaration.name)
                .cloned()
                .unwrap_or(Value::Null),
            Accessor::Custom(read) | Accessor::Serializer(read) => read(record),
        };

        Ok(Projected::Value(self.typecast(declaration, raw)?))
    }

    /// Project a whole record and attach its envelope metadata
    ///
    /// `position` is the record's 0-based ordinal within the fetched page,
    /// supplied by the iteration driver. Cursor metadata is attached only
    /// when the resource is cursor paginatable and a window is present.
    ///
    /// # Errors
    ///
    /// Propagates the per-attribute errors of [`AttributeProjector::project`].
    pub fn project_record(
        &self,
        declarations: &[AttributeDeclaration],
        record: &Value,
        context: &RequestContext,
        position: usize,
    ) -> Result<ProjectedRecord> {
        let mut attributes = serde_json::Map::new();
        for declaration in declarations {
            if let Projected::Value(value) = self.project(declaration, record, context)? {
                attributes.insert(declaration.name.clone(), value);
            }
        }

        let meta = match (self.config.cursor_paginatable, self.window) {
            (true, Some(window)) => Some(RecordMeta {
                cursor: self.record_cursor(window, position)?,
            }),
            _ => None,
        };

        Ok(ProjectedRecord { attributes, meta })
    }

    /// Compute the resumption cursor for the record at `position`
    ///
    /// The encoded offset is one-based: resuming from it yields the record
    /// immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor payload fails to serialize.
    pub fn record_cursor(&self, window: &ResolvedWindow, position: usize) -> Result<String> {
        // Saturate rather than wrap near u64::MAX; no real page reaches it.
        let offset = window
            .starting_offset
            .saturating_add(position as u64)
            .saturating_add(1);
        Cursor::at(offset).encode()
    }

    fn typecast(&self, declaration: &AttributeDeclaration, raw: Value) -> Result<Value> {
        // Nulls never reach a coercion function.
        if !self.config.typecast_reads || raw.is_null() {
            return Ok(raw);
        }

        let coercion = self
            .registry
            .get(&declaration.type_name)
            .ok_or_else(|| Error::unknown_type(&declaration.type_name))?;

        coercion(&raw).map_err(|source| Error::TypecastFailed {
            resource: self.config.name.clone(),
            attribute: declaration.name.clone(),
            value: raw,
            type_name: declaration.type_name.clone(),
            source,
        })
    }
}
