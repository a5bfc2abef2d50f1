//! Attribute declaration and projection output types

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Read Guards
// ============================================================================

/// Per-attribute readability guard
///
/// Selected once at declaration time; the projector dispatches on the
/// variant instead of inspecting anything at request time. Closure guards
/// that evaluate falsy omit the attribute, or fail the request in a
/// structured-query context.
#[derive(Clone)]
pub enum ReadGuard {
    /// Always projected
    Always,
    /// Never projected (and never an error)
    Never,
    /// Resource-level check, independent of the record
    ContextFree(Arc<dyn Fn() -> bool + Send + Sync>),
    /// Check against the record being projected
    RecordAware(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
    /// Check against the record and the attribute name
    FieldAware(Arc<dyn Fn(&Value, &str) -> bool + Send + Sync>),
}

impl ReadGuard {
    /// Create a resource-level guard
    pub fn context_free<F>(f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::ContextFree(Arc::new(f))
    }

    /// Create a record-aware guard
    pub fn record_aware<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::RecordAware(Arc::new(f))
    }

    /// Create a field-aware guard
    pub fn field_aware<F>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        Self::FieldAware(Arc::new(f))
    }
}

impl fmt::Debug for ReadGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "ReadGuard::Always"),
            Self::Never => write!(f, "ReadGuard::Never"),
            Self::ContextFree(_) => write!(f, "ReadGuard::ContextFree(..)"),
            Self::RecordAware(_) => write!(f, "ReadGuard::RecordAware(..)"),
            Self::FieldAware(_) => write!(f, "ReadGuard::FieldAware(..)"),
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================

/// How an attribute's raw value is obtained from a record
///
/// The first stage of the render chain; whatever it yields still flows
/// through read-side coercion. `Serializer` carries a render block that was
/// registered directly on the output serializer: the projector wraps it
/// rather than replacing it, so author-supplied rendering survives while
/// typecasting is still enforced. A resource-level `Custom` accessor wins
/// over a serializer block.
#[derive(Clone, Default)]
pub enum Accessor {
    /// Direct read of `record[name]`; a missing field reads as null
    #[default]
    Field,
    /// Resource-level custom accessor
    Custom(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
    /// Pre-existing serializer render block, wrapped not replaced
    Serializer(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl Accessor {
    /// Create a resource-level custom accessor
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Wrap a render block registered directly on the serializer
    pub fn serializer<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Serializer(Arc::new(f))
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "Accessor::Field"),
            Self::Custom(_) => write!(f, "Accessor::Custom(..)"),
            Self::Serializer(_) => write!(f, "Accessor::Serializer(..)"),
        }
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Static declaration of a single projectable attribute
///
/// Owned by the resource's configuration; read-only at request time.
#[derive(Debug, Clone)]
pub struct AttributeDeclaration {
    /// Attribute name, also the default field to read from the record
    pub name: String,

    /// Registered type name driving read-side coercion
    pub type_name: String,

    /// Readability guard
    pub readable: ReadGuard,

    /// Value accessor chain entry point
    pub accessor: Accessor,

    /// Whether this is an extra attribute, projected only on request
    pub extra: bool,
}

impl AttributeDeclaration {
    /// Declare an always-readable attribute with a direct field accessor
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            readable: ReadGuard::Always,
            accessor: Accessor::Field,
            extra: false,
        }
    }

    /// Set the readability guard
    #[must_use]
    pub fn with_readable(mut self, guard: ReadGuard) -> Self {
        self.readable = guard;
        self
    }

    /// Set the value accessor
    #[must_use]
    pub fn with_accessor(mut self, accessor: Accessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Mark this attribute as extra
    #[must_use]
    pub fn as_extra(mut self) -> Self {
        self.extra = true;
        self
    }
}

// ============================================================================
// Projection Output
// ============================================================================

/// Outcome of projecting one attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Projected {
    /// The attribute is not exposed to this caller
    Omitted,
    /// The coerced value to serialize
    Value(Value),
}

impl Projected {
    /// Check if the attribute was omitted
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Get the projected value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Omitted => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// Pagination metadata attached to a record's envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordMeta {
    /// Opaque resumption cursor for iterating past this record
    pub cursor: String,
}

/// One record's projected attributes plus envelope metadata
///
/// Projection is deterministic: serializing the same record twice with the
/// same window and position yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRecord {
    /// Projected attribute values by name
    pub attributes: serde_json::Map<String, Value>,

    /// Envelope metadata; present only for cursor-paginatable resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<RecordMeta>,
}
