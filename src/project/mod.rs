//! Attribute projection
//!
//! Decides, per attribute of each record in a fetched page, whether the
//! value is exposed, how it is coerced on the way out, and what cursor
//! metadata the record's envelope carries so a client can resume
//! iteration from that exact row.

mod projector;
mod types;

pub use projector::AttributeProjector;
pub use types::{
    Accessor, AttributeDeclaration, Projected, ProjectedRecord, ReadGuard, RecordMeta,
};

#[cfg(test)]
mod tests;
