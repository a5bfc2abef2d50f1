//! Read-side type coercion
//!
//! Maps attribute type names to the functions that normalize raw stored
//! values into their wire representation. The projector consults this
//! registry once per projected attribute when typecasting is enabled.

mod registry;

pub use registry::{CoerceError, ReadCoercion, TypeRegistry};
