//! Request context
//!
//! Per-request flags threaded explicitly into window resolution and
//! attribute projection, rather than read from ambient process state.

/// Ambient facts about the request being served
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Whether the caller is a structured-query layer (e.g. GraphQL);
    /// in that mode a denied attribute is an error instead of an omission
    pub structured_query: bool,

    /// How many parent records a nested (sideloaded) listing serves;
    /// 0 for a top-level listing
    pub sideload_parent_count: usize,
}

impl RequestContext {
    /// Create a top-level, non-structured request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a structured-query (e.g. GraphQL) context
    pub fn structured() -> Self {
        Self {
            structured_query: true,
            ..Self::default()
        }
    }

    /// Set the number of parent records a sideloaded listing serves
    #[must_use]
    pub fn with_sideload_parents(mut self, count: usize) -> Self {
        self.sideload_parent_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = RequestContext::new();
        assert!(!ctx.structured_query);
        assert_eq!(ctx.sideload_parent_count, 0);
    }

    #[test]
    fn test_structured() {
        assert!(RequestContext::structured().structured_query);
    }

    #[test]
    fn test_sideload_parents() {
        let ctx = RequestContext::new().with_sideload_parents(3);
        assert_eq!(ctx.sideload_parent_count, 3);
    }
}
