//! Ordered pipeline of value transforms

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Priority given to entries attached without an explicit one
pub const DEFAULT_PRIORITY: i32 = 1000;

/// A value transform
///
/// Filters are total: a filter that does not apply to the value it receives
/// hands it back unchanged. Any `Fn(Value) -> Value + Send + Sync` closure is a
/// filter.
pub trait Filter: Send + Sync {
    fn filter(&self, value: Value) -> Value;
}

impl<F> Filter for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn filter(&self, value: Value) -> Value {
        self(value)
    }
}

#[derive(Clone)]
struct FilterEntry {
    priority: i32,
    filter: Arc<dyn Filter>,
}

/// Ordered sequence of filters applied one after the other
///
/// Entries run by descending priority; entries sharing a priority run in
/// insertion order.
#[derive(Clone, Default)]
pub struct FilterChain {
    entries: Vec<FilterEntry>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter with the default priority
    pub fn attach<F>(&mut self, filter: F) -> &mut Self
    where
        F: Filter + 'static,
    {
        self.attach_with_priority(filter, DEFAULT_PRIORITY)
    }

    /// Insert a filter at the given priority (higher runs first)
    pub fn attach_with_priority<F>(&mut self, filter: F, priority: i32) -> &mut Self
    where
        F: Filter + 'static,
    {
        self.insert(FilterEntry {
            priority,
            filter: Arc::new(filter),
        });
        self
    }

    /// Append every entry of `other`, keeping their priorities
    pub fn merge(&mut self, other: &FilterChain) -> &mut Self {
        for entry in &other.entries {
            self.insert(entry.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the value through every filter, in order
    pub fn filter(&self, value: Value) -> Value {
        self.entries
            .iter()
            .fold(value, |current, entry| entry.filter.filter(current))
    }

    // Keeps entries sorted by descending priority, stable for ties.
    fn insert(&mut self, entry: FilterEntry) {
        let position = self
            .entries
            .iter()
            .position(|existing| existing.priority < entry.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field(
                "priorities",
                &self.entries.iter().map(|e| e.priority).collect::<Vec<_>>(),
            )
            .finish()
    }
}
