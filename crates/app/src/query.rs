use dioxus::prelude::*;
use std::collections::HashMap;

use crate::forms::Invalidate;

/// Per-key generation counters for cached server reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryGenerations {
    generations: HashMap<String, u64>,
}

impl QueryGenerations {
    pub fn generation(&self, key: &str) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }

    /// Mark `key` stale. Returns the new generation.
    pub fn bump(&mut self, key: &str) -> u64 {
        let generation = self.generations.entry(key.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }
}

/// App-wide query client provided as context.
///
/// Resources that read `generation(key)` re-run whenever that key is
/// invalidated.
#[derive(Clone, Copy, PartialEq)]
pub struct QueryClient {
    generations: Signal<QueryGenerations>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            generations: Signal::new(QueryGenerations::default()),
        }
    }

    /// Current generation of `key`, subscribing the caller to changes.
    pub fn generation(&self, key: &str) -> u64 {
        self.generations.read().generation(key)
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Invalidate for QueryClient {
    fn invalidate(&self, key: &str) {
        let mut generations = self.generations;
        let generation = generations.write().bump(key);
        tracing::debug!(key, generation, "Query invalidated");
    }
}

/// Get the query client provided by `App`.
pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}
