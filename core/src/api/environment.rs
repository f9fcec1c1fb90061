//! Environment builder for registering base bindings.

use crate::Vec;
use crate::environment::{Environment, Name};
use hashbrown::HashSet;
use tracing::warn;

/// Builder for constructing a base environment.
///
/// The base environment holds the builtins and host constants every
/// statement can see from the first pass on. Entries are sorted by name at
/// build time for binary-search lookup during resolution.
///
/// # Example
///
/// ```
/// use settle_core::api::EnvironmentBuilder;
///
/// let mut builder = EnvironmentBuilder::new();
/// builder.register("pi", 3);
/// builder.register("two", 2);
/// let env = builder.build();
///
/// assert_eq!(env.get("pi"), Some(&3));
/// ```
pub struct EnvironmentBuilder<V> {
    entries: Vec<(Name, V)>,
    seen: HashSet<Name>,
}

impl<V> EnvironmentBuilder<V> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Register a base binding.
    ///
    /// Base environments follow the same append-only policy as resolution:
    /// registering a name twice keeps the first value and logs the skip.
    pub fn register(&mut self, name: impl Into<Name>, value: V) {
        let name = name.into();
        if !self.seen.insert(name.clone()) {
            warn!(name = name.as_str(), "duplicate base binding skipped");
            return;
        }
        self.entries.push((name, value));
    }

    /// Build the final environment, sorted by name.
    pub fn build(mut self) -> Environment<V> {
        self.entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Environment::from_sorted_entries(self.entries)
    }
}

impl<V> Default for EnvironmentBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
