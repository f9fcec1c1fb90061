//! Append-only evaluation environments.
//!
//! An [`Environment`] is the shared resolution context a batch of statements
//! is evaluated against: a mapping from binding name to resolved value.
//! Entries are kept sorted by name, so lookups are a binary search and
//! iteration order is the deterministic name ordering the final result is
//! reported in.
//!
//! Environments grow append-only: once a name is present it is never
//! removed or overwritten for the remainder of a run. Merging follows a
//! first-writer-wins policy on duplicate names, which makes the otherwise
//! silent accumulate-without-check behavior of loosely-ordered declaration
//! sets explicit and observable.

use crate::Vec;
use ecow::EcoString;
use smallvec::SmallVec;
use tracing::warn;

/// A binding name.
pub type Name = EcoString;

/// The bindings produced by one successful statement evaluation.
///
/// Most statements bind exactly one name, but a statement may legally be a
/// multi-field literal that binds several names at once, or an expression
/// that binds none.
pub type Bindings<V> = SmallVec<[(Name, V); 1]>;

/// A name-to-value mapping with deterministic name ordering.
///
/// Entries are sorted by name; lookups are `O(log n)`. Within a resolver
/// run the environment only grows, so a snapshot handed to an evaluation
/// pass is never invalidated by that pass's own results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment<V> {
    entries: Vec<(Name, V)>,
}

impl<V> Environment<V> {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build an environment from entries already sorted by name.
    ///
    /// The entries must be sorted and free of duplicate names.
    pub(crate) fn from_sorted_entries(entries: Vec<(Name, V)>) -> Self {
        debug_assert!(
            entries.windows(2).all(|w| w[0].0 < w[1].0),
            "entries must be sorted by name and duplicate-free"
        );
        Self { entries }
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the environment holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate over bound names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Merge `bindings` into the environment, append-only.
    ///
    /// A binding whose name is already present is skipped (first-writer
    /// wins) and logged. Returns the number of bindings actually added.
    pub fn merge(&mut self, bindings: Bindings<V>) -> usize {
        let mut added = 0;
        for (name, value) in bindings {
            match self
                .entries
                .binary_search_by(|(n, _)| n.as_str().cmp(name.as_str()))
            {
                Ok(_) => {
                    warn!(name = name.as_str(), "duplicate binding skipped");
                }
                Err(idx) => {
                    self.entries.insert(idx, (name, value));
                    added += 1;
                }
            }
        }
        added
    }
}

impl<V> Default for Environment<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite binding names according to the export convention.
///
/// A name starting with `prefix` marks a binding re-exported from a nested
/// scope. Each such binding is surfaced under its stripped name; the
/// prefixed internal form is additionally retained when `keep_internal` is
/// set. Names without the prefix (and a name that *is* the bare prefix)
/// pass through untouched.
pub fn apply_export_rename<V: Clone>(
    bindings: Bindings<V>,
    prefix: &str,
    keep_internal: bool,
) -> Bindings<V> {
    let mut renamed = Bindings::new();
    for (name, value) in bindings {
        match name.strip_prefix(prefix).filter(|rest| !rest.is_empty()) {
            Some(exported) if keep_internal => {
                renamed.push((Name::from(exported), value.clone()));
                renamed.push((name, value));
            }
            Some(exported) => renamed.push((Name::from(exported), value)),
            None => renamed.push((name, value)),
        }
    }
    renamed
}
