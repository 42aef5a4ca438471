//! Repository name assignment and dedup suffixing

use std::collections::HashSet;

/// Tracks the names already assigned to repositories in one container.
///
/// Names are permanent: there is no removal, and every name handed out by
/// [`NameRegistry::find_name`] must be registered before another repository
/// can observe the registry.
#[derive(Debug, Default)]
pub struct NameRegistry {
    assigned: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a free name from `requested`.
    ///
    /// Returns `requested` unchanged when it is not taken; otherwise probes
    /// `requested2`, `requested3`, … and returns the first free candidate.
    /// Terminates after at most `len() + 1` probes since every candidate is
    /// a distinct string.
    pub fn find_name(&self, requested: &str) -> String {
        if !self.assigned.contains(requested) {
            return requested.to_string();
        }
        for index in 2.. {
            let candidate = format!("{}{}", requested, index);
            if !self.assigned.contains(&candidate) {
                return candidate;
            }
        }
        unreachable!("name probing exhausted an unbounded range")
    }

    /// Record `name` as assigned. The caller must have obtained it from
    /// [`NameRegistry::find_name`] with no intervening registration.
    pub fn register(&mut self, name: impl Into<String>) {
        self.assigned.insert(name.into());
    }

    /// Whether `name` has been assigned to a repository.
    pub fn contains(&self, name: &str) -> bool {
        self.assigned.contains(name)
    }

    /// Number of names assigned so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
