//! Low-level resolver handles and the global resolution chain

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Opaque handle used by the dependency resolver to locate artifacts for one
/// repository declaration.
///
/// A repository expands into one or more of these when it is registered; the
/// registration layer never looks inside them again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolver {
    /// Final unique name of the repository this resolver was expanded from.
    pub name: String,
    /// Transport-specific lookup details.
    pub spec: ResolverSpec,
}

impl Resolver {
    pub fn new(name: impl Into<String>, spec: ResolverSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// Transport-specific details of a resolver entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolverSpec {
    /// Flat directory lookup; artifacts only, no metadata.
    FileSystem { dirs: Vec<PathBuf> },
    /// Maven-layout repository rooted at `root_url`. Extra artifact
    /// locations are tried after the root, in order.
    Maven {
        root_url: String,
        artifact_urls: Vec<String>,
    },
    /// Maven-layout cache on the local filesystem.
    MavenLocal { cache_dir: PathBuf },
    /// Ivy-layout repository.
    Ivy { url: Option<String> },
    /// Remote Maven publication target.
    MavenDeploy {
        repository_url: Option<String>,
        snapshot_repository_url: Option<String>,
    },
    /// Local Maven publication target.
    MavenInstall,
}

/// Ordered, append-only sequence of all resolvers across all registered
/// repositories. Defines the resolution try-order.
#[derive(Debug, Default, Clone)]
pub struct ResolverChain {
    entries: Vec<Resolver>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entries` at the tail, preserving their relative order.
    pub fn append(&mut self, entries: impl IntoIterator<Item = Resolver>) {
        self.entries.extend(entries);
    }

    /// Full chain in registration order, for the downstream resolver.
    pub fn snapshot(&self) -> &[Resolver] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> Resolver {
        Resolver::new(name, ResolverSpec::MavenInstall)
    }

    #[test]
    fn test_chain_starts_empty() {
        let chain = ResolverChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.snapshot(), &[]);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut chain = ResolverChain::new();
        chain.append(vec![entry("a")]);
        chain.append(vec![entry("b"), entry("c")]);

        let names: Vec<&str> = chain.snapshot().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_multi_entry_append_is_contiguous() {
        let mut chain = ResolverChain::new();
        chain.append(vec![entry("first")]);
        chain.append(vec![entry("pair"), entry("pair")]);
        chain.append(vec![entry("last")]);

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.snapshot()[1].name, "pair");
        assert_eq!(chain.snapshot()[2].name, "pair");
    }
}
