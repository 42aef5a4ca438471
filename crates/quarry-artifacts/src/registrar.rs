//! Registration of configured repositories into the shared container

use crate::naming::NameRegistry;
use crate::repository::ArtifactRepository;
use crate::resolver::ResolverChain;

/// Owns the container state shared by all repository declarations: the set
/// of assigned names and the ordered resolver chain.
///
/// Single-threaded by design; all registration happens during the sequential
/// configuration phase of a build, through one exclusive reference.
#[derive(Debug, Default)]
pub struct RepositoryRegistrar {
    names: NameRegistry,
    chain: ResolverChain,
}

impl RepositoryRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructed, configured repository under a unique name and
    /// append its resolvers to the chain.
    ///
    /// The repository keeps its explicit name if one was set, falling back
    /// to `default_name`; either way the name is deduplicated against every
    /// name assigned so far. Expansion happens after the final name is set,
    /// so the resolvers carry it. The repository is returned to the caller
    /// for further inspection; the container retains only its name and its
    /// resolver entries.
    pub fn register<T: ArtifactRepository>(&mut self, mut repository: T, default_name: &str) -> T {
        if repository.name().is_empty() {
            repository.set_name(default_name.to_string());
        }
        let final_name = self.names.find_name(repository.name());
        repository.set_name(final_name.clone());
        self.names.register(final_name);

        self.chain.append(repository.create_resolvers());
        repository
    }

    /// Names assigned so far.
    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    /// The shared resolver chain, in registration order.
    pub fn chain(&self) -> &ResolverChain {
        &self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FlatDirectoryRepository, MavenRepository};
    use crate::resolver::{Resolver, ResolverSpec};
    use crate::RepositoryResult;

    /// Test-only repository expanding to a configurable number of resolvers.
    struct MultiResolverRepository {
        name: String,
        count: usize,
    }

    impl ArtifactRepository for MultiResolverRepository {
        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: String) {
            self.name = name;
        }

        fn create_resolvers(&self) -> Vec<Resolver> {
            (0..self.count)
                .map(|_| Resolver::new(&self.name, ResolverSpec::MavenInstall))
                .collect()
        }

        fn apply_properties(&mut self, _properties: &toml::Table) -> RepositoryResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unnamed_repository_gets_default_name() {
        let mut registrar = RepositoryRegistrar::new();
        let repo = registrar.register(FlatDirectoryRepository::default(), "flatDir");
        assert_eq!(repo.name(), "flatDir");
        assert!(registrar.names().contains("flatDir"));
    }

    #[test]
    fn test_explicit_name_wins_over_default() {
        let mut registrar = RepositoryRegistrar::new();
        let mut repo = MavenRepository::default();
        repo.set_name("corporate".to_string());
        let repo = registrar.register(repo, "maven");
        assert_eq!(repo.name(), "corporate");
        assert!(!registrar.names().contains("maven"));
    }

    #[test]
    fn test_colliding_names_are_suffixed() {
        let mut registrar = RepositoryRegistrar::new();
        let first = registrar.register(FlatDirectoryRepository::default(), "flatDir");
        let second = registrar.register(FlatDirectoryRepository::default(), "flatDir");
        assert_eq!(first.name(), "flatDir");
        assert_eq!(second.name(), "flatDir2");
    }

    #[test]
    fn test_resolvers_appended_in_registration_order() {
        let mut registrar = RepositoryRegistrar::new();
        registrar.register(FlatDirectoryRepository::default(), "a");
        registrar.register(FlatDirectoryRepository::default(), "b");

        let names: Vec<&str> = registrar
            .chain()
            .snapshot()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_multi_resolver_expansion_stays_contiguous() {
        let mut registrar = RepositoryRegistrar::new();
        registrar.register(FlatDirectoryRepository::default(), "head");
        registrar.register(
            MultiResolverRepository {
                name: String::new(),
                count: 2,
            },
            "pair",
        );
        registrar.register(FlatDirectoryRepository::default(), "tail");

        let names: Vec<&str> = registrar
            .chain()
            .snapshot()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["head", "pair", "pair", "tail"]);
    }

    #[test]
    fn test_resolvers_carry_final_deduped_name() {
        let mut registrar = RepositoryRegistrar::new();
        registrar.register(FlatDirectoryRepository::default(), "libs");
        registrar.register(FlatDirectoryRepository::default(), "libs");

        assert_eq!(registrar.chain().snapshot()[1].name, "libs2");
    }
}
