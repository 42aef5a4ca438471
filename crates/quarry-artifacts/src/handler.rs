//! Builder entry points for declaring artifact repositories
//!
//! One builder per repository kind. Every builder follows the same path:
//! construct via the factory, apply the caller's configuration, then hand the
//! repository to the registrar, which assigns the final unique name and
//! appends the expanded resolvers to the shared chain.

use crate::config::Configuration;
use crate::factory::{DefaultRepositoryFactory, RepositoryFactory};
use crate::naming::NameRegistry;
use crate::registrar::RepositoryRegistrar;
use crate::repository::{
    ArtifactRepository, FlatDirectoryRepository, IvyRepository, MavenDeployer, MavenInstaller,
    MavenLocalRepository, MavenRepository,
};
use crate::resolver::{Resolver, ResolverChain};
use crate::{RepositoryError, RepositoryResult};
use std::sync::atomic::{AtomicU64, Ordering};
use toml::{Table, Value};

/// Well-known Maven central repository URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2/";

/// Default name for the Maven central repository.
pub const DEFAULT_MAVEN_CENTRAL_REPO_NAME: &str = "MavenRepo";

/// Default name for the Maven local cache repository.
pub const DEFAULT_MAVEN_LOCAL_REPO_NAME: &str = "MavenLocal";

/// Default name for flat directory repositories.
pub const DEFAULT_FLAT_DIR_NAME: &str = "flatDir";

/// Default name prefix for Maven deployers.
pub const DEFAULT_MAVEN_DEPLOYER_NAME: &str = "mavenDeployer";

/// Default name prefix for Maven installers.
pub const DEFAULT_MAVEN_INSTALLER_NAME: &str = "mavenInstaller";

/// Default name for generic Maven repositories.
pub const DEFAULT_MAVEN_NAME: &str = "maven";

/// Default name for generic Ivy repositories.
pub const DEFAULT_IVY_NAME: &str = "ivy";

// Process-unique ids seeding deployer/installer default names, so two
// unnamed instances never collide before the dedup pass runs.
static PLACEHOLDER_SEQ: AtomicU64 = AtomicU64::new(1);

fn placeholder_name(prefix: &str) -> String {
    let id = PLACEHOLDER_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", prefix, id)
}

/// Entry point for declaring the artifact repositories of a build.
///
/// Owns the name registry and resolver chain shared by all declarations;
/// repositories are tried by the dependency resolver in exactly the order
/// they were declared here.
pub struct RepositoryHandler {
    factory: Box<dyn RepositoryFactory>,
    registrar: RepositoryRegistrar,
}

impl RepositoryHandler {
    pub fn new() -> Self {
        Self::with_factory(Box::new(DefaultRepositoryFactory))
    }

    pub fn with_factory(factory: Box<dyn RepositoryFactory>) -> Self {
        Self {
            factory,
            registrar: RepositoryRegistrar::new(),
        }
    }

    /// Declare a flat directory repository.
    pub fn flat_dir(
        &mut self,
        config: Configuration<'_, FlatDirectoryRepository>,
    ) -> RepositoryResult<FlatDirectoryRepository> {
        let mut repo = self.factory.create_flat_dir();
        config.apply(&mut repo)?;
        Ok(self.registrar.register(repo, DEFAULT_FLAT_DIR_NAME))
    }

    /// Declare a flat directory repository from a property map and return
    /// its underlying resolver rather than the repository.
    ///
    /// A scalar `dirs` value is wrapped into a one-element list before
    /// construction.
    pub fn flat_dir_args(&mut self, args: Table) -> RepositoryResult<Resolver> {
        let mut args = args;
        if let Some(value) = args.get("dirs") {
            if !value.is_array() {
                let wrapped = Value::Array(vec![value.clone()]);
                args.insert("dirs".to_string(), wrapped);
            }
        }

        let mut repo = self.factory.create_flat_dir();
        Configuration::properties(args).apply(&mut repo)?;
        let repo = self.registrar.register(repo, DEFAULT_FLAT_DIR_NAME);

        // Flat directory repositories expand to exactly one resolver; more
        // is a factory contract breach, not a user error.
        let mut resolvers = repo.create_resolvers();
        assert_eq!(
            resolvers.len(),
            1,
            "flat directory repository expanded to {} resolvers",
            resolvers.len()
        );
        Ok(resolvers.remove(0))
    }

    /// Declare the well-known Maven central repository.
    pub fn maven_central(&mut self) -> RepositoryResult<MavenRepository> {
        self.maven_central_args(Table::new())
    }

    /// Declare Maven central with optional `name` and extra artifact `urls`
    /// tried alongside the fixed central URL.
    pub fn maven_central_args(&mut self, args: Table) -> RepositoryResult<MavenRepository> {
        ensure_known_keys(&args, &["name", "urls"], "maven central")?;
        let urls = string_list_arg(&args, "urls")?;
        let name = name_arg(&args)?.unwrap_or_default();
        let repo = self
            .factory
            .create_maven_repo(name, MAVEN_CENTRAL_URL.to_string(), urls);
        Ok(self
            .registrar
            .register(repo, DEFAULT_MAVEN_CENTRAL_REPO_NAME))
    }

    /// Declare the local Maven cache repository.
    pub fn maven_local(&mut self) -> MavenLocalRepository {
        let repo = self.factory.create_maven_local();
        self.registrar.register(repo, DEFAULT_MAVEN_LOCAL_REPO_NAME)
    }

    /// Declare a Maven repository from a property map with a `urls` list and
    /// optional `name`.
    ///
    /// The first URL is the repository root; remaining URLs are extra
    /// artifact locations. When no name is given, the first URL serves as
    /// the default.
    pub fn maven_repo(&mut self, args: Table) -> RepositoryResult<MavenRepository> {
        self.maven_repo_with(args, Configuration::None)
    }

    /// [`RepositoryHandler::maven_repo`] with an extra configuration applied
    /// after the property map.
    pub fn maven_repo_with(
        &mut self,
        args: Table,
        config: Configuration<'_, MavenRepository>,
    ) -> RepositoryResult<MavenRepository> {
        ensure_known_keys(&args, &["name", "urls"], "maven")?;
        let mut urls = string_list_arg(&args, "urls")?;
        if urls.is_empty() {
            return Err(RepositoryError::InvalidUserData(
                "you must specify the urls for a maven repository".to_string(),
            ));
        }
        let root_url = urls.remove(0);
        let name = name_arg(&args)?.unwrap_or_default();

        let mut repo = self.factory.create_maven_repo(name, root_url.clone(), urls);
        config.apply(&mut repo)?;
        Ok(self.registrar.register(repo, &root_url))
    }

    /// Declare a Maven deploy target.
    ///
    /// Unnamed deployers get a process-unique placeholder default, so two
    /// declarations never collide on a shared literal before dedup.
    pub fn maven_deployer(
        &mut self,
        config: Configuration<'_, MavenDeployer>,
    ) -> RepositoryResult<MavenDeployer> {
        let mut repo = self.factory.create_maven_deployer();
        config.apply(&mut repo)?;
        let default_name = placeholder_name(DEFAULT_MAVEN_DEPLOYER_NAME);
        Ok(self.registrar.register(repo, &default_name))
    }

    /// Declare a Maven install target.
    pub fn maven_installer(
        &mut self,
        config: Configuration<'_, MavenInstaller>,
    ) -> RepositoryResult<MavenInstaller> {
        let mut repo = self.factory.create_maven_installer();
        config.apply(&mut repo)?;
        let default_name = placeholder_name(DEFAULT_MAVEN_INSTALLER_NAME);
        Ok(self.registrar.register(repo, &default_name))
    }

    /// Declare a generic Maven repository.
    pub fn maven(
        &mut self,
        config: Configuration<'_, MavenRepository>,
    ) -> RepositoryResult<MavenRepository> {
        let mut repo = self.factory.create_maven();
        config.apply(&mut repo)?;
        Ok(self.registrar.register(repo, DEFAULT_MAVEN_NAME))
    }

    /// Declare a generic Ivy repository.
    pub fn ivy(
        &mut self,
        config: Configuration<'_, IvyRepository>,
    ) -> RepositoryResult<IvyRepository> {
        let mut repo = self.factory.create_ivy();
        config.apply(&mut repo)?;
        Ok(self.registrar.register(repo, DEFAULT_IVY_NAME))
    }

    /// The shared resolver chain, in declaration order.
    pub fn chain(&self) -> &ResolverChain {
        self.registrar.chain()
    }

    /// Names assigned to the repositories declared so far.
    pub fn names(&self) -> &NameRegistry {
        self.registrar.names()
    }
}

impl Default for RepositoryHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn name_arg(args: &Table) -> RepositoryResult<Option<String>> {
    match args.get("name") {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(RepositoryError::InvalidProperty {
            property: "name".to_string(),
            reason: format!("expected a string, got {}", other.type_str()),
        }),
    }
}

/// Read a list-valued argument, wrapping a scalar string into a one-element
/// list. A missing key yields an empty list.
fn string_list_arg(args: &Table, key: &str) -> RepositoryResult<Vec<String>> {
    let invalid = |value: &Value| RepositoryError::InvalidProperty {
        property: key.to_string(),
        reason: format!("expected a string or array of strings, got {}", value.type_str()),
    };
    match args.get(key) {
        None => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(invalid(other)),
            })
            .collect(),
        Some(other) => Err(invalid(other)),
    }
}

fn ensure_known_keys(args: &Table, known: &[&str], kind: &'static str) -> RepositoryResult<()> {
    for key in args.keys() {
        if !known.contains(&key.as_str()) {
            return Err(RepositoryError::UnknownProperty {
                property: key.clone(),
                kind,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ArtifactRepository;
    use crate::resolver::ResolverSpec;

    fn table(toml: &str) -> Table {
        toml.parse().unwrap()
    }

    #[test]
    fn test_maven_central_registers_under_default_name() {
        let mut handler = RepositoryHandler::new();
        let repo = handler.maven_central().unwrap();
        assert_eq!(repo.name(), DEFAULT_MAVEN_CENTRAL_REPO_NAME);
        assert_eq!(repo.url.as_deref(), Some(MAVEN_CENTRAL_URL));
        assert_eq!(handler.chain().len(), 1);
    }

    #[test]
    fn test_maven_central_extra_urls_are_passed_through() {
        let mut handler = RepositoryHandler::new();
        let repo = handler
            .maven_central_args(table(r#"urls = ["https://mirror.example.com"]"#))
            .unwrap();
        assert_eq!(repo.url.as_deref(), Some(MAVEN_CENTRAL_URL));
        assert_eq!(repo.artifact_urls, ["https://mirror.example.com"]);
    }

    #[test]
    fn test_maven_repo_without_urls_fails_before_registration() {
        let mut handler = RepositoryHandler::new();
        let err = handler.maven_repo(Table::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidUserData(_)));
        assert!(handler.names().is_empty());
        assert!(handler.chain().is_empty());
    }

    #[test]
    fn test_maven_repo_defaults_name_to_first_url() {
        let mut handler = RepositoryHandler::new();
        let repo = handler
            .maven_repo(table(
                r#"urls = ["https://repo.example.com/a", "https://repo.example.com/b"]"#,
            ))
            .unwrap();
        assert_eq!(repo.name(), "https://repo.example.com/a");
        assert_eq!(repo.url.as_deref(), Some("https://repo.example.com/a"));
        assert_eq!(repo.artifact_urls, ["https://repo.example.com/b"]);
    }

    #[test]
    fn test_maven_repo_with_applies_map_then_action() {
        let mut handler = RepositoryHandler::new();
        let repo = handler
            .maven_repo_with(
                table(r#"urls = ["https://repo.example.com"]"#),
                Configuration::action(|r: &mut MavenRepository| {
                    r.artifact_urls.push("https://late.example.com".to_string());
                }),
            )
            .unwrap();
        assert_eq!(repo.artifact_urls, ["https://late.example.com"]);
    }

    #[test]
    fn test_unnamed_deployers_get_distinct_names() {
        let mut handler = RepositoryHandler::new();
        let first = handler.maven_deployer(Configuration::None).unwrap();
        let second = handler.maven_deployer(Configuration::None).unwrap();
        assert_ne!(first.name(), second.name());
        assert!(first.name().starts_with(DEFAULT_MAVEN_DEPLOYER_NAME));
        assert!(second.name().starts_with(DEFAULT_MAVEN_DEPLOYER_NAME));
    }

    #[test]
    fn test_named_deployer_keeps_requested_name() {
        let mut handler = RepositoryHandler::new();
        let repo = handler
            .maven_deployer(Configuration::properties(table(
                r#"name = "uploadArchives""#,
            )))
            .unwrap();
        assert_eq!(repo.name(), "uploadArchives");
    }

    #[test]
    fn test_flat_dir_args_returns_raw_resolver() {
        let mut handler = RepositoryHandler::new();
        let resolver = handler
            .flat_dir_args(table(r#"dirs = "/tmp/libs""#))
            .unwrap();
        assert_eq!(resolver.name, DEFAULT_FLAT_DIR_NAME);
        assert_eq!(
            resolver.spec,
            ResolverSpec::FileSystem {
                dirs: vec!["/tmp/libs".into()],
            }
        );
        // The registration side effect happened as for any other builder.
        assert!(handler.names().contains(DEFAULT_FLAT_DIR_NAME));
        assert_eq!(handler.chain().len(), 1);
    }

    #[test]
    fn test_maven_local_uses_documented_default_name() {
        let mut handler = RepositoryHandler::new();
        let repo = handler.maven_local();
        assert_eq!(repo.name(), DEFAULT_MAVEN_LOCAL_REPO_NAME);
    }

    #[test]
    fn test_unknown_arg_key_is_rejected() {
        let mut handler = RepositoryHandler::new();
        let err = handler
            .maven_central_args(table(r#"mirror = "https://example.com""#))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownProperty { .. }));
        assert!(handler.names().is_empty());
    }
}
