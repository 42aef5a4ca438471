//! Construction of unconfigured repositories, one constructor per kind

use crate::repository::{
    ArtifactRepository, FlatDirectoryRepository, IvyRepository, MavenDeployer, MavenInstaller,
    MavenLocalRepository, MavenRepository,
};
use std::path::PathBuf;

/// Constructs default-configured repositories for the handler's builders.
///
/// URL parsing and credential wiring live behind this seam; the registration
/// layer only hands the results through configuration and registration.
pub trait RepositoryFactory {
    fn create_flat_dir(&self) -> FlatDirectoryRepository;

    /// Maven repository pre-wired with a root URL and extra artifact
    /// locations. `name` may be empty; the registrar fills in a default.
    fn create_maven_repo(
        &self,
        name: String,
        root_url: String,
        artifact_urls: Vec<String>,
    ) -> MavenRepository;

    fn create_maven_local(&self) -> MavenLocalRepository;

    fn create_maven(&self) -> MavenRepository;

    fn create_ivy(&self) -> IvyRepository;

    fn create_maven_deployer(&self) -> MavenDeployer;

    fn create_maven_installer(&self) -> MavenInstaller;
}

/// Factory producing the standard repository kinds with their conventional
/// defaults.
#[derive(Debug, Default)]
pub struct DefaultRepositoryFactory;

impl DefaultRepositoryFactory {
    /// Conventional Maven local cache, `~/.m2/repository`.
    fn maven_local_cache() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join(".m2/repository")
    }
}

impl RepositoryFactory for DefaultRepositoryFactory {
    fn create_flat_dir(&self) -> FlatDirectoryRepository {
        FlatDirectoryRepository::default()
    }

    fn create_maven_repo(
        &self,
        name: String,
        root_url: String,
        artifact_urls: Vec<String>,
    ) -> MavenRepository {
        let mut repo = MavenRepository::default();
        repo.url = Some(root_url);
        repo.artifact_urls = artifact_urls;
        if !name.is_empty() {
            repo.set_name(name);
        }
        repo
    }

    fn create_maven_local(&self) -> MavenLocalRepository {
        let mut repo = MavenLocalRepository::default();
        repo.cache_dir = Self::maven_local_cache();
        repo
    }

    fn create_maven(&self) -> MavenRepository {
        MavenRepository::default()
    }

    fn create_ivy(&self) -> IvyRepository {
        IvyRepository::default()
    }

    fn create_maven_deployer(&self) -> MavenDeployer {
        MavenDeployer::default()
    }

    fn create_maven_installer(&self) -> MavenInstaller {
        MavenInstaller::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_repositories_start_unnamed() {
        let factory = DefaultRepositoryFactory;
        assert_eq!(factory.create_flat_dir().name(), "");
        assert_eq!(factory.create_maven().name(), "");
        assert_eq!(factory.create_ivy().name(), "");
    }

    #[test]
    fn test_maven_repo_carries_urls() {
        let factory = DefaultRepositoryFactory;
        let repo = factory.create_maven_repo(
            "central".to_string(),
            "https://repo.example.com".to_string(),
            vec!["https://mirror.example.com".to_string()],
        );
        assert_eq!(repo.name(), "central");
        assert_eq!(repo.url.as_deref(), Some("https://repo.example.com"));
        assert_eq!(repo.artifact_urls, ["https://mirror.example.com"]);
    }

    #[test]
    fn test_maven_local_cache_is_under_m2() {
        let factory = DefaultRepositoryFactory;
        let repo = factory.create_maven_local();
        assert!(repo.cache_dir.ends_with(".m2/repository"));
    }
}
