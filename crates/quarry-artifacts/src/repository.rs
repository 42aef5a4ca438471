//! Repository declarations and their expansion into resolvers

use crate::resolver::{Resolver, ResolverSpec};
use crate::{RepositoryError, RepositoryResult};
use std::path::PathBuf;
use toml::{Table, Value};

/// A user-declared source of artifacts.
///
/// Each kind knows how to expand itself into the low-level resolvers the
/// dependency resolver will try. The registrar depends only on this trait,
/// never on concrete kinds.
pub trait ArtifactRepository {
    /// Current repository name; empty until one has been assigned.
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// Expand this declaration into resolver entries, in try-order.
    fn create_resolvers(&self) -> Vec<Resolver>;

    /// Apply a declarative property map as field assignments.
    ///
    /// Unknown keys and wrong-typed values are user errors.
    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()>;
}

fn string_property(property: &str, value: &Value) -> RepositoryResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(RepositoryError::InvalidProperty {
            property: property.to_string(),
            reason: format!("expected a string, got {}", other.type_str()),
        }),
    }
}

fn string_list_property(property: &str, value: &Value) -> RepositoryResult<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(RepositoryError::InvalidProperty {
                property: property.to_string(),
                reason: format!("expected an array of strings, got {}", other.type_str()),
            })
        }
    };
    items
        .iter()
        .map(|item| string_property(property, item))
        .collect()
}

/// Flat directory repository: artifacts looked up directly in a set of
/// directories, with no metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatDirectoryRepository {
    name: String,
    /// Directories searched for artifacts, in order.
    pub dirs: Vec<PathBuf>,
}

impl ArtifactRepository for FlatDirectoryRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn create_resolvers(&self) -> Vec<Resolver> {
        vec![Resolver::new(
            &self.name,
            ResolverSpec::FileSystem {
                dirs: self.dirs.clone(),
            },
        )]
    }

    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()> {
        for (key, value) in properties {
            match key.as_str() {
                "name" => self.name = string_property(key, value)?,
                "dirs" => {
                    self.dirs = string_list_property(key, value)?
                        .into_iter()
                        .map(PathBuf::from)
                        .collect();
                }
                _ => {
                    return Err(RepositoryError::UnknownProperty {
                        property: key.clone(),
                        kind: "flat directory",
                    })
                }
            }
        }
        Ok(())
    }
}

/// Maven-layout repository with a root URL and optional extra artifact
/// locations tried after the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MavenRepository {
    name: String,
    /// Root URL serving both metadata and artifacts.
    pub url: Option<String>,
    /// Additional locations tried for artifacts only, in order.
    pub artifact_urls: Vec<String>,
}

impl ArtifactRepository for MavenRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn create_resolvers(&self) -> Vec<Resolver> {
        vec![Resolver::new(
            &self.name,
            ResolverSpec::Maven {
                root_url: self.url.clone().unwrap_or_default(),
                artifact_urls: self.artifact_urls.clone(),
            },
        )]
    }

    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()> {
        for (key, value) in properties {
            match key.as_str() {
                "name" => self.name = string_property(key, value)?,
                "url" => self.url = Some(string_property(key, value)?),
                "artifact_urls" => self.artifact_urls = string_list_property(key, value)?,
                _ => {
                    return Err(RepositoryError::UnknownProperty {
                        property: key.clone(),
                        kind: "maven",
                    })
                }
            }
        }
        Ok(())
    }
}

/// Maven-layout cache on the local filesystem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MavenLocalRepository {
    name: String,
    /// Location of the local cache; fixed by the factory.
    pub cache_dir: PathBuf,
}

impl ArtifactRepository for MavenLocalRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn create_resolvers(&self) -> Vec<Resolver> {
        vec![Resolver::new(
            &self.name,
            ResolverSpec::MavenLocal {
                cache_dir: self.cache_dir.clone(),
            },
        )]
    }

    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()> {
        for (key, value) in properties {
            match key.as_str() {
                "name" => self.name = string_property(key, value)?,
                _ => {
                    return Err(RepositoryError::UnknownProperty {
                        property: key.clone(),
                        kind: "maven local",
                    })
                }
            }
        }
        Ok(())
    }
}

/// Ivy-layout repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IvyRepository {
    name: String,
    pub url: Option<String>,
}

impl ArtifactRepository for IvyRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn create_resolvers(&self) -> Vec<Resolver> {
        vec![Resolver::new(
            &self.name,
            ResolverSpec::Ivy {
                url: self.url.clone(),
            },
        )]
    }

    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()> {
        for (key, value) in properties {
            match key.as_str() {
                "name" => self.name = string_property(key, value)?,
                "url" => self.url = Some(string_property(key, value)?),
                _ => {
                    return Err(RepositoryError::UnknownProperty {
                        property: key.clone(),
                        kind: "ivy",
                    })
                }
            }
        }
        Ok(())
    }
}

/// Remote Maven publication target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MavenDeployer {
    name: String,
    /// Target for release publications.
    pub repository_url: Option<String>,
    /// Target for snapshot publications; falls back to `repository_url`
    /// downstream when unset.
    pub snapshot_repository_url: Option<String>,
}

impl ArtifactRepository for MavenDeployer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn create_resolvers(&self) -> Vec<Resolver> {
        vec![Resolver::new(
            &self.name,
            ResolverSpec::MavenDeploy {
                repository_url: self.repository_url.clone(),
                snapshot_repository_url: self.snapshot_repository_url.clone(),
            },
        )]
    }

    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()> {
        for (key, value) in properties {
            match key.as_str() {
                "name" => self.name = string_property(key, value)?,
                "repository_url" => self.repository_url = Some(string_property(key, value)?),
                "snapshot_repository_url" => {
                    self.snapshot_repository_url = Some(string_property(key, value)?);
                }
                _ => {
                    return Err(RepositoryError::UnknownProperty {
                        property: key.clone(),
                        kind: "maven deployer",
                    })
                }
            }
        }
        Ok(())
    }
}

/// Local Maven publication target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MavenInstaller {
    name: String,
}

impl ArtifactRepository for MavenInstaller {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn create_resolvers(&self) -> Vec<Resolver> {
        vec![Resolver::new(&self.name, ResolverSpec::MavenInstall)]
    }

    fn apply_properties(&mut self, properties: &Table) -> RepositoryResult<()> {
        for (key, value) in properties {
            match key.as_str() {
                "name" => self.name = string_property(key, value)?,
                _ => {
                    return Err(RepositoryError::UnknownProperty {
                        property: key.clone(),
                        kind: "maven installer",
                    })
                }
            }
        }
        Ok(())
    }
}
