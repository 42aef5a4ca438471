//! Configuration forms applied to a repository before registration

use crate::repository::ArtifactRepository;
use crate::RepositoryResult;
use toml::Table;

/// One of the configuration forms a build description can supply for a
/// repository declaration.
///
/// The imperative callback and the declarative property map are semantically
/// equivalent; registration only needs the single [`Configuration::apply`]
/// dispatcher and never cares which form the caller chose.
pub enum Configuration<'a, T> {
    /// Leave the repository as constructed.
    None,
    /// Imperative callback invoked with the repository.
    Action(Box<dyn FnOnce(&mut T) + 'a>),
    /// Declarative property map applied as field assignments.
    Properties(Table),
}

impl<'a, T: ArtifactRepository> Configuration<'a, T> {
    pub fn action(configure: impl FnOnce(&mut T) + 'a) -> Self {
        Configuration::Action(Box::new(configure))
    }

    pub fn properties(properties: Table) -> Self {
        Configuration::Properties(properties)
    }

    /// Apply this configuration to `repository`.
    pub fn apply(self, repository: &mut T) -> RepositoryResult<()> {
        match self {
            Configuration::None => Ok(()),
            Configuration::Action(configure) => {
                configure(repository);
                Ok(())
            }
            Configuration::Properties(properties) => repository.apply_properties(&properties),
        }
    }
}

impl<T> From<Table> for Configuration<'_, T> {
    fn from(properties: Table) -> Self {
        Configuration::Properties(properties)
    }
}

impl<T> std::fmt::Debug for Configuration<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Configuration::None => f.write_str("Configuration::None"),
            Configuration::Action(_) => f.write_str("Configuration::Action(..)"),
            Configuration::Properties(p) => f.debug_tuple("Configuration::Properties").field(p).finish(),
        }
    }
}
