//! Quarry Artifact Repositories
//!
//! Registration layer for the dependency-resolution front end:
//! - Repository declarations (flat directories, Maven/Ivy endpoints,
//!   Maven deploy/install targets)
//! - Unique, stable repository naming with dedup suffixing
//! - Expansion of each declaration into low-level resolvers
//! - The ordered resolver chain consumed by the dependency resolver
//!
//! Repositories are declared through [`RepositoryHandler`], which assigns
//! each one a unique name and appends its resolvers to the shared chain in
//! declaration order. The downstream resolver reads the chain via
//! [`ResolverChain::snapshot`] and tries entries in exactly that order.
//!
//! # Example
//!
//! ```
//! use quarry_artifacts::{
//!     ArtifactRepository, Configuration, FlatDirectoryRepository, RepositoryHandler,
//! };
//!
//! let mut repositories = RepositoryHandler::new();
//! repositories.maven_central().unwrap();
//! let flat = repositories
//!     .flat_dir(Configuration::action(|r: &mut FlatDirectoryRepository| {
//!         r.dirs.push("libs".into());
//!     }))
//!     .unwrap();
//! assert_eq!(flat.name(), "flatDir");
//! assert_eq!(repositories.chain().len(), 2);
//! ```

pub mod config;
pub mod factory;
pub mod handler;
pub mod naming;
pub mod registrar;
pub mod repository;
pub mod resolver;

use thiserror::Error;

/// Repository declaration errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Invalid repository declaration: {0}")]
    InvalidUserData(String),

    #[error("Unknown property '{property}' for {kind} repository")]
    UnknownProperty { property: String, kind: &'static str },

    #[error("Invalid value for property '{property}': {reason}")]
    InvalidProperty { property: String, reason: String },
}

/// Result type for repository registration operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// Re-export main types
pub use config::Configuration;
pub use factory::{DefaultRepositoryFactory, RepositoryFactory};
pub use handler::RepositoryHandler;
pub use naming::NameRegistry;
pub use registrar::RepositoryRegistrar;
pub use repository::{
    ArtifactRepository, FlatDirectoryRepository, IvyRepository, MavenDeployer, MavenInstaller,
    MavenLocalRepository, MavenRepository,
};
pub use resolver::{Resolver, ResolverChain, ResolverSpec};
