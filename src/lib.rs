//! Resolves Maven coordinates to the location of the artifact's bundle and the coordinates of
//!  its direct `compile` and `runtime` dependencies, by reading the artifact's POM from a
//!  repository with the standard Maven directory layout.
//!
//! ```ignore
//! use arti_resolve::maven::{ArtifactRepository, MavenCoordinates};
//! use arti_resolve::util::repository_address::RepositoryAddress;
//!
//! let repository = ArtifactRepository::new(RepositoryAddress::parse("https://repo1.maven.org/maven2")?);
//! let artifact = repository.resolve(&MavenCoordinates::new("junit", "junit", "4.13.2")?).await?;
//! println!("{} needs {:?}", artifact.location(), artifact.dependencies());
//! ```

pub mod config;
pub mod maven;
pub mod server;
pub mod util;
