pub mod artifact_repo;
pub mod coordinates;
pub mod error;
pub mod packaging;
pub mod paths;
pub mod pom_xml;

pub use artifact_repo::{Artifact, ArtifactRepository};
pub use coordinates::MavenCoordinates;
pub use error::{ArtifactRepositoryError, ResolveError};
