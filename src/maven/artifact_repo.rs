use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, trace};
use url::Url;

use crate::maven::coordinates::MavenCoordinates;
use crate::maven::error::{ArtifactRepositoryError, ResolveError};
use crate::maven::packaging::extension_for_packaging;
use crate::maven::paths::as_maven_path;
use crate::maven::pom_xml::parse_pom;
use crate::util::repository_address::RepositoryAddress;
use crate::util::transport::{default_transport, ArtifactTransport};

/// Where to download an artifact's bundle from, and what it needs at compile time and runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    location: Url,
    dependencies: HashSet<MavenCoordinates>,
}
impl Artifact {
    /// Resolved against the same repository address as the artifact's POM
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Coordinates of `compile` and `runtime` dependencies
    pub fn dependencies(&self) -> &HashSet<MavenCoordinates> {
        &self.dependencies
    }
}

/// Resolves artifacts by reading their POMs from a repository with the standard Maven layout.
///
/// Instances are immutable and can be shared between concurrent resolutions.
pub struct ArtifactRepository {
    address: RepositoryAddress,
    default_transport: Option<Arc<dyn ArtifactTransport>>,
}

impl ArtifactRepository {
    pub fn new(address: RepositoryAddress) -> ArtifactRepository {
        let default_transport = match address.transport() {
            Some(_) => None,
            None => default_transport(address.protocol()),
        };

        ArtifactRepository {
            address,
            default_transport,
        }
    }

    pub fn address(&self) -> &RepositoryAddress {
        &self.address
    }

    fn transport(&self) -> Result<&dyn ArtifactTransport, ArtifactRepositoryError> {
        self.address.transport()
            .or(self.default_transport.as_ref())
            .map(|t| t.as_ref())
            .ok_or_else(|| ArtifactRepositoryError::UnsupportedProtocol(self.address.protocol().to_string()))
    }

    pub async fn resolve(&self, coordinates: &MavenCoordinates) -> Result<Artifact, ResolveError> {
        let pom_location = self.address.resolve(&as_maven_path(coordinates, "pom"))?;
        let transport = self.transport()?;

        debug!("resolving {} from {}", coordinates, pom_location);

        // the blob is consumed (and its stream dropped) here, whether reading succeeds or not
        let pom_data = transport.open(&pom_location)
            .await?
            .into_vec()
            .await?;

        let project = parse_pom(&pom_data)
            .map_err(ArtifactRepositoryError::MalformedDocument)?;

        let extension = extension_for_packaging(project.packaging());
        let location = self.address.resolve(&as_maven_path(coordinates, extension))?;
        let dependencies = project.required_dependencies()?;

        trace!("{} has packaging {:?}, bundle at {}, {} of {} dependencies required",
            coordinates,
            project.packaging(),
            location,
            dependencies.len(),
            project.dependency_entries().len(),
        );

        Ok(Artifact {
            location,
            dependencies,
        })
    }
}

/// Equal if the addresses are equal; the default transport is derived from the address.
impl PartialEq for ArtifactRepository {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}
impl Eq for ArtifactRepository {}

impl Hash for ArtifactRepository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}
