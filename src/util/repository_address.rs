use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use url::Url;

use crate::maven::error::ArtifactRepositoryError;
use crate::util::transport::ArtifactTransport;

/// The root of a repository: protocol, host, port and base path, plus an optional transport
///  that replaces the protocol's default one.
///
/// Two addresses are equal if all their parts are equal, with transports compared by name.
///  `Hash` only looks at the host.
#[derive(Clone)]
pub struct RepositoryAddress {
    protocol: String,
    host: String,
    port: Option<u16>,
    base_path: String, // without trailing '/'
    transport: Option<Arc<dyn ArtifactTransport>>,
}

impl RepositoryAddress {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>, port: Option<u16>, base_path: impl Into<String>) -> RepositoryAddress {
        let mut base_path = base_path.into();
        while base_path.ends_with('/') {
            base_path.pop();
        }

        RepositoryAddress {
            protocol: protocol.into(),
            host: host.into(),
            port,
            base_path,
            transport: None,
        }
    }

    /// e.g. "https://repo1.maven.org/maven2" or "file:///home/me/.m2/repository". User info,
    ///  query and fragment are dropped.
    pub fn parse(url: &str) -> Result<RepositoryAddress, ArtifactRepositoryError> {
        Ok(Self::from_url(&Url::parse(url)?))
    }

    /// `dir` must be absolute
    pub fn from_directory(dir: &Path) -> Result<RepositoryAddress, ArtifactRepositoryError> {
        let url = Url::from_directory_path(dir)
            .map_err(|_| ArtifactRepositoryError::InvalidRepositoryDirectory(dir.to_path_buf()))?;
        Ok(Self::from_url(&url))
    }

    fn from_url(url: &Url) -> RepositoryAddress {
        RepositoryAddress::new(
            url.scheme(),
            url.host_str().unwrap_or(""),
            url.port(),
            url.path(),
        )
    }

    pub fn with_transport(self, transport: Arc<dyn ArtifactTransport>) -> RepositoryAddress {
        RepositoryAddress {
            transport: Some(transport),
            ..self
        }
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn transport(&self) -> Option<&Arc<dyn ArtifactTransport>> {
        self.transport.as_ref()
    }

    /// The absolute location of `relative_path`, which is simply appended to the base path.
    pub fn resolve(&self, relative_path: &str) -> Result<Url, ArtifactRepositoryError> {
        let separator = if relative_path.starts_with('/') { "" } else { "/" };
        let location = format!("{}{}{}", self, separator, relative_path);
        Ok(Url::parse(&location)?)
    }
}

impl PartialEq for RepositoryAddress {
    fn eq(&self, other: &Self) -> bool {
        let same_transport = match (&self.transport, &other.transport) {
            (None, None) => true,
            (Some(a), Some(b)) => a.name() == b.name(),
            _ => false,
        };

        self.protocol == other.protocol
            && self.host == other.host
            && self.port == other.port
            && self.base_path == other.base_path
            && same_transport
    }
}
impl Eq for RepositoryAddress {}

impl Hash for RepositoryAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.host.hash(state);
    }
}

impl Display for RepositoryAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.protocol, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        write!(f, "{}", self.base_path)
    }
}

impl Debug for RepositoryAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryAddress")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_path", &self.base_path)
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .finish()
    }
}
