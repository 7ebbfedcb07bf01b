use std::path::PathBuf;

use thiserror::Error;

use crate::maven::pom_xml::PomParseError;

/// Failure of a single resolution, as seen by callers of
///  [`ArtifactRepository::resolve`](crate::maven::artifact_repo::ArtifactRepository::resolve).
///
/// I/O failures from the transport are passed through as they are. Everything else is an
///  [`ArtifactRepositoryError`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Repository(#[from] ArtifactRepositoryError),
}

#[derive(Debug, Error)]
pub enum ArtifactRepositoryError {
    #[error("malformed project document")]
    MalformedDocument(#[source] PomParseError),

    #[error("malformed artifact location")]
    MalformedLocation(#[from] url::ParseError),

    #[error("no transport available for protocol {0:?}")]
    UnsupportedProtocol(String),

    #[error("not an absolute directory: {}", .0.display())]
    InvalidRepositoryDirectory(PathBuf),

    #[error("Unknown artifact version")]
    UnknownArtifactVersion,

    #[error("missing {0} in artifact coordinates")]
    MissingCoordinate(&'static str),
}
