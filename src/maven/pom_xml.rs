#![allow(non_snake_case)]

//! Typed view of the parts of a POM (https://maven.apache.org/pom.html) that are needed to
//!  find an artifact's bundle and its direct dependencies. Everything else in the document is
//!  ignored.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::trace;
use xml::reader::{EventReader, XmlEvent};

use crate::maven::coordinates::MavenCoordinates;
use crate::maven::error::ArtifactRepositoryError;

pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// dependencies with these scopes (or with no scope at all) are needed to use an artifact
const REQUIRED_SCOPES: [&str; 2] = ["compile", "runtime"];

#[derive(Debug, Error)]
pub enum PomParseError {
    #[error("not well-formed XML")]
    Xml(#[from] xml::reader::Error),
    #[error("unexpected root element {0}, expected a POM project")]
    UnexpectedRoot(String),
    #[error("document does not match the POM schema")]
    Binding(#[from] serde_xml_rs::Error),
}

#[derive(Debug, Default, Deserialize)]
pub struct PomProject {
    parent: Option<PomParent>,
    packaging: Option<String>,
    dependencies: Option<PomDependencies>,
}

#[derive(Debug, Deserialize)]
struct PomParent {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PomDependencies {
    #[serde(default)]
    dependency: Vec<PomDependency>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PomDependency {
    groupId: Option<String>,
    artifactId: Option<String>,
    version: Option<String>,
    scope: Option<String>,
}

pub fn parse_pom(data: &[u8]) -> Result<PomProject, PomParseError> {
    check_root_element(data)?;
    Ok(serde_xml_rs::from_reader(data)?)
}

/// The serde binding does not look at the root element's name, so a document with any root
///  would bind to an empty project. This rejects everything but a namespaced `<project>`.
fn check_root_element(data: &[u8]) -> Result<(), PomParseError> {
    for event in EventReader::new(data) {
        match event? {
            XmlEvent::StartElement { name, .. } => {
                return if name.local_name == "project" && name.namespace.as_deref() == Some(POM_NAMESPACE) {
                    Ok(())
                }
                else {
                    Err(PomParseError::UnexpectedRoot(name.to_string()))
                };
            }
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }
    Err(PomParseError::UnexpectedRoot("<none>".to_string()))
}

/// Empty and whitespace-only elements count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl PomProject {
    pub fn packaging(&self) -> Option<&str> {
        present(&self.packaging)
    }

    /// NB: an empty `<parent/>` is the same as no parent at all
    pub fn parent_version(&self) -> Option<&str> {
        self.parent.as_ref()
            .and_then(|p| present(&p.version))
    }

    pub fn dependency_entries(&self) -> &[PomDependency] {
        match &self.dependencies {
            Some(d) => &d.dependency,
            None => &[],
        }
    }

    /// Coordinates of all `compile` and `runtime` dependencies. A single required dependency
    ///  without a version (its own or the parent's) fails the whole thing.
    pub fn required_dependencies(&self) -> Result<HashSet<MavenCoordinates>, ArtifactRepositoryError> {
        let parent_version = self.parent_version();

        let mut result = HashSet::new();
        for dependency in self.dependency_entries() {
            if let Some(coordinates) = dependency.to_required_coordinates(parent_version)? {
                result.insert(coordinates);
            }
        }
        Ok(result)
    }
}

impl PomDependency {
    pub fn scope(&self) -> Option<&str> {
        present(&self.scope)
    }

    pub fn is_required(&self) -> bool {
        match self.scope() {
            None => true,
            Some(scope) => REQUIRED_SCOPES.contains(&scope),
        }
    }

    /// `None` for dependencies that are not required, see [`PomDependency::is_required`].
    pub fn to_required_coordinates(&self, parent_version: Option<&str>) -> Result<Option<MavenCoordinates>, ArtifactRepositoryError> {
        if !self.is_required() {
            trace!("skipping dependency {:?}:{:?} with scope {:?}", self.groupId, self.artifactId, self.scope);
            return Ok(None);
        }

        let version = present(&self.version)
            .or(parent_version)
            .ok_or(ArtifactRepositoryError::UnknownArtifactVersion)?;

        let coordinates = MavenCoordinates::new(
            present(&self.groupId).unwrap_or_default(),
            present(&self.artifactId).unwrap_or_default(),
            version,
        )?;
        Ok(Some(coordinates))
    }
}
