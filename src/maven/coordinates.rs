use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::maven::error::ArtifactRepositoryError;

/// Identifies an artifact by group id, artifact id and version. None of the three is ever
///  empty.
///
/// NB: `Hash` looks at the artifact id only. That is consistent with `Eq` (which compares all
///  three parts) but means that e.g. all versions of an artifact land in the same bucket.
#[derive(PartialEq, Eq, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenCoordinates {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl MavenCoordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<MavenCoordinates, ArtifactRepositoryError> {
        Ok(MavenCoordinates {
            group_id: non_empty(group_id.into(), "groupId")?,
            artifact_id: non_empty(artifact_id.into(), "artifactId")?,
            version: non_empty(version.into(), "version")?,
        })
    }

    /// dot-separated, e.g. "org.apache.commons"
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

fn non_empty(s: String, what: &'static str) -> Result<String, ArtifactRepositoryError> {
    if s.is_empty() {
        Err(ArtifactRepositoryError::MissingCoordinate(what))
    }
    else {
        Ok(s)
    }
}

impl Hash for MavenCoordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.artifact_id.hash(state);
    }
}

impl Display for MavenCoordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[cfg(test)]
mod test {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    use rstest::*;

    use super::*;

    fn coordinates(group_id: &str, artifact_id: &str, version: &str) -> MavenCoordinates {
        MavenCoordinates::new(group_id, artifact_id, version).unwrap()
    }

    #[rstest]
    #[case::missing_group("", "some-artifact", "some-version", "groupId")]
    #[case::missing_artifact("some.group", "", "some-version", "artifactId")]
    #[case::missing_version("some.group", "some-artifact", "", "version")]
    fn test_new_rejects_missing_part(#[case] group_id: &str, #[case] artifact_id: &str, #[case] version: &str, #[case] expected_missing: &str) {
        match MavenCoordinates::new(group_id, artifact_id, version) {
            Err(ArtifactRepositoryError::MissingCoordinate(what)) => assert_eq!(what, expected_missing),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_equal_by_fields() {
        assert_eq!(
            coordinates("some.group", "some-artifact", "some-version"),
            coordinates("some.group", "some-artifact", "some-version"),
        );
    }

    #[rstest]
    #[case::group("another.group", "some-artifact", "some-version")]
    #[case::artifact("some.group", "another-artifact", "some-version")]
    #[case::version("some.group", "some-artifact", "another-version")]
    fn test_not_equal(#[case] group_id: &str, #[case] artifact_id: &str, #[case] version: &str) {
        assert_ne!(
            coordinates("some.group", "some-artifact", "some-version"),
            coordinates(group_id, artifact_id, version),
        );
    }

    #[rstest]
    #[case::group("another.group", "some-artifact", "some-version")]
    #[case::version("some.group", "some-artifact", "another-version")]
    fn test_hash_ignores_group_and_version(#[case] group_id: &str, #[case] artifact_id: &str, #[case] version: &str) {
        let hasher = RandomState::new();
        let some = coordinates("some.group", "some-artifact", "some-version");
        let other = coordinates(group_id, artifact_id, version);

        assert_ne!(some, other);
        assert_eq!(hasher.hash_one(&some), hasher.hash_one(&other));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            coordinates("org.example", "lib", "1.2.3").to_string(),
            "org.example:lib:1.2.3",
        );
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(coordinates("org.example", "lib", "1.2.3")).unwrap();
        assert_eq!(json, serde_json::json!({"groupId": "org.example", "artifactId": "lib", "version": "1.2.3"}));
    }
}
