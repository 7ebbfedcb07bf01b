use crate::maven::coordinates::MavenCoordinates;

/// The path of a file inside a Maven repository, relative to the repository's root and with a
///  leading '/', e.g. "/org/example/lib/1.0/lib-1.0.jar".
///
/// `extension` is without leading '.'. Nothing is escaped.
pub fn as_maven_path(coordinates: &MavenCoordinates, extension: &str) -> String {
    let mut result = String::new();
    for segment in coordinates.group_id().split('.') {
        result.push('/');
        result.push_str(segment);
    }

    format!(
        "{}/{}/{}/{}",
        result,
        coordinates.artifact_id(),
        coordinates.version(),
        maven_file_name(coordinates, extension),
    )
}

fn maven_file_name(coordinates: &MavenCoordinates, extension: &str) -> String {
    format!("{}-{}.{}", coordinates.artifact_id(), coordinates.version(), extension)
}
