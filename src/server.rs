use std::sync::Arc;

use axum::{Json, Router};
use axum::error_handling::HandleErrorLayer;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower::{BoxError, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing::warn;
use url::Url;

use crate::config::ServerConfig;
use crate::maven::{Artifact, ArtifactRepository, ArtifactRepositoryError, MavenCoordinates, ResolveError};

/// `GET /resolve/:group_id/:artifact_id/:version` resolves the coordinates against `repository`
pub fn router(repository: Arc<ArtifactRepository>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/resolve/:group_id/:artifact_id/:version", get(resolve))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .load_shed()
                .concurrency_limit(config.concurrency_limit)
                .timeout(config.request_timeout())
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(repository)
}

#[derive(Serialize)]
struct ArtifactResponse {
    location: Url,
    /// sorted for stable output
    dependencies: Vec<MavenCoordinates>,
}
impl From<Artifact> for ArtifactResponse {
    fn from(artifact: Artifact) -> Self {
        let mut dependencies: Vec<MavenCoordinates> = artifact.dependencies()
            .iter()
            .cloned()
            .collect();
        dependencies.sort_by(|a, b| {
            (a.group_id(), a.artifact_id(), a.version())
                .cmp(&(b.group_id(), b.artifact_id(), b.version()))
        });

        ArtifactResponse {
            location: artifact.location().clone(),
            dependencies,
        }
    }
}

async fn resolve(
    State(repository): State<Arc<ArtifactRepository>>,
    Path((group_id, artifact_id, version)): Path<(String, String, String)>,
) -> Result<Json<ArtifactResponse>, ResolveFailure> {
    let coordinates = MavenCoordinates::new(group_id, artifact_id, version)
        .map_err(ResolveError::from)?;

    let artifact = repository.resolve(&coordinates)
        .await
        .map_err(|e| {
            warn!("failed to resolve {}: {}", coordinates, describe(&e));
            e
        })?;

    Ok(Json(artifact.into()))
}

struct ResolveFailure(ResolveError);

impl From<ResolveError> for ResolveFailure {
    fn from(e: ResolveError) -> Self {
        ResolveFailure(e)
    }
}

impl IntoResponse for ResolveFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ResolveError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ResolveError::Io(_) => StatusCode::BAD_GATEWAY,
            ResolveError::Repository(ArtifactRepositoryError::MissingCoordinate(_)) => StatusCode::BAD_REQUEST,
            ResolveError::Repository(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (status, Json(ErrorResponse { error: describe(&self.0) })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// the error's message followed by those of its causes
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut result = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        result.push_str(": ");
        result.push_str(&cause.to_string());
        source = cause.source();
    }
    result
}

async fn handle_middleware_error(error: BoxError) -> (StatusCode, String) {
    if error.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    }
    else if error.is::<tower::load_shed::error::Overloaded>() {
        (StatusCode::SERVICE_UNAVAILABLE, "too many concurrent requests".to_string())
    }
    else {
        (StatusCode::INTERNAL_SERVER_ERROR, format!("unhandled internal error: {}", error))
    }
}
