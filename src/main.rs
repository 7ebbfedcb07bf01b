use std::path::PathBuf;
use std::sync::Arc;

use axum::Server;
use tracing::info;

use arti_resolve::config::ServerConfig;
use arti_resolve::maven::ArtifactRepository;
use arti_resolve::server::router;

/// usage: arti-resolve [config.json]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ServerConfig::load(config_path.as_deref())?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .init();

    let repository = ArtifactRepository::new(config.repository_address()?);
    info!("resolving artifacts from {}", repository.address());

    let app = router(Arc::new(repository), &config);

    info!("serving {}", config.bind_address);
    Server::bind(&config.bind_address)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
