use std::io::{Error, ErrorKind};
use std::net::{SocketAddr, TcpListener};

use async_trait::async_trait;
use axum::Router;
use url::Url;

use crate::util::blob::Blob;
use crate::util::transport::ArtifactTransport;

/// Serves `app` on an ephemeral local port for the rest of the test's runtime. Must be called
///  from inside a tokio runtime.
pub fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);

    addr
}

/// A transport that is only good for comparing by name
pub struct NamedTransport(pub &'static str);

#[async_trait]
impl ArtifactTransport for NamedTransport {
    fn name(&self) -> &str {
        self.0
    }

    async fn open(&self, location: &Url) -> std::io::Result<Blob> {
        Err(Error::new(ErrorKind::Unsupported, format!("{} can not open {}", self.0, location)))
    }
}
