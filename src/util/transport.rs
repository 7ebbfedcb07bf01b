use std::io::{Error, ErrorKind};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use hyper::{Body, Client, Request, Response, StatusCode, Uri};
use hyper::client::HttpConnector;
use hyper::header::{LOCATION, USER_AGENT};
use hyper_tls::HttpsConnector;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, trace};
use url::Url;

use crate::util::blob::Blob;

/// Maven Central returns a 403 without a user agent
const USER_AGENT_VALUE: &str = concat!("arti-resolve/", env!("CARGO_PKG_VERSION"));

/// Repository managers and mirrors commonly redirect; longer chains are treated as a failure
const MAX_REDIRECTS: usize = 5;

/// Opens files in a repository for reading. Failures are plain I/O errors.
#[async_trait]
pub trait ArtifactTransport: Send + Sync {
    /// Transports with the same name are considered interchangeable. This is what repository
    ///  addresses compare when checking for equality.
    fn name(&self) -> &str;

    async fn open(&self, location: &Url) -> std::io::Result<Blob>;
}

/// The transport to use for a protocol if no custom transport is configured
pub fn default_transport(protocol: &str) -> Option<Arc<dyn ArtifactTransport>> {
    match protocol {
        "file" => Some(Arc::new(FileTransport {})),
        "http" | "https" => Some(Arc::new(HttpTransport::new())),
        _ => None,
    }
}

pub struct FileTransport {
}

#[async_trait]
impl ArtifactTransport for FileTransport {
    fn name(&self) -> &str {
        "file"
    }

    async fn open(&self, location: &Url) -> std::io::Result<Blob> {
        let path = location.to_file_path()
            .map_err(|_| Error::new(ErrorKind::InvalidInput, format!("not a local file: {}", location)))?;

        trace!("opening file {}", path.display());
        let file = File::open(&path).await?;
        Ok(Blob::new(ReaderStream::new(file)))
    }
}

/// Instances do HTTP connection caching internally, so keeping them alive has performance benefits.
pub struct HttpTransport {
    client: Client<HttpsConnector<HttpConnector>>,
}
impl HttpTransport {
    pub fn new() -> HttpTransport {
        HttpTransport {
            client: Client::builder()
                .build::<_, Body>(HttpsConnector::new()),
        }
    }

    async fn get(&self, location: &Url) -> std::io::Result<Response<Body>> {
        let uri = Uri::try_from(location.as_str())
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .body(Body::empty())
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

        trace!("getting {:?}", request);

        self.client.request(request)
            .await
            .map_err(|e| Error::new(ErrorKind::Other, e))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new()
    }
}

#[async_trait]
impl ArtifactTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn open(&self, location: &Url) -> std::io::Result<Blob> {
        let mut current = location.clone();

        for _ in 0..=MAX_REDIRECTS {
            let response = self.get(&current).await?;

            match response.status() {
                s if s.is_success() => {
                    let data = response.into_body()
                        .map(|chunk| chunk.map_err(|e| Error::new(ErrorKind::Other, e)));
                    return Ok(Blob::new(data));
                }
                StatusCode::NOT_FOUND => {
                    return Err(Error::new(ErrorKind::NotFound, format!("not found: {}", current)));
                }
                StatusCode::MOVED_PERMANENTLY
                | StatusCode::FOUND
                | StatusCode::SEE_OTHER
                | StatusCode::TEMPORARY_REDIRECT
                | StatusCode::PERMANENT_REDIRECT => {
                    let target = redirect_target(&current, &response)?;
                    debug!("following redirect from {} to {}", current, target);
                    current = target;
                }
                s => {
                    return Err(Error::new(ErrorKind::Other, format!("upstream request for {} failed: {}", current, s)));
                }
            }
        }

        Err(Error::new(ErrorKind::Other, format!("more than {} redirects for {}", MAX_REDIRECTS, location)))
    }
}

/// The `Location` of a redirect response, resolved against the requested URL. Only HTTP(S)
///  targets are followed.
fn redirect_target(requested: &Url, response: &Response<Body>) -> std::io::Result<Url> {
    let location = response.headers()
        .get(LOCATION)
        .ok_or_else(|| Error::new(ErrorKind::Other, format!("redirect from {} without a location", requested)))?
        .to_str()
        .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

    let target = requested.join(location)
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("invalid redirect location {:?}: {}", location, e)))?;

    match target.scheme() {
        "http" | "https" => Ok(target),
        scheme => Err(Error::new(ErrorKind::Other, format!("redirect from {} to unsupported protocol {}", requested, scheme))),
    }
}
