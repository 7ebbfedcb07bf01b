use std::pin::Pin;

use bytes::Bytes;
use futures::TryStreamExt;
use futures_core::Stream;

/// The content of a file read from a repository. Dropping it releases whatever the transport
///  holds for it (file handle, HTTP connection).
pub struct Blob {
    pub data: Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send + 'static>>,
}
impl Blob {
    pub fn new(data: impl Stream<Item = std::io::Result<Bytes>> + Send + 'static) -> Blob {
        Blob {
            data: Box::pin(data),
        }
    }

    pub fn from_bytes(data: impl Into<Bytes>) -> Blob {
        let bytes: Bytes = data.into();
        Blob::new(futures::stream::once(async move { Ok::<_, std::io::Error>(bytes) }))
    }

    /// Drains the stream, failing on the first error chunk.
    pub async fn into_vec(self) -> std::io::Result<Vec<u8>> {
        self.data
            .map_ok(|chunk| chunk.to_vec())
            .try_concat()
            .await
    }
}
