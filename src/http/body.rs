//! Response body types
//!
//! Every response uses [`ResponseBody`]; small fixed bodies are `Full`,
//! file contents are streamed through [`FileBody`] in bounded chunks.

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes, Frame, SizeHint};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

use crate::logger;

/// Largest chunk read from disk per frame
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Body type shared by every response the server produces
pub type ResponseBody = BoxBody<Bytes, io::Error>;

/// Body holding the given bytes in memory
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Body with no content (HEAD, 304)
pub fn empty() -> ResponseBody {
    full(Bytes::new())
}

/// Streams exactly `remaining` bytes from an open file
///
/// Dropping the body closes the file, which is how a client disconnect
/// releases the handle.
pub struct FileBody {
    file: File,
    remaining: u64,
    buf: Vec<u8>,
}

impl FileBody {
    /// Stream `length` bytes starting at the file's current position
    pub fn new(file: File, length: u64) -> Self {
        let capacity = usize::try_from(length).map_or(CHUNK_SIZE, |l| l.min(CHUNK_SIZE));
        Self {
            file,
            remaining: length,
            buf: vec![0; capacity],
        }
    }

    pub fn boxed(self) -> ResponseBody {
        BodyExt::boxed(self)
    }
}

impl Body for FileBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        let want = usize::try_from(this.remaining).map_or(this.buf.len(), |r| r.min(this.buf.len()));
        let mut read_buf = ReadBuf::new(&mut this.buf[..want]);

        match Pin::new(&mut this.file).poll_read(cx, &mut read_buf) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Err(e)) => {
                logger::log_error(&format!("Read failed while streaming file: {e}"));
                this.remaining = 0;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                if filled.is_empty() {
                    // The file shrank after Content-Length was sent
                    logger::log_error(&format!(
                        "File truncated while streaming, {} bytes missing",
                        this.remaining
                    ));
                    this.remaining = 0;
                    return Poll::Ready(Some(Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "file truncated while streaming",
                    ))));
                }
                let chunk = Bytes::copy_from_slice(filled);
                this.remaining -= chunk.len() as u64;
                Poll::Ready(Some(Ok(Frame::data(chunk))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.remaining == 0
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining)
    }
}
