// Connection handling module
// Serves one accepted TCP connection with hyper's HTTP/1 machinery

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::handler::FileHandler;
use crate::logger;

/// Serve a connection in its own task.
///
/// Requests on one connection never block requests on another. When the
/// client goes away hyper drops the in-flight response body, which closes
/// the file being streamed.
pub fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, handler: Arc<FileHandler>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let handler = Arc::clone(&handler);
            async move { Ok::<_, Infallible>(handler.handle(req, peer_addr).await) }
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            // Clients hanging up early is routine
            if !err.is_incomplete_message() {
                logger::log_connection_error(&err);
            }
        }
    });
}
