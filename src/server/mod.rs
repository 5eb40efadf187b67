// Server module entry point
// Binds the listener and runs the accept loop

pub mod connection;
pub mod listener;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub use connection::spawn_connection;
pub use listener::create_listener;

use crate::error::StartupError;
use crate::handler::FileHandler;
use crate::logger;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// A bound, not yet running, file server.
///
/// Each instance owns its listener and handler, so tests can run several
/// side by side.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<FileHandler>,
}

impl Server {
    /// Bind `addr`. Fails with [`StartupError::Bind`] when the address is
    /// unavailable (port taken, no permission, unknown interface).
    pub fn bind(addr: SocketAddr, handler: FileHandler) -> Result<Self, StartupError> {
        let bind_err = |source| StartupError::Bind { addr, source };
        let listener = create_listener(addr).map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;
        Ok(Self {
            listener,
            local_addr,
            handler: Arc::new(handler),
        })
    }

    /// The bound address, with the real port when `:0` was requested
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections forever.
    ///
    /// Accept failures (e.g. out of file descriptors) are logged and the
    /// loop carries on; a single bad connection never stops the server.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    spawn_connection(stream, peer_addr, Arc::clone(&self.handler));
                }
                Err(e) => {
                    logger::log_error(&format!("Failed to accept connection: {e}"));
                    // Back off so a full fd table does not spin the loop
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}
