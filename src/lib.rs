//! Static file server
//!
//! Serves the files under one root directory over HTTP/1.1. Request paths
//! are decoded and normalized by [`resolver`], answered by [`handler`], and
//! connections are driven by [`server`].

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod resolver;
pub mod server;

pub use error::StartupError;
pub use handler::FileHandler;
pub use resolver::{Resolution, Resolver};
pub use server::Server;
