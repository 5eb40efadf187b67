//! Request handler module
//!
//! [`FileHandler`] is the per-server request entry point: it checks the
//! method, extracts the headers the responder needs, and writes the access
//! log. It holds only immutable state, so one `Arc<FileHandler>` is shared
//! by every connection without locking.

pub mod static_files;

use hyper::header::{HeaderMap, IF_MODIFIED_SINCE, IF_NONE_MATCH, RANGE, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::net::SocketAddr;
use std::time::Instant;

use crate::config::{Config, DEFAULT_INDEX_FILE};
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry, AccessLogFormat};
use crate::resolver::Resolver;

/// Request data the responder works from
#[derive(Debug, Default, Clone)]
pub struct RequestContext<'a> {
    /// Raw path, still percent-encoded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
    pub range_header: Option<&'a str>,
}

/// Serves files from one root directory
#[derive(Debug, Clone)]
pub struct FileHandler {
    resolver: Resolver,
    index_file: String,
    access_log: Option<AccessLogFormat>,
}

impl FileHandler {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            index_file: DEFAULT_INDEX_FILE.to_string(),
            access_log: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let handler = Self::new(Resolver::new(&config.files.root))
            .with_index_file(&config.files.index_file);
        if config.logging.access_log {
            handler.with_access_log(config.logging.access_log_format)
        } else {
            handler
        }
    }

    #[must_use]
    pub fn with_index_file(mut self, index_file: &str) -> Self {
        self.index_file = index_file.to_string();
        self
    }

    #[must_use]
    pub fn with_access_log(mut self, format: AccessLogFormat) -> Self {
        self.access_log = Some(format);
        self
    }

    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Handle one request; always produces a response
    ///
    /// The request body is never read and is dropped up front.
    pub async fn handle<B>(&self, req: Request<B>, peer_addr: SocketAddr) -> Response<ResponseBody> {
        let started = Instant::now();
        let (parts, _) = req.into_parts();
        let response = self.dispatch(&parts).await;

        if let Some(format) = self.access_log {
            log_access(&parts, &response, peer_addr, started, format);
        }
        response
    }

    async fn dispatch(&self, parts: &Parts) -> Response<ResponseBody> {
        let method = &parts.method;
        if *method != Method::GET && *method != Method::HEAD {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response();
        }

        let ctx = RequestContext {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: *method == Method::HEAD,
            if_none_match: header_str(&parts.headers, &IF_NONE_MATCH),
            if_modified_since: header_str(&parts.headers, &IF_MODIFIED_SINCE),
            range_header: header_str(&parts.headers, &RANGE),
        };

        static_files::respond(&self.resolver, &self.index_file, &ctx).await
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &hyper::header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn log_access(
    req: &Parts,
    response: &Response<ResponseBody>,
    peer_addr: SocketAddr,
    started: Instant,
    format: AccessLogFormat,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = version_label(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = if req.method == Method::HEAD {
        0
    } else {
        response
            .headers()
            .get(hyper::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };
    entry.referer = header_str(&req.headers, &REFERER).map(ToString::to_string);
    entry.user_agent = header_str(&req.headers, &USER_AGENT).map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry, format);
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
