//! HTTP response building module
//!
//! Builders for every status the server emits. Error bodies are short fixed
//! strings and never carry filesystem details.

use hyper::header::{
    HeaderValue, ACCEPT_RANGES, ALLOW, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG,
    LAST_MODIFIED, LOCATION,
};
use hyper::{Response, StatusCode};

use super::body::{self, ResponseBody};
use super::range::ByteRange;

/// Methods the server answers
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Validators and type shared by 200, 206 and 304 responses
#[derive(Debug, Clone)]
pub struct FileHeaders<'a> {
    pub content_type: &'a str,
    pub etag: &'a str,
    pub last_modified: Option<&'a str>,
}

/// Build a small `text/plain` response
fn plain(status: StatusCode, text: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, text.len())
        .body(body::full(text))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            fallback(status)
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<ResponseBody> {
    plain(StatusCode::FORBIDDEN, "403 Forbidden\n")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    plain(StatusCode::NOT_FOUND, "404 Not Found\n")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    let mut resp = plain(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed\n");
    resp.headers_mut()
        .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
    resp
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<ResponseBody> {
    plain(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error\n")
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: u64) -> Response<ResponseBody> {
    let text = "416 Range Not Satisfiable\n";
    Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, text.len())
        .header(CONTENT_RANGE, format!("bytes */{file_size}"))
        .body(body::full(text))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::RANGE_NOT_SATISFIABLE, &e);
            fallback(StatusCode::RANGE_NOT_SATISFIABLE)
        })
}

/// Build 301 Moved Permanently response
///
/// `location` must already be percent-encoded (it is derived from the raw
/// request path).
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::MOVED_PERMANENTLY, &e);
            fallback(StatusCode::NOT_FOUND)
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(headers: &FileHeaders<'_>) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, headers.etag);
    if let Some(last_modified) = headers.last_modified {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }
    builder.body(body::empty()).unwrap_or_else(|e| {
        log_build_error(StatusCode::NOT_MODIFIED, &e);
        fallback(StatusCode::NOT_MODIFIED)
    })
}

/// Build 200 OK response for a whole file
///
/// `content` is empty for HEAD; `size` is always the full file size.
pub fn build_file_response(
    content: ResponseBody,
    size: u64,
    headers: &FileHeaders<'_>,
) -> Response<ResponseBody> {
    file_builder(StatusCode::OK, headers)
        .header(CONTENT_LENGTH, size)
        .body(content)
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::OK, &e);
            build_500_response()
        })
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    content: ResponseBody,
    range: ByteRange,
    total_size: u64,
    headers: &FileHeaders<'_>,
) -> Response<ResponseBody> {
    file_builder(StatusCode::PARTIAL_CONTENT, headers)
        .header(CONTENT_LENGTH, range.content_length())
        .header(CONTENT_RANGE, range.content_range(total_size))
        .body(content)
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::PARTIAL_CONTENT, &e);
            build_500_response()
        })
}

fn file_builder(status: StatusCode, headers: &FileHeaders<'_>) -> hyper::http::response::Builder {
    let builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, headers.content_type)
        .header(ACCEPT_RANGES, "bytes")
        .header(ETAG, headers.etag);
    match headers.last_modified {
        Some(last_modified) => builder.header(LAST_MODIFIED, last_modified),
        None => builder,
    }
}

fn fallback(status: StatusCode) -> Response<ResponseBody> {
    let mut resp = Response::new(body::empty());
    *resp.status_mut() = status;
    resp
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
