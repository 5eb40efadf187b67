//! Static file responder
//!
//! Turns a [`Resolution`] into a complete response. Directory policy:
//! - `/dir` redirects to `/dir/`
//! - `/dir/` serves `/dir/<index_file>` when it is a regular file, else 404
//! - `/dir/<index_file>` redirects to `/dir/`
//! - `/file/` redirects to `/file`

use hyper::Response;
use std::io::{self, SeekFrom};
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

use super::RequestContext;
use crate::http::body::{self, FileBody, ResponseBody};
use crate::http::range::{ByteRange, RangeParseResult};
use crate::http::response::{self as resp, FileHeaders};
use crate::http::{cache, mime};
use crate::logger;
use crate::resolver::{FileEntry, Resolution, Resolver};

/// Produce the response for a GET/HEAD request
pub async fn respond(
    resolver: &Resolver,
    index_file: &str,
    ctx: &RequestContext<'_>,
) -> Response<ResponseBody> {
    match resolver.resolve(ctx.path).await {
        Resolution::Forbidden => resp::build_403_response(),
        Resolution::NotFound => resp::build_404_response(),
        Resolution::RegularFile(file) => {
            if ctx.path.ends_with('/') {
                let trimmed = ctx.path.trim_end_matches('/');
                return resp::build_redirect_response(&location(trimmed, ctx.query));
            }
            if let Some(dir) = index_parent(ctx.path, index_file) {
                return resp::build_redirect_response(&location(dir, ctx.query));
            }
            serve_file(&file, ctx).await
        }
        Resolution::Directory(_) => {
            if !ctx.path.ends_with('/') {
                return resp::build_redirect_response(&location(
                    &format!("{}/", ctx.path),
                    ctx.query,
                ));
            }
            serve_index(resolver, index_file, ctx).await
        }
    }
}

/// Serve `<dir>/<index_file>` for a directory request ending in `/`
async fn serve_index(
    resolver: &Resolver,
    index_file: &str,
    ctx: &RequestContext<'_>,
) -> Response<ResponseBody> {
    let index_path = format!("{}{index_file}", ctx.path);
    match resolver.resolve(&index_path).await {
        Resolution::RegularFile(file) => serve_file(&file, ctx).await,
        Resolution::Forbidden => resp::build_403_response(),
        Resolution::Directory(_) | Resolution::NotFound => resp::build_404_response(),
    }
}

/// `/a/b/index.html` -> `Some("/a/b/")`
fn index_parent<'a>(path: &'a str, index_file: &str) -> Option<&'a str> {
    let dir = path.strip_suffix(index_file)?;
    dir.ends_with('/').then_some(dir)
}

/// Build a redirect target from a raw request path
///
/// Leading slashes collapse to one so the target can never be read as a
/// protocol-relative URL (`//host/...`).
fn location(path: &str, query: Option<&str>) -> String {
    let path = format!("/{}", path.trim_start_matches('/'));
    match query {
        Some(q) => format!("{path}?{q}"),
        None => path,
    }
}

async fn serve_file(file: &FileEntry, ctx: &RequestContext<'_>) -> Response<ResponseBody> {
    let etag = cache::generate_etag(file.size, file.modified);
    let last_modified = file.modified.map(cache::format_http_date);
    let headers = FileHeaders {
        content_type: mime::content_type_for(&file.requested),
        etag: &etag,
        last_modified: last_modified.as_deref(),
    };

    // If-None-Match wins over If-Modified-Since when both are present
    let not_modified = if ctx.if_none_match.is_some() {
        cache::check_etag_match(ctx.if_none_match, &etag)
    } else {
        cache::check_not_modified_since(ctx.if_modified_since, file.modified)
    };
    if not_modified {
        return resp::build_304_response(&headers);
    }

    match crate::http::parse_range_header(ctx.range_header, file.size) {
        RangeParseResult::Valid(range) => match open_body(file, ctx.is_head, range).await {
            Ok(content) => resp::build_partial_response(content, range, file.size, &headers),
            Err(e) => open_error_response(file, &e),
        },
        RangeParseResult::NotSatisfiable => resp::build_416_response(file.size),
        RangeParseResult::None => {
            let whole = ByteRange {
                start: 0,
                end: file.size.saturating_sub(1),
            };
            let content = if file.size == 0 {
                Ok(body::empty())
            } else {
                open_body(file, ctx.is_head, whole).await
            };
            match content {
                Ok(content) => resp::build_file_response(content, file.size, &headers),
                Err(e) => open_error_response(file, &e),
            }
        }
    }
}

/// Open the file positioned at `range.start`; HEAD never touches the file
async fn open_body(file: &FileEntry, is_head: bool, range: ByteRange) -> io::Result<ResponseBody> {
    if is_head {
        return Ok(body::empty());
    }
    let mut handle = File::open(&file.path).await?;
    if range.start > 0 {
        handle.seek(SeekFrom::Start(range.start)).await?;
    }
    Ok(FileBody::new(handle, range.content_length()).boxed())
}

/// The file changed between resolution and open
fn open_error_response(file: &FileEntry, err: &io::Error) -> Response<ResponseBody> {
    match err.kind() {
        io::ErrorKind::NotFound => resp::build_404_response(),
        io::ErrorKind::PermissionDenied => resp::build_403_response(),
        _ => {
            logger::log_error(&format!(
                "Failed to open '{}': {err}",
                file.path.display()
            ));
            resp::build_500_response()
        }
    }
}
