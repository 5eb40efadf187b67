//! Path resolver module
//!
//! Maps a request path to something under the root directory and classifies
//! it. Resolution only reads metadata and never fails: every filesystem
//! error collapses into one of the [`Resolution`] cases.

pub mod path;

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

use crate::logger;

/// A regular file found under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Canonical absolute path
    pub path: PathBuf,
    /// Root-relative path as requested, before symlinks are followed.
    /// The content type comes from this name.
    pub requested: PathBuf,
    pub size: u64,
    /// `None` when the platform cannot report modification times
    pub modified: Option<SystemTime>,
}

/// Outcome of resolving one request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    RegularFile(FileEntry),
    /// Canonical absolute path of the directory
    Directory(PathBuf),
    NotFound,
    Forbidden,
}

/// Resolves request paths against a fixed root directory
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a raw request path (percent-encoded, without query string)
    pub async fn resolve(&self, request_path: &str) -> Resolution {
        let relative = match path::sanitize(request_path) {
            Ok(relative) => relative,
            Err(rejection) => {
                logger::log_warning(&format!(
                    "Rejected request path {request_path:?}: {rejection}"
                ));
                return Resolution::Forbidden;
            }
        };

        let candidate = self.root.join(&relative);
        let canonical = match self.canonical_within_root(&candidate, request_path).await {
            Ok(canonical) => canonical,
            Err(resolution) => return resolution,
        };

        let metadata = match fs::metadata(&canonical).await {
            Ok(metadata) => metadata,
            Err(e) => return classify_io_error(&e),
        };

        if metadata.is_file() {
            Resolution::RegularFile(FileEntry {
                path: canonical,
                requested: relative,
                size: metadata.len(),
                modified: metadata.modified().ok(),
            })
        } else if metadata.is_dir() {
            Resolution::Directory(canonical)
        } else {
            // FIFOs, sockets and devices are never served
            Resolution::Forbidden
        }
    }

    /// Canonicalize the candidate and make sure symlinks did not lead it out
    async fn canonical_within_root(
        &self,
        candidate: &Path,
        request_path: &str,
    ) -> Result<PathBuf, Resolution> {
        let root = fs::canonicalize(&self.root).await.map_err(|e| {
            logger::log_warning(&format!(
                "Root directory '{}' is not accessible: {e}",
                self.root.display()
            ));
            Resolution::NotFound
        })?;

        let canonical = fs::canonicalize(candidate)
            .await
            .map_err(|e| classify_io_error(&e))?;

        if canonical.starts_with(&root) {
            Ok(canonical)
        } else {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {request_path:?} leaves the root directory"
            ));
            Err(Resolution::Forbidden)
        }
    }
}

/// Permission problems are 403, everything else (missing, `ENOTDIR`, ...) is 404
fn classify_io_error(err: &io::Error) -> Resolution {
    match err.kind() {
        io::ErrorKind::PermissionDenied => Resolution::Forbidden,
        _ => Resolution::NotFound,
    }
}
