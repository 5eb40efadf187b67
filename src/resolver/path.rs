//! Request path decoding and lexical normalization
//!
//! Pure string work, no filesystem access. The output is always a relative
//! path made only of normal components, so joining it onto the root can
//! never leave the root lexically.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Why a request path was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejection {
    /// Broken percent-encoding or non UTF-8 bytes
    Malformed,
    /// NUL byte or backslash after decoding
    IllegalCharacter,
    /// A segment the platform would not treat as a plain file name
    IllegalSegment,
    /// `..` climbing above the root
    Traversal,
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Malformed => "malformed percent-encoding",
            Self::IllegalCharacter => "illegal character",
            Self::IllegalSegment => "illegal path segment",
            Self::Traversal => "escapes the root directory",
        };
        f.write_str(reason)
    }
}

/// Decode `%XX` escapes
///
/// Returns `None` for truncated or non-hex escapes and for results that are
/// not valid UTF-8. `+` is left alone, it only means space in query strings.
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value)?;
            let lo = bytes.get(i + 2).copied().and_then(hex_value)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Turn a raw (still encoded) request path into a root-relative path
///
/// Empty and `.` segments are dropped, `..` removes the previous segment.
/// A `..` with nothing left to remove is a traversal attempt.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use fileserve::resolver::path::{sanitize, PathRejection};
///
/// assert_eq!(sanitize("/a/./b/../c.txt"), Ok(PathBuf::from("a/c.txt")));
/// assert_eq!(sanitize("/../etc/passwd"), Err(PathRejection::Traversal));
/// ```
pub fn sanitize(request_path: &str) -> Result<PathBuf, PathRejection> {
    let decoded = percent_decode(request_path).ok_or(PathRejection::Malformed)?;
    if decoded.contains(['\0', '\\']) {
        return Err(PathRejection::IllegalCharacter);
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(PathRejection::Traversal);
                }
            }
            _ if is_plain_segment(segment) => segments.push(segment),
            _ => return Err(PathRejection::IllegalSegment),
        }
    }

    Ok(segments.into_iter().collect())
}

/// Exactly one normal component (rejects drive prefixes such as `C:`)
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
