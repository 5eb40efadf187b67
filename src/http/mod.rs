//! HTTP protocol layer module
//!
//! Protocol helpers used by the responder: bodies, MIME types, validators,
//! byte ranges and status builders. Nothing here touches the filesystem
//! except [`body::FileBody`], which streams an already-open file.

pub mod body;
pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

pub use body::ResponseBody;
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_416_response, build_500_response, build_redirect_response,
};
