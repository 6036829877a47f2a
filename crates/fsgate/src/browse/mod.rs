//! Filesystem browsing: path resolution, listings, and file streaming.
//!
//! Every request is classified into exactly one [`Route`]:
//!
//! | Route       | Trigger                            | Response                  |
//! |-------------|------------------------------------|---------------------------|
//! | `Root`      | request path is exactly `/`        | drive / root listing      |
//! | `Missing`   | resolved path does not exist       | 404                       |
//! | `Directory` | resolved path is a directory       | HTML listing              |
//! | `File`      | anything else that exists          | streamed file body        |

pub mod listing;
pub mod resolve;
pub mod stream;

use std::io::ErrorKind;
use std::path::PathBuf;

use common::ServiceError;
use tokio::fs;
use tracing::debug;

pub use resolve::resolve;

/// Outcome of classifying a request path against the live filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Missing(PathBuf),
    Directory(PathBuf),
    File(PathBuf),
}

/// Decide which branch serves `request_path`.
///
/// Symlinks are followed, so a link to a directory lists the directory. Any
/// stat failure other than a permission error means the path cannot exist
/// (missing, under a regular file, embedded NUL, ...) and yields `Missing`.
///
/// # Errors
///
/// Returns [`ServiceError::AccessDenied`] when the OS refuses to stat the path
/// (e.g. a permission error on a parent directory).
pub async fn classify(request_path: &str) -> Result<Route, ServiceError> {
    if request_path == "/" {
        return Ok(Route::Root);
    }

    let resolved = resolve(request_path);
    match fs::metadata(&resolved).await {
        Ok(meta) if meta.is_dir() => Ok(Route::Directory(resolved)),
        Ok(_) => Ok(Route::File(resolved)),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(ServiceError::from_io(&e, "this path"))
        }
        Err(e) => {
            debug!(path = %resolved.display(), error = %e, "stat failed");
            Ok(Route::Missing(resolved))
        }
    }
}
