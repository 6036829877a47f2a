//! Common error types shared across crates.

use thiserror::Error;

/// Per-request failure reported back to the browser.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::Unauthorized`] → 401
/// - [`ServiceError::AccessDenied`] → 403
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Basic credentials were missing or did not match the configured pair.
    #[error("Access Denied: Invalid Username or Password")]
    Unauthorized,

    /// The resolved path does not exist on disk.
    #[error("Path not found")]
    NotFound,

    /// The OS refused to enumerate or stat the target.
    #[error("Access Denied: {0}")]
    AccessDenied(String),

    /// An unexpected I/O failure outside the categories above.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::Unauthorized => 401,
            ServiceError::AccessDenied(_) => 403,
            ServiceError::NotFound => 404,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Classify an I/O error raised while touching `what`.
    pub fn from_io(err: &std::io::Error, what: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ServiceError::NotFound,
            std::io::ErrorKind::PermissionDenied => {
                ServiceError::AccessDenied(format!("Cannot read {what}."))
            }
            _ => ServiceError::Internal(format!("{what}: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::Unauthorized.http_status(), 401);
        assert_eq!(ServiceError::AccessDenied("x".into()).http_status(), 403);
        assert_eq!(ServiceError::NotFound.http_status(), 404);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::AccessDenied("Cannot read this directory.".into());
        assert_eq!(e.to_string(), "Access Denied: Cannot read this directory.");
        assert_eq!(ServiceError::NotFound.to_string(), "Path not found");
    }

    #[test]
    fn io_errors_are_classified_by_kind() {
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert!(matches!(
            ServiceError::from_io(&missing, "file"),
            ServiceError::NotFound
        ));

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(ServiceError::from_io(&denied, "this file").http_status(), 403);

        let other = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let e = ServiceError::from_io(&other, "file");
        assert_eq!(e.http_status(), 500);
        assert!(e.to_string().contains("disk on fire"));
    }
}
