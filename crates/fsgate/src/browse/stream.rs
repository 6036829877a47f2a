//! File download responses.

use std::path::Path;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use common::{content::DEFAULT_CONTENT_TYPE, Disposition, ServiceError};
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Content type for `path`, looked up by extension.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_owned())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned())
}

/// Stream `path` back to the client with type and disposition headers.
///
/// The body is read lazily; a failure part-way through aborts the response
/// body rather than producing an error page.
///
/// # Errors
///
/// Returns a [`ServiceError`] if the file cannot be opened.
pub async fn stream_file(path: &Path) -> Result<Response, ServiceError> {
    let file = fs::File::open(path)
        .await
        .map_err(|e| ServiceError::from_io(&e, "this file"))?;
    let size = file
        .metadata()
        .await
        .map_err(|e| ServiceError::from_io(&e, "this file"))?
        .len();

    let content_type = content_type_for(path);
    let disposition = Disposition::for_content_type(&content_type);
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(path = %path.display(), size, content_type = %content_type, ?disposition, "streaming file");

    let body = Body::from_stream(ReaderStream::new(file));
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, header_value(&content_type)?);
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(&disposition.header_value(&filename))?,
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
    Ok(response)
}

fn header_value(value: &str) -> Result<HeaderValue, ServiceError> {
    HeaderValue::from_str(value)
        .map_err(|_| ServiceError::Internal(format!("invalid header value: {value}")))
}
