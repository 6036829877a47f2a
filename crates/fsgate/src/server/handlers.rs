//! Axum request handlers.

use axum::{
    http::Uri,
    response::{Html, IntoResponse, Response},
};
use common::ServiceError;
use tracing::debug;

use super::error::HttpError;
use crate::browse::{self, listing, stream, Route};

/// `GET /` and `GET /*path` — browse the filesystem.
///
/// The raw (still percent-encoded) request path drives both resolution and
/// the hrefs of any listing, so links round-trip through the same decoder.
pub async fn browse(uri: Uri) -> Result<Response, HttpError> {
    let request_path = uri.path();

    let response = match browse::classify(request_path).await? {
        Route::Root => Html(listing::render_roots().await?).into_response(),
        Route::Missing(path) => {
            debug!(path = %path.display(), "path not found");
            return Err(ServiceError::NotFound.into());
        }
        Route::Directory(dir) => {
            Html(listing::render_directory(&dir, request_path).await?).into_response()
        }
        Route::File(file) => stream::stream_file(&file).await?,
    };
    Ok(response)
}
