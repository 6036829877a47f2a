//! HTTP rendering of [`ServiceError`].

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use common::ServiceError;
use html_escape::encode_text;

use super::middleware::REALM;

/// Wrapper that turns a [`ServiceError`] into a small HTML error page.
#[derive(Debug)]
pub struct HttpError(pub ServiceError);

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Html(format!("<p>{}</p>\n", encode_text(&self.0.to_string())));

        let mut resp = (status, body).into_response();
        if matches!(self.0, ServiceError::Unauthorized) {
            let challenge = format!("Basic realm=\"{REALM}\"");
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                resp.headers_mut().insert(header::WWW_AUTHENTICATE, value);
            }
        }
        resp
    }
}
