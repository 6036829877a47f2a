//! Axum middleware applied to every route.
//!
//! The auth gate runs before routing reaches any handler, so `/`, unknown
//! methods, and file paths are all challenged alike.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};
use common::ServiceError;
use tracing::warn;

use super::{error::HttpError, state::AppState};

/// Realm advertised in the `WWW-Authenticate` challenge.
pub const REALM: &str = "fsgate";

/// Reject any request whose Basic credentials do not match [`AppState::credentials`].
///
/// Denials are logged with the peer address when the server was started with
/// connect info; the credentials themselves are never logged.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let authorised = basic_credentials(req.headers())
        .map(|auth| state.credentials.matches(auth.username(), auth.password()))
        .unwrap_or(false);
    if authorised {
        return next.run(req).await;
    }

    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into());
    warn!(client_ip = %client_ip, path = %req.uri().path(), "unauthorized access attempt");

    HttpError(ServiceError::Unauthorized).into_response()
}

/// Decode an `Authorization: Basic ...` header.
///
/// `None` for a missing header, another scheme, bad base64, non-UTF-8
/// payloads, or a payload without `:`.
fn basic_credentials(headers: &HeaderMap) -> Option<Authorization<Basic>> {
    headers.typed_get::<Authorization<Basic>>()
}
