//! Axum router construction.

use axum::{middleware, routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::{handlers, middleware::require_basic_auth, state::AppState};

/// Build the application [`Router`] with the browse routes and middleware attached.
///
/// Layer order (outermost first): compression, tracing, auth gate.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::browse))
        .route("/*path", get(handlers::browse))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
