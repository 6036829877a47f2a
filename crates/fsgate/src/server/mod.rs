//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with the catch-all browse route and shared middleware.
//! - Gate every request behind HTTP Basic credentials.
//! - Inject shared application state (`AppState`) into handlers and middleware.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
