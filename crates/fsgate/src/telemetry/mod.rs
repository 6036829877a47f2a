//! Tracing setup: structured JSON logs, optionally with OTLP span export.
//!
//! # Telemetry invariants
//!
//! - **No credentials** may appear in any span attribute or log field. Denied
//!   requests are logged by client address only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_telemetry;
