//! Common types, error taxonomy, and content rules shared across `fsgate` crates.

pub mod content;
pub mod error;

pub use content::Disposition;
pub use error::ServiceError;
