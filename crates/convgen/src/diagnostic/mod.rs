//! Diagnostic types for error reporting.

mod error;
mod location;

pub use error::{ConfigError, ErrorKind};
pub use location::Location;
