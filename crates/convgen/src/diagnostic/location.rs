//! Source location tracking for directive blocks.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Where a block of directive lines was declared.
///
/// Global lines passed on the command line have no line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: Option<usize>,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: Option<usize>) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// A location that only names its origin (e.g. `<command line>`).
    pub fn origin(name: impl Into<PathBuf>) -> Self {
        Self::new(name, None)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file.display(), line),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let location = Location::new("orders.go", Some(12));
        assert_eq!(location.to_string(), "orders.go:12");
    }

    #[test]
    fn test_display_origin_only() {
        assert_eq!(Location::origin("<command line>").to_string(), "<command line>");
    }
}
