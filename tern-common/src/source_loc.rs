//! Source location tracking for error reporting
//!
//! Every AST node carries a `Location` describing the text it was built
//! from, which is what semantic errors point back at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A region of source text (lines and columns are 1-based, inclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub first_line: u32,
    pub first_column: u32,
    pub last_line: u32,
    pub last_column: u32,
}

impl Location {
    pub fn new(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Self {
        Self {
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }

    /// Create a location covering a single character
    pub fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::default()
    }

    /// Extend this location to include another location
    pub fn extend(&self, other: &Location) -> Location {
        let (first_line, first_column) = if (self.first_line, self.first_column)
            <= (other.first_line, other.first_column)
        {
            (self.first_line, self.first_column)
        } else {
            (other.first_line, other.first_column)
        };

        let (last_line, last_column) = if (self.last_line, self.last_column)
            >= (other.last_line, other.last_column)
        {
            (self.last_line, self.last_column)
        } else {
            (other.last_line, other.last_column)
        };

        Location::new(first_line, first_column, last_line, last_column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_line == self.last_line {
            if self.first_column == self.last_column {
                write!(f, "{}:{}", self.first_line, self.first_column)
            } else {
                write!(f, "{}:{}-{}", self.first_line, self.first_column, self.last_column)
            }
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.first_line, self.first_column, self.last_line, self.last_column
            )
        }
    }
}
