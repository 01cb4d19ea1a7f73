//! Tern - Common Types and Utilities
//!
//! This crate contains shared types, error definitions, and utilities
//! used across all components of the Tern front end.

pub mod error;
pub mod symbols;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorKind};
pub use symbols::{StringInterner, Symbol};
pub use source_loc::Location;
