//! Error handling for the Tern front end
//!
//! This module defines the error taxonomy shared by every semantic
//! component and the diagnostic used to report a failed compilation.

use crate::source_loc::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Every user-facing failure the semantic pass can produce
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    // Name resolution
    #[error("name not bound in scope")]
    NameNotBoundInScope,
    #[error("name already bound in scope")]
    NameAlreadyBoundInScope,

    // Type mismatch
    #[error("assignee type mismatch")]
    AssigneeTypeMismatch,
    #[error("argument type mismatch")]
    ArgTypeMismatch,
    #[error("array member type mismatch")]
    ArrayMemberTypeMismatch,
    #[error("conditional arms have different types")]
    CondBodyExprTypeMismatch,
    #[error("conditional test is not a boolean")]
    CondTestExprTypeMismatch,
    #[error("while test is not a boolean")]
    WhileTestTypeMismatch,

    // Operator resolution
    #[error("unknown binary operator")]
    UnknownBinop,
    #[error("unknown unary operator")]
    UnknownUnop,

    // Structural access
    #[error("left of dot is not a tuple")]
    DotLeftIsNotATuple,
    #[error("right of dot is not an integer literal")]
    DotRightIsNotAnInt,
    #[error("dot index out of range")]
    DotIndexOutOfRange,
    #[error("subscripted value is not an array or slice")]
    SubscriptLeftIsNotSubscriptable,
    #[error("subscript is not an integer")]
    SubscriptRightIsNotAnIndex,

    // Call shape
    #[error("type cannot be called")]
    TypeCannotBeCalled,
    #[error("argument count mismatch")]
    ArgNumMismatch,

    // Reference/value
    #[error("cannot take the address of a literal")]
    CannotTakeAddressOfLiteral,
    #[error("cannot dereference a non-pointer")]
    CannotDereferenceNonPointer,
    #[error("value cannot be assigned")]
    ValueCannotBeAssigned,

    // Type substitution
    #[error("invalid type substitution")]
    TypeSubstitutionInvalid,
    #[error("array size mismatch")]
    ArraySizeMismatch,
    #[error("tuple size mismatch")]
    TupleSizeMismatch,
    #[error("tuple element mismatch")]
    TupleElementMismatch,
}

impl ErrorKind {
    /// The taxonomy group this kind belongs to
    pub fn category(&self) -> &'static str {
        match self {
            ErrorKind::NameNotBoundInScope | ErrorKind::NameAlreadyBoundInScope => {
                "name resolution"
            }
            ErrorKind::AssigneeTypeMismatch
            | ErrorKind::ArgTypeMismatch
            | ErrorKind::ArrayMemberTypeMismatch
            | ErrorKind::CondBodyExprTypeMismatch
            | ErrorKind::CondTestExprTypeMismatch
            | ErrorKind::WhileTestTypeMismatch => "type mismatch",
            ErrorKind::UnknownBinop | ErrorKind::UnknownUnop => "operator resolution",
            ErrorKind::DotLeftIsNotATuple
            | ErrorKind::DotRightIsNotAnInt
            | ErrorKind::DotIndexOutOfRange
            | ErrorKind::SubscriptLeftIsNotSubscriptable
            | ErrorKind::SubscriptRightIsNotAnIndex => "structural access",
            ErrorKind::TypeCannotBeCalled | ErrorKind::ArgNumMismatch => "call shape",
            ErrorKind::CannotTakeAddressOfLiteral
            | ErrorKind::CannotDereferenceNonPointer
            | ErrorKind::ValueCannotBeAssigned => "reference/value",
            ErrorKind::TypeSubstitutionInvalid
            | ErrorKind::ArraySizeMismatch
            | ErrorKind::TupleSizeMismatch
            | ErrorKind::TupleElementMismatch => "type substitution",
        }
    }
}

/// A semantic error: what went wrong, where, and a human-readable detail
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} at {location}: {detail}")]
pub struct CompilerError {
    pub kind: ErrorKind,
    pub location: Location,
    pub detail: String,
}

impl CompilerError {
    pub fn new(kind: ErrorKind, location: Location, detail: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

/// A rendered report of one failed compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub filename: String,
    pub error: CompilerError,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(filename: impl Into<String>, error: CompilerError) -> Self {
        Self {
            filename: filename.into(),
            error,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: error[{:?}]: {}: {}",
            self.filename, self.error.location, self.error.kind, self.error.kind, self.error.detail
        )?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}
