//! Semantic analysis error definitions
//!
//! Each variant carries the rendered types involved so the message can be
//! produced without access to the interners.

use thiserror::Error;
use tern_common::{CompilerError, ErrorKind, Location};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("'{name}' is not bound in this scope")]
    UnboundName { name: String, location: Location },

    #[error("'{name}' is already bound in this scope")]
    AlreadyBound { name: String, location: Location },

    #[error("cannot assign {found} to a target of type {expected}")]
    AssigneeMismatch { expected: String, found: String, location: Location },

    #[error("'{target}' cannot be assigned to")]
    NotAssignable { target: String, location: Location },

    #[error("no binary operator '{op}'")]
    UnknownBinop { op: String, location: Location },

    #[error("no unary operator '{op}'")]
    UnknownUnop { op: String, location: Location },

    #[error("operator '{op}' has no overload for {operands}")]
    OperandMismatch { op: String, operands: String, location: Location },

    #[error("argument {index} is {found}, expected {expected}")]
    ArgumentMismatch { index: usize, expected: String, found: String, location: Location },

    #[error("call expects {expected} arguments, found {found}")]
    ArgumentCount { expected: usize, found: usize, location: Location },

    #[error("{found} cannot be called")]
    NotCallable { found: String, location: Location },

    #[error("array element {index} is {found}, expected {expected}")]
    ArrayMemberMismatch { index: usize, expected: String, found: String, location: Location },

    #[error("conditional test is {found}, expected Boolean")]
    CondTestNotBoolean { found: String, location: Location },

    #[error("conditional arms differ: {first} and {second}")]
    CondArmsDiffer { first: String, second: String, location: Location },

    #[error("while test is {found}, expected Boolean")]
    WhileTestNotBoolean { found: String, location: Location },

    #[error("{found} is not a tuple")]
    DotLeftNotTuple { found: String, location: Location },

    #[error("tuple index '{index}' is not an integer literal")]
    DotRightNotInt { index: String, location: Location },

    #[error("index {index} is out of range for a tuple of {arity} elements")]
    DotIndexOutOfRange { index: i64, arity: usize, location: Location },

    #[error("{found} cannot be subscripted")]
    NotSubscriptable { found: String, location: Location },

    #[error("subscript is {found}, expected Integer")]
    SubscriptNotIndex { found: String, location: Location },

    #[error("cannot take the address of literal '{literal}'")]
    AddressOfLiteral { literal: String, location: Location },

    #[error("{found} cannot be dereferenced")]
    DereferenceNonPointer { found: String, location: Location },

    #[error("{detail}")]
    Substitution { kind: ErrorKind, detail: String, location: Location },
}

impl SemanticError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SemanticError::UnboundName { .. } => ErrorKind::NameNotBoundInScope,
            SemanticError::AlreadyBound { .. } => ErrorKind::NameAlreadyBoundInScope,
            SemanticError::AssigneeMismatch { .. } => ErrorKind::AssigneeTypeMismatch,
            SemanticError::NotAssignable { .. } => ErrorKind::ValueCannotBeAssigned,
            SemanticError::UnknownBinop { .. } => ErrorKind::UnknownBinop,
            SemanticError::UnknownUnop { .. } => ErrorKind::UnknownUnop,
            SemanticError::OperandMismatch { .. } | SemanticError::ArgumentMismatch { .. } => {
                ErrorKind::ArgTypeMismatch
            }
            SemanticError::ArgumentCount { .. } => ErrorKind::ArgNumMismatch,
            SemanticError::NotCallable { .. } => ErrorKind::TypeCannotBeCalled,
            SemanticError::ArrayMemberMismatch { .. } => ErrorKind::ArrayMemberTypeMismatch,
            SemanticError::CondTestNotBoolean { .. } => ErrorKind::CondTestExprTypeMismatch,
            SemanticError::CondArmsDiffer { .. } => ErrorKind::CondBodyExprTypeMismatch,
            SemanticError::WhileTestNotBoolean { .. } => ErrorKind::WhileTestTypeMismatch,
            SemanticError::DotLeftNotTuple { .. } => ErrorKind::DotLeftIsNotATuple,
            SemanticError::DotRightNotInt { .. } => ErrorKind::DotRightIsNotAnInt,
            SemanticError::DotIndexOutOfRange { .. } => ErrorKind::DotIndexOutOfRange,
            SemanticError::NotSubscriptable { .. } => ErrorKind::SubscriptLeftIsNotSubscriptable,
            SemanticError::SubscriptNotIndex { .. } => ErrorKind::SubscriptRightIsNotAnIndex,
            SemanticError::AddressOfLiteral { .. } => ErrorKind::CannotTakeAddressOfLiteral,
            SemanticError::DereferenceNonPointer { .. } => ErrorKind::CannotDereferenceNonPointer,
            SemanticError::Substitution { kind, .. } => *kind,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            SemanticError::UnboundName { location, .. }
            | SemanticError::AlreadyBound { location, .. }
            | SemanticError::AssigneeMismatch { location, .. }
            | SemanticError::NotAssignable { location, .. }
            | SemanticError::UnknownBinop { location, .. }
            | SemanticError::UnknownUnop { location, .. }
            | SemanticError::OperandMismatch { location, .. }
            | SemanticError::ArgumentMismatch { location, .. }
            | SemanticError::ArgumentCount { location, .. }
            | SemanticError::NotCallable { location, .. }
            | SemanticError::ArrayMemberMismatch { location, .. }
            | SemanticError::CondTestNotBoolean { location, .. }
            | SemanticError::CondArmsDiffer { location, .. }
            | SemanticError::WhileTestNotBoolean { location, .. }
            | SemanticError::DotLeftNotTuple { location, .. }
            | SemanticError::DotRightNotInt { location, .. }
            | SemanticError::DotIndexOutOfRange { location, .. }
            | SemanticError::NotSubscriptable { location, .. }
            | SemanticError::SubscriptNotIndex { location, .. }
            | SemanticError::AddressOfLiteral { location, .. }
            | SemanticError::DereferenceNonPointer { location, .. }
            | SemanticError::Substitution { location, .. } => *location,
        }
    }
}

impl From<SemanticError> for CompilerError {
    fn from(err: SemanticError) -> Self {
        CompilerError::new(err.kind(), err.location(), err.to_string())
    }
}
