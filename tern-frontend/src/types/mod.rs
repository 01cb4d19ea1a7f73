//! Type system definitions for Tern
//!
//! Types are hash-consed by the [`TypeInterner`]: every structurally
//! distinct type exists exactly once per compilation, and the rest of the
//! front end refers to it through a copyable [`TypeId`].

pub mod equality;
pub mod interner;
pub mod substitute;

pub use equality::SubstitutionError;
pub use interner::TypeInterner;
pub use substitute::Substitution;

use serde::{Deserialize, Serialize};
use std::fmt;
use tern_common::{StringInterner, Symbol};

/// Handle to a canonical type owned by a [`TypeInterner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(index: usize) -> Self {
        TypeId(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Tern type system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Nil,
    Boolean,
    Character,
    Integer,
    Void,

    /// Pointer to a single value
    Pointer(TypeId),

    /// Pointer to a run of values of unknown length
    Slice(TypeId),

    /// Fixed-size array
    Array { size: usize, element: TypeId },

    Tuple(Vec<TypeId>),

    Function { result: TypeId, params: Vec<TypeId> },

    /// Generic placeholder, matched by polymorphic equality
    Variable(Symbol),
}

impl TypeKind {
    /// Zero-arity types contain no other type and no variable
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            TypeKind::Nil
                | TypeKind::Boolean
                | TypeKind::Character
                | TypeKind::Integer
                | TypeKind::Void
        )
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, TypeKind::Variable(_))
    }

    /// Element type reachable by dereference or subscript
    pub fn pointee(&self) -> Option<TypeId> {
        match self {
            TypeKind::Pointer(pointee) | TypeKind::Slice(pointee) => Some(*pointee),
            _ => None,
        }
    }
}

/// Display adapter: renders a type with its variable names resolved
pub struct TypeDisplay<'a> {
    types: &'a TypeInterner,
    strings: &'a StringInterner,
    ty: TypeId,
}

impl<'a> TypeDisplay<'a> {
    pub fn new(types: &'a TypeInterner, strings: &'a StringInterner, ty: TypeId) -> Self {
        Self { types, strings, ty }
    }

    fn child(&self, ty: TypeId) -> TypeDisplay<'a> {
        TypeDisplay::new(self.types, self.strings, ty)
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.types.kind(self.ty) {
            TypeKind::Nil => write!(f, "Nil"),
            TypeKind::Boolean => write!(f, "Boolean"),
            TypeKind::Character => write!(f, "Character"),
            TypeKind::Integer => write!(f, "Integer"),
            TypeKind::Void => write!(f, "Void"),
            TypeKind::Pointer(pointee) => write!(f, "*{}", self.child(*pointee)),
            TypeKind::Slice(pointee) => write!(f, "*[]{}", self.child(*pointee)),
            TypeKind::Array { size, element } => write!(f, "[{}; {}]", self.child(*element), size),
            TypeKind::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", self.child(*element))?;
                }
                write!(f, ")")
            }
            TypeKind::Function { result, params } => {
                write!(f, "fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", self.child(*param))?;
                }
                write!(f, ") -> {}", self.child(*result))
            }
            TypeKind::Variable(name) => write!(f, "'{}", self.strings.resolve(*name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        let mut strings = StringInterner::new();
        let mut types = TypeInterner::new();

        let int = types.integer_type();
        let boolean = types.boolean_type();
        let ptr = types.pointer_type(int);
        let array = types.array_type(10, boolean);
        let tuple = types.tuple_type(vec![int, ptr]);
        let t = types.variable_type(strings.intern("T"));
        let func = types.function_type(t, vec![array, t]);

        assert_eq!(TypeDisplay::new(&types, &strings, int).to_string(), "Integer");
        assert_eq!(TypeDisplay::new(&types, &strings, ptr).to_string(), "*Integer");
        assert_eq!(TypeDisplay::new(&types, &strings, array).to_string(), "[Boolean; 10]");
        assert_eq!(TypeDisplay::new(&types, &strings, tuple).to_string(), "(Integer, *Integer)");
        assert_eq!(
            TypeDisplay::new(&types, &strings, func).to_string(),
            "fn([Boolean; 10], 'T) -> 'T"
        );
    }

    #[test]
    fn test_type_properties() {
        assert!(TypeKind::Integer.is_leaf());
        assert!(!TypeKind::Tuple(vec![]).is_leaf());
        assert_eq!(TypeKind::Slice(TypeId::new(3)).pointee(), Some(TypeId::new(3)));
        assert_eq!(TypeKind::Integer.pointee(), None);
    }
}
