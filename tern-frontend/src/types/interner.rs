//! Hash-consing type interner
//!
//! The interner owns every type of one compilation. Requesting a type
//! builds a candidate `TypeKind`, looks it up by content, and returns the
//! existing handle or inserts the candidate.

use super::{TypeDisplay, TypeId, TypeKind};
use log::trace;
use std::collections::HashMap;
use tern_common::{StringInterner, Symbol};

#[derive(Debug, Clone)]
pub struct TypeInterner {
    types: Vec<TypeKind>,
    lookup: HashMap<TypeKind, TypeId>,
    nil: TypeId,
    boolean: TypeId,
    character: TypeId,
    integer: TypeId,
    void: TypeId,
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = Self {
            types: Vec::new(),
            lookup: HashMap::new(),
            nil: TypeId::new(0),
            boolean: TypeId::new(0),
            character: TypeId::new(0),
            integer: TypeId::new(0),
            void: TypeId::new(0),
        };

        interner.nil = interner.intern(TypeKind::Nil);
        interner.boolean = interner.intern(TypeKind::Boolean);
        interner.character = interner.intern(TypeKind::Character);
        interner.integer = interner.intern(TypeKind::Integer);
        interner.void = interner.intern(TypeKind::Void);
        interner
    }

    fn intern(&mut self, candidate: TypeKind) -> TypeId {
        if let Some(&existing) = self.lookup.get(&candidate) {
            return existing;
        }

        let id = TypeId::new(self.types.len());
        trace!("interning type #{}: {:?}", id.index(), candidate);
        self.types.push(candidate.clone());
        self.lookup.insert(candidate, id);
        id
    }

    /// The structure behind a handle
    pub fn kind(&self, ty: TypeId) -> &TypeKind {
        &self.types[ty.index()]
    }

    /// Number of distinct types interned so far
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn nil_type(&self) -> TypeId {
        self.nil
    }

    pub fn boolean_type(&self) -> TypeId {
        self.boolean
    }

    pub fn character_type(&self) -> TypeId {
        self.character
    }

    pub fn integer_type(&self) -> TypeId {
        self.integer
    }

    pub fn void_type(&self) -> TypeId {
        self.void
    }

    pub fn pointer_type(&mut self, pointee: TypeId) -> TypeId {
        self.intern(TypeKind::Pointer(pointee))
    }

    pub fn slice_type(&mut self, pointee: TypeId) -> TypeId {
        self.intern(TypeKind::Slice(pointee))
    }

    pub fn array_type(&mut self, size: usize, element: TypeId) -> TypeId {
        self.intern(TypeKind::Array { size, element })
    }

    pub fn tuple_type(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Tuple(elements))
    }

    pub fn function_type(&mut self, result: TypeId, params: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Function { result, params })
    }

    pub fn variable_type(&mut self, name: Symbol) -> TypeId {
        self.intern(TypeKind::Variable(name))
    }

    /// Whether any `Variable` occurs inside `ty`
    pub fn contains_variables(&self, ty: TypeId) -> bool {
        match self.kind(ty) {
            TypeKind::Nil
            | TypeKind::Boolean
            | TypeKind::Character
            | TypeKind::Integer
            | TypeKind::Void => false,
            TypeKind::Pointer(pointee) | TypeKind::Slice(pointee) => {
                self.contains_variables(*pointee)
            }
            TypeKind::Array { element, .. } => self.contains_variables(*element),
            TypeKind::Tuple(elements) => elements.iter().any(|e| self.contains_variables(*e)),
            TypeKind::Function { result, params } => {
                self.contains_variables(*result)
                    || params.iter().any(|p| self.contains_variables(*p))
            }
            TypeKind::Variable(_) => true,
        }
    }

    pub fn display<'a>(&'a self, strings: &'a StringInterner, ty: TypeId) -> TypeDisplay<'a> {
        TypeDisplay::new(self, strings, ty)
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
