//! Type-variable substitution

use super::{TypeId, TypeInterner, TypeKind};

impl TypeInterner {
    /// Rebuild `target` with every occurrence of `variable` replaced by
    /// `replacement`.
    ///
    /// Parametric nodes are re-interned, so a type without `variable` comes
    /// back as the same handle.
    pub fn substitute(&mut self, variable: TypeId, replacement: TypeId, target: TypeId) -> TypeId {
        debug_assert!(self.kind(variable).is_variable(), "substituting for a non-variable type");

        match self.kind(target).clone() {
            TypeKind::Nil
            | TypeKind::Boolean
            | TypeKind::Character
            | TypeKind::Integer
            | TypeKind::Void => target,
            TypeKind::Pointer(pointee) => {
                let pointee = self.substitute(variable, replacement, pointee);
                self.pointer_type(pointee)
            }
            TypeKind::Slice(pointee) => {
                let pointee = self.substitute(variable, replacement, pointee);
                self.slice_type(pointee)
            }
            TypeKind::Array { size, element } => {
                let element = self.substitute(variable, replacement, element);
                self.array_type(size, element)
            }
            TypeKind::Tuple(elements) => {
                let elements = elements
                    .into_iter()
                    .map(|element| self.substitute(variable, replacement, element))
                    .collect();
                self.tuple_type(elements)
            }
            TypeKind::Function { result, params } => {
                let result = self.substitute(variable, replacement, result);
                let params = params
                    .into_iter()
                    .map(|param| self.substitute(variable, replacement, param))
                    .collect();
                self.function_type(result, params)
            }
            TypeKind::Variable(_) => {
                if self.equals(target, variable) {
                    replacement
                } else {
                    target
                }
            }
        }
    }
}

/// Ordered variable bindings collected while matching a generic pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: Vec<(TypeId, TypeId)>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// What `variable` has been matched against so far
    pub fn get(&self, variable: TypeId) -> Option<TypeId> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == variable)
            .map(|(_, ty)| *ty)
    }

    /// Record a binding, replacing any earlier one for the same variable
    pub fn bind(&mut self, variable: TypeId, ty: TypeId) {
        match self.bindings.iter_mut().find(|(bound, _)| *bound == variable) {
            Some(entry) => entry.1 = ty,
            None => self.bindings.push((variable, ty)),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, TypeId)> + '_ {
        self.bindings.iter().copied()
    }

    /// Substitute every binding into `target`, in the order they were recorded
    pub fn apply(&self, types: &mut TypeInterner, target: TypeId) -> TypeId {
        self.bindings.iter().fold(target, |ty, (variable, replacement)| {
            types.substitute(*variable, *replacement, ty)
        })
    }
}
