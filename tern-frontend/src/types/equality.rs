//! Structural and polymorphic type equality
//!
//! `equals` is the exact comparison used by typechecking rules.
//! `poly_equals` lets a type variable in the pattern stand for any
//! concrete type in the same position, which is what generic function
//! application needs.

use super::{Substitution, TypeDisplay, TypeId, TypeInterner, TypeKind};
use tern_common::{ErrorKind, StringInterner};
use thiserror::Error;

/// Why a pattern type failed to match a concrete type
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionError {
    #[error("cannot substitute a variable for a variable")]
    VariableForVariable { variable: TypeId, other: TypeId },

    #[error("type variable is already bound to a different type")]
    ConflictingBinding { variable: TypeId, bound: TypeId, found: TypeId },

    #[error("array sizes differ")]
    ArraySizeMismatch { pattern: TypeId, concrete: TypeId },

    #[error("tuple sizes differ")]
    TupleSizeMismatch { pattern: TypeId, concrete: TypeId },

    #[error("tuple element {index} does not match")]
    TupleElementMismatch { index: usize, pattern: TypeId, concrete: TypeId },

    #[error("function arities differ")]
    ArityMismatch { pattern: TypeId, concrete: TypeId },

    #[error("types do not match")]
    Mismatch { pattern: TypeId, concrete: TypeId },
}

impl SubstitutionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubstitutionError::VariableForVariable { .. }
            | SubstitutionError::ConflictingBinding { .. }
            | SubstitutionError::Mismatch { .. } => ErrorKind::TypeSubstitutionInvalid,
            SubstitutionError::ArraySizeMismatch { .. } => ErrorKind::ArraySizeMismatch,
            SubstitutionError::TupleSizeMismatch { .. } => ErrorKind::TupleSizeMismatch,
            SubstitutionError::TupleElementMismatch { .. } => ErrorKind::TupleElementMismatch,
            SubstitutionError::ArityMismatch { .. } => ErrorKind::ArgNumMismatch,
        }
    }

    /// Human-readable detail naming the two incompatible types
    pub fn describe(&self, types: &TypeInterner, strings: &StringInterner) -> String {
        let show = |ty: TypeId| TypeDisplay::new(types, strings, ty).to_string();
        match *self {
            SubstitutionError::VariableForVariable { variable, other } => format!(
                "cannot substitute variable {} for variable {}",
                show(other),
                show(variable)
            ),
            SubstitutionError::ConflictingBinding { variable, bound, found } => format!(
                "{} is already {}, cannot also be {}",
                show(variable),
                show(bound),
                show(found)
            ),
            SubstitutionError::ArraySizeMismatch { pattern, concrete } => {
                format!("array size of {} differs from {}", show(concrete), show(pattern))
            }
            SubstitutionError::TupleSizeMismatch { pattern, concrete } => {
                format!("tuple {} has a different size than {}", show(concrete), show(pattern))
            }
            SubstitutionError::TupleElementMismatch { index, pattern, concrete } => format!(
                "tuple element {} is {}, expected {}",
                index,
                show(concrete),
                show(pattern)
            ),
            SubstitutionError::ArityMismatch { pattern, concrete } => format!(
                "function {} takes a different number of parameters than {}",
                show(concrete),
                show(pattern)
            ),
            SubstitutionError::Mismatch { pattern, concrete } => {
                format!("{} does not match {}", show(concrete), show(pattern))
            }
        }
    }
}

impl TypeInterner {
    /// Exact structural equality
    pub fn equals(&self, a: TypeId, b: TypeId) -> bool {
        let result = self.structurally_equal(a, b);
        debug_assert_eq!(result, a == b, "interned types must be canonical");
        result
    }

    fn structurally_equal(&self, a: TypeId, b: TypeId) -> bool {
        match (self.kind(a), self.kind(b)) {
            (TypeKind::Nil, TypeKind::Nil)
            | (TypeKind::Boolean, TypeKind::Boolean)
            | (TypeKind::Character, TypeKind::Character)
            | (TypeKind::Integer, TypeKind::Integer)
            | (TypeKind::Void, TypeKind::Void) => true,
            (TypeKind::Pointer(x), TypeKind::Pointer(y))
            | (TypeKind::Slice(x), TypeKind::Slice(y)) => self.structurally_equal(*x, *y),
            (
                TypeKind::Array { size: size_a, element: element_a },
                TypeKind::Array { size: size_b, element: element_b },
            ) => size_a == size_b && self.structurally_equal(*element_a, *element_b),
            (TypeKind::Tuple(xs), TypeKind::Tuple(ys)) => {
                xs.len() == ys.len()
                    && xs.iter().zip(ys).all(|(x, y)| self.structurally_equal(*x, *y))
            }
            (
                TypeKind::Function { result: result_a, params: params_a },
                TypeKind::Function { result: result_b, params: params_b },
            ) => {
                params_a.len() == params_b.len()
                    && self.structurally_equal(*result_a, *result_b)
                    && params_a
                        .iter()
                        .zip(params_b)
                        .all(|(x, y)| self.structurally_equal(*x, *y))
            }
            (TypeKind::Variable(x), TypeKind::Variable(y)) => x == y,
            _ => false,
        }
    }

    /// Structural equality where variables in `pattern` match any type
    pub fn poly_equals(&self, pattern: TypeId, concrete: TypeId) -> Result<(), SubstitutionError> {
        let mut bindings = Substitution::new();
        self.poly_match(pattern, concrete, &mut bindings)
    }

    /// The walk behind `poly_equals`, recording what each variable matched
    pub fn poly_match(
        &self,
        pattern: TypeId,
        concrete: TypeId,
        bindings: &mut Substitution,
    ) -> Result<(), SubstitutionError> {
        match (self.kind(pattern), self.kind(concrete)) {
            // A variable matched against itself binds to itself
            (TypeKind::Variable(_), TypeKind::Variable(_)) if pattern != concrete => {
                Err(SubstitutionError::VariableForVariable { variable: pattern, other: concrete })
            }
            (TypeKind::Variable(_), _) => match bindings.get(pattern) {
                Some(bound) if !self.equals(bound, concrete) => {
                    Err(SubstitutionError::ConflictingBinding {
                        variable: pattern,
                        bound,
                        found: concrete,
                    })
                }
                Some(_) => Ok(()),
                None => {
                    bindings.bind(pattern, concrete);
                    Ok(())
                }
            },
            (p, c) if p.is_leaf() => {
                if p == c {
                    Ok(())
                } else {
                    Err(SubstitutionError::Mismatch { pattern, concrete })
                }
            }
            (TypeKind::Pointer(p), TypeKind::Pointer(c))
            | (TypeKind::Slice(p), TypeKind::Slice(c)) => self.poly_match(*p, *c, bindings),
            (
                TypeKind::Array { size: pattern_size, element: pattern_element },
                TypeKind::Array { size: concrete_size, element: concrete_element },
            ) => {
                if pattern_size != concrete_size {
                    return Err(SubstitutionError::ArraySizeMismatch { pattern, concrete });
                }
                self.poly_match(*pattern_element, *concrete_element, bindings)
            }
            (TypeKind::Tuple(ps), TypeKind::Tuple(cs)) => {
                if ps.len() != cs.len() {
                    return Err(SubstitutionError::TupleSizeMismatch { pattern, concrete });
                }
                for (index, (p, c)) in ps.iter().zip(cs).enumerate() {
                    match self.poly_match(*p, *c, bindings) {
                        Err(SubstitutionError::Mismatch { .. }) => {
                            return Err(SubstitutionError::TupleElementMismatch {
                                index,
                                pattern: *p,
                                concrete: *c,
                            });
                        }
                        other => other?,
                    }
                }
                Ok(())
            }
            (
                TypeKind::Function { result: pattern_result, params: pattern_params },
                TypeKind::Function { result: concrete_result, params: concrete_params },
            ) => {
                if pattern_params.len() != concrete_params.len() {
                    return Err(SubstitutionError::ArityMismatch { pattern, concrete });
                }
                self.poly_match(*pattern_result, *concrete_result, bindings)?;
                for (p, c) in pattern_params.iter().zip(concrete_params) {
                    self.poly_match(*p, *c, bindings)?;
                }
                Ok(())
            }
            _ => Err(SubstitutionError::Mismatch { pattern, concrete }),
        }
    }
}
