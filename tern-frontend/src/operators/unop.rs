//! Unary operator table

use super::{Associativity, Resolved, DEFAULT_ASSOCIATIVITY, DEFAULT_PRECEDENCE};
use crate::types::{TypeId, TypeInterner, TypeKind};
use log::{debug, trace, warn};
use std::collections::HashMap;
use tern_common::{ErrorKind, StringInterner, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub struct UnopOverload<F> {
    pub result: TypeId,
    pub codegen: F,
}

#[derive(Debug, Clone)]
pub struct UnopLiteral<F> {
    pub precedence: i32,
    pub associativity: Associativity,
    overloads: HashMap<TypeId, UnopOverload<F>>,
}

impl<F> UnopLiteral<F> {
    fn new(precedence: i32, associativity: Associativity) -> Self {
        Self {
            precedence,
            associativity,
            overloads: HashMap::new(),
        }
    }

    pub fn lookup(&self, argument: TypeId) -> Option<&UnopOverload<F>> {
        self.overloads.get(&argument)
    }

    pub fn insert(&mut self, argument: TypeId, result: TypeId, codegen: F) {
        self.overloads.insert(argument, UnopOverload { result, codegen });
    }

    pub fn len(&self) -> usize {
        self.overloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }
}

/// Unary operators, with the dereference and address-of tokens remembered
/// so their overloads can be derived for every pointee type
#[derive(Debug, Clone)]
pub struct UnopTable<F> {
    literals: HashMap<Symbol, UnopLiteral<F>>,
    dereference: Symbol,
    address_of: Symbol,
}

impl<F> UnopTable<F> {
    pub fn new(strings: &mut StringInterner) -> Self {
        Self {
            literals: HashMap::new(),
            dereference: strings.intern("*"),
            address_of: strings.intern("&"),
        }
    }

    pub fn register(
        &mut self,
        op: Symbol,
        precedence: i32,
        associativity: Associativity,
    ) -> &mut UnopLiteral<F> {
        self.literals.entry(op).or_insert_with(|| {
            debug!("registering unop {} (precedence {}, {:?})", op, precedence, associativity);
            UnopLiteral::new(precedence, associativity)
        })
    }

    pub fn register_overload(
        &mut self,
        op: Symbol,
        precedence: i32,
        associativity: Associativity,
        argument: TypeId,
        result: TypeId,
        codegen: F,
    ) -> &mut UnopLiteral<F> {
        let literal = self.register(op, precedence, associativity);
        literal.insert(argument, result, codegen);
        literal
    }

    pub fn lookup(&mut self, op: Symbol) -> &UnopLiteral<F> {
        if !self.literals.contains_key(&op) {
            warn!("unop {} has no registration; using defaults", op);
        }
        self.register(op, DEFAULT_PRECEDENCE, DEFAULT_ASSOCIATIVITY)
    }

    pub fn get(&self, op: Symbol) -> Option<&UnopLiteral<F>> {
        self.literals.get(&op)
    }

    pub fn contains(&self, op: Symbol) -> bool {
        self.literals.contains_key(&op)
    }

    /// Select the overload of `op` for `argument`.
    ///
    /// Dereference of any `Pointer<T>` reuses the `Pointer<Integer>`
    /// implementation with result `T`; address-of any `T` reuses the
    /// `Integer` implementation with result `Pointer<T>`.
    pub fn resolve(
        &self,
        op: Symbol,
        argument: TypeId,
        types: &mut TypeInterner,
    ) -> Result<Resolved<'_, F>, ErrorKind> {
        let literal = match self.get(op) {
            Some(literal) if !literal.is_empty() => literal,
            _ => return Err(ErrorKind::UnknownUnop),
        };

        if let Some(overload) = literal.lookup(argument) {
            return Ok(Resolved {
                result: overload.result,
                codegen: &overload.codegen,
            });
        }

        if op == self.dereference {
            let pointee = match types.kind(argument) {
                TypeKind::Pointer(pointee) => Some(*pointee),
                _ => None,
            };
            if let Some(pointee) = pointee {
                let canonical = types.pointer_type(types.integer_type());
                if let Some(overload) = literal.lookup(canonical) {
                    trace!("deriving dereference overload for pointee #{}", pointee.index());
                    return Ok(Resolved {
                        result: pointee,
                        codegen: &overload.codegen,
                    });
                }
            }
        } else if op == self.address_of {
            if let Some(overload) = literal.lookup(types.integer_type()) {
                trace!("deriving address-of overload for #{}", argument.index());
                return Ok(Resolved {
                    result: types.pointer_type(argument),
                    codegen: &overload.codegen,
                });
            }
        }

        Err(ErrorKind::ArgTypeMismatch)
    }

    pub fn is_address_of(&self, op: Symbol) -> bool {
        op == self.address_of
    }

    pub fn is_dereference(&self, op: Symbol) -> bool {
        op == self.dereference
    }
}
