//! Binary operator table

use super::{Associativity, Resolved, DEFAULT_ASSOCIATIVITY, DEFAULT_PRECEDENCE};
use crate::types::TypeId;
use log::{debug, warn};
use std::collections::HashMap;
use tern_common::{ErrorKind, Symbol};

/// One implementation of a binary operator for a pair of operand types
#[derive(Debug, Clone, PartialEq)]
pub struct BinopOverload<F> {
    pub result: TypeId,
    pub codegen: F,
}

/// Everything known about one binary operator token
#[derive(Debug, Clone)]
pub struct BinopLiteral<F> {
    pub precedence: i32,
    pub associativity: Associativity,
    overloads: HashMap<(TypeId, TypeId), BinopOverload<F>>,
}

impl<F> BinopLiteral<F> {
    fn new(precedence: i32, associativity: Associativity) -> Self {
        Self {
            precedence,
            associativity,
            overloads: HashMap::new(),
        }
    }

    /// Exact-match overload lookup
    pub fn lookup(&self, left: TypeId, right: TypeId) -> Option<&BinopOverload<F>> {
        self.overloads.get(&(left, right))
    }

    pub fn insert(&mut self, left: TypeId, right: TypeId, result: TypeId, codegen: F) {
        self.overloads.insert((left, right), BinopOverload { result, codegen });
    }

    pub fn len(&self) -> usize {
        self.overloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BinopTable<F> {
    literals: HashMap<Symbol, BinopLiteral<F>>,
}

impl<F> BinopTable<F> {
    pub fn new() -> Self {
        Self {
            literals: HashMap::new(),
        }
    }

    /// Register `op` if it is not yet known. An existing entry, overloads
    /// included, is returned untouched.
    pub fn register(
        &mut self,
        op: Symbol,
        precedence: i32,
        associativity: Associativity,
    ) -> &mut BinopLiteral<F> {
        self.literals.entry(op).or_insert_with(|| {
            debug!("registering binop {} (precedence {}, {:?})", op, precedence, associativity);
            BinopLiteral::new(precedence, associativity)
        })
    }

    /// Register `op`, then add or replace its overload for `(left, right)`
    #[allow(clippy::too_many_arguments)]
    pub fn register_overload(
        &mut self,
        op: Symbol,
        precedence: i32,
        associativity: Associativity,
        left: TypeId,
        right: TypeId,
        result: TypeId,
        codegen: F,
    ) -> &mut BinopLiteral<F> {
        let literal = self.register(op, precedence, associativity);
        literal.insert(left, right, result, codegen);
        literal
    }

    /// Parser-side lookup: an unknown operator is registered with default
    /// precedence so parsing can continue, and fails later in typechecking.
    pub fn lookup(&mut self, op: Symbol) -> &BinopLiteral<F> {
        if !self.literals.contains_key(&op) {
            warn!("binop {} has no registration; using defaults", op);
        }
        self.register(op, DEFAULT_PRECEDENCE, DEFAULT_ASSOCIATIVITY)
    }

    pub fn get(&self, op: Symbol) -> Option<&BinopLiteral<F>> {
        self.literals.get(&op)
    }

    pub fn contains(&self, op: Symbol) -> bool {
        self.literals.contains_key(&op)
    }

    /// Select the overload of `op` for the operand types
    pub fn resolve(
        &self,
        op: Symbol,
        left: TypeId,
        right: TypeId,
    ) -> Result<Resolved<'_, F>, ErrorKind> {
        let literal = match self.get(op) {
            Some(literal) if !literal.is_empty() => literal,
            _ => return Err(ErrorKind::UnknownBinop),
        };

        literal
            .lookup(left, right)
            .map(|overload| Resolved {
                result: overload.result,
                codegen: &overload.codegen,
            })
            .ok_or(ErrorKind::ArgTypeMismatch)
    }
}

impl<F> Default for BinopTable<F> {
    fn default() -> Self {
        Self::new()
    }
}
