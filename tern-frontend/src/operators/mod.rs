//! Operator overload tables
//!
//! The parser reads precedence and associativity from these tables while
//! building `Binop`/`Unop` nodes; the typechecker resolves each application
//! to one overload, whose codegen callback the backend supplied and gets
//! back unchanged.

pub mod binop;
pub mod builtins;
pub mod unop;

pub use binop::{BinopLiteral, BinopOverload, BinopTable};
pub use builtins::Intrinsic;
pub use unop::{UnopLiteral, UnopOverload, UnopTable};

use crate::types::{TypeId, TypeInterner};
use serde::{Deserialize, Serialize};
use tern_common::{ErrorKind, StringInterner, Symbol};

/// Precedence given to operators the parser meets before registration
pub const DEFAULT_PRECEDENCE: i32 = 3;
pub const DEFAULT_ASSOCIATIVITY: Associativity = Associativity::Left;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Associativity {
    Left,
    Right,
}

/// The overload selected for one operator application
#[derive(Debug, PartialEq)]
pub struct Resolved<'a, F> {
    pub result: TypeId,
    pub codegen: &'a F,
}

#[derive(Debug, Clone)]
pub struct OperatorTables<F> {
    pub binops: BinopTable<F>,
    pub unops: UnopTable<F>,
}

impl<F> OperatorTables<F> {
    /// Empty tables, with no operator registered
    pub fn new(strings: &mut StringInterner) -> Self {
        Self {
            binops: BinopTable::new(),
            unops: UnopTable::new(strings),
        }
    }

    pub fn resolve_binop(
        &self,
        op: Symbol,
        left: TypeId,
        right: TypeId,
    ) -> Result<Resolved<'_, F>, ErrorKind> {
        self.binops.resolve(op, left, right)
    }

    pub fn resolve_unop(
        &self,
        op: Symbol,
        argument: TypeId,
        types: &mut TypeInterner,
    ) -> Result<Resolved<'_, F>, ErrorKind> {
        self.unops.resolve(op, argument, types)
    }
}
