//! The built-in operator set
//!
//! Every built-in overload is tagged with an [`Intrinsic`]. A backend maps
//! the tags to its own callback type when the tables are built.

use super::{Associativity, OperatorTables};
use crate::types::TypeInterner;
use log::debug;
use serde::{Deserialize, Serialize};
use tern_common::StringInterner;

/// Machine operation behind a built-in overload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intrinsic {
    IntAdd,
    IntSub,
    IntMul,
    IntDiv,
    IntMod,
    IntEq,
    IntNe,
    IntLt,
    IntLe,
    IntGt,
    IntGe,
    BoolEq,
    BoolNe,
    BoolAnd,
    BoolOr,
    IntNeg,
    BoolNot,
    Load,
    AddressOf,
}

const UNARY_PRECEDENCE: i32 = 7;

impl<F> OperatorTables<F> {
    /// Tables holding every built-in operator, with callbacks produced by `map`
    pub fn with_builtins(
        strings: &mut StringInterner,
        types: &mut TypeInterner,
        map: impl Fn(Intrinsic) -> F,
    ) -> Self {
        let mut tables = Self::new(strings);
        tables.register_builtins(strings, types, map);
        tables
    }

    pub fn register_builtins(
        &mut self,
        strings: &mut StringInterner,
        types: &mut TypeInterner,
        map: impl Fn(Intrinsic) -> F,
    ) {
        let int = types.integer_type();
        let boolean = types.boolean_type();
        let ptr_int = types.pointer_type(int);

        let binops: [(&str, i32, _, _, _, Intrinsic); 15] = [
            ("||", 1, boolean, boolean, boolean, Intrinsic::BoolOr),
            ("&&", 2, boolean, boolean, boolean, Intrinsic::BoolAnd),
            ("==", 3, int, int, boolean, Intrinsic::IntEq),
            ("==", 3, boolean, boolean, boolean, Intrinsic::BoolEq),
            ("!=", 3, int, int, boolean, Intrinsic::IntNe),
            ("!=", 3, boolean, boolean, boolean, Intrinsic::BoolNe),
            ("<", 4, int, int, boolean, Intrinsic::IntLt),
            ("<=", 4, int, int, boolean, Intrinsic::IntLe),
            (">", 4, int, int, boolean, Intrinsic::IntGt),
            (">=", 4, int, int, boolean, Intrinsic::IntGe),
            ("+", 5, int, int, int, Intrinsic::IntAdd),
            ("-", 5, int, int, int, Intrinsic::IntSub),
            ("*", 6, int, int, int, Intrinsic::IntMul),
            ("/", 6, int, int, int, Intrinsic::IntDiv),
            ("%", 6, int, int, int, Intrinsic::IntMod),
        ];

        for (token, precedence, left, right, result, intrinsic) in binops {
            let op = strings.intern(token);
            self.binops.register_overload(
                op,
                precedence,
                Associativity::Left,
                left,
                right,
                result,
                map(intrinsic),
            );
        }

        let unops = [
            ("-", int, int, Intrinsic::IntNeg),
            ("!", boolean, boolean, Intrinsic::BoolNot),
            ("*", ptr_int, int, Intrinsic::Load),
            ("&", int, ptr_int, Intrinsic::AddressOf),
        ];

        for (token, argument, result, intrinsic) in unops {
            let op = strings.intern(token);
            self.unops.register_overload(
                op,
                UNARY_PRECEDENCE,
                Associativity::Right,
                argument,
                result,
                map(intrinsic),
            );
        }

        debug!("registered {} built-in operator overloads", binops.len() + unops.len());
    }
}

impl OperatorTables<Intrinsic> {
    /// Built-in tables tagged with the intrinsics themselves
    pub fn builtin(strings: &mut StringInterner, types: &mut TypeInterner) -> Self {
        Self::with_builtins(strings, types, |intrinsic| intrinsic)
    }
}
