//! Source-like rendering of trees, used in error details

use super::{Ast, AstKind};
use crate::types::{TypeDisplay, TypeInterner};
use std::fmt;
use tern_common::StringInterner;

pub struct AstDisplay<'a> {
    ast: &'a Ast,
    strings: &'a StringInterner,
    types: &'a TypeInterner,
}

impl<'a> AstDisplay<'a> {
    pub fn new(ast: &'a Ast, strings: &'a StringInterner, types: &'a TypeInterner) -> Self {
        Self { ast, strings, types }
    }

    fn child<'b>(&'b self, ast: &'b Ast) -> AstDisplay<'b> {
        AstDisplay::new(ast, self.strings, self.types)
    }

    fn list(&self, f: &mut fmt::Formatter<'_>, nodes: &[Ast]) -> fmt::Result {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.child(node))?;
        }
        Ok(())
    }
}

impl fmt::Display for AstDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ast.kind {
            AstKind::Nil => write!(f, "nil"),
            AstKind::Boolean(value) => write!(f, "{}", value),
            AstKind::Integer(value) => write!(f, "{}", value),
            AstKind::Variable { symbol, .. } => write!(f, "{}", self.strings.resolve(*symbol)),
            AstKind::Bind { symbol, affix } => {
                write!(f, "{} := {}", self.strings.resolve(*symbol), self.child(affix))
            }
            AstKind::Assignment { left, right } => {
                write!(f, "{} = {}", self.child(left), self.child(right))
            }
            AstKind::Binop { op, left, right } => write!(
                f,
                "({} {} {})",
                self.child(left),
                self.strings.resolve(*op),
                self.child(right)
            ),
            AstKind::Unop { op, right } => {
                write!(f, "{}{}", self.strings.resolve(*op), self.child(right))
            }
            AstKind::AddressOf { right } => write!(f, "&{}", self.child(right)),
            AstKind::ValueOf { right } => write!(f, "*{}", self.child(right)),
            AstKind::Application { callee, arguments } => {
                write!(f, "{}(", self.child(callee))?;
                self.list(f, arguments)?;
                write!(f, ")")
            }
            AstKind::Dot { left, right } => write!(f, "{}.{}", self.child(left), self.child(right)),
            AstKind::Subscript { left, right } => {
                write!(f, "{}[{}]", self.child(left), self.child(right))
            }
            AstKind::Array { elements } => {
                write!(f, "[")?;
                self.list(f, elements)?;
                write!(f, "]")
            }
            AstKind::Tuple { elements } => {
                write!(f, "(")?;
                self.list(f, elements)?;
                write!(f, ")")
            }
            AstKind::Block { statements } => {
                write!(f, "{{")?;
                for statement in statements {
                    write!(f, " {};", self.child(statement))?;
                }
                write!(f, " }}")
            }
            AstKind::Conditional { test, first, second } => write!(
                f,
                "if {} then {} else {}",
                self.child(test),
                self.child(first),
                self.child(second)
            ),
            AstKind::While { test, body } => {
                write!(f, "while {} do {}", self.child(test), self.child(body))
            }
            AstKind::Function { name, arguments, body } => {
                write!(f, "fn {}(", self.strings.resolve(*name))?;
                for (i, (argument, ty)) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(
                        f,
                        "{}: {}",
                        self.strings.resolve(*argument),
                        TypeDisplay::new(self.types, self.strings, *ty)
                    )?;
                }
                write!(f, ") {}", self.child(body))
            }
        }
    }
}
