//! Abstract Syntax Tree for Tern
//!
//! The parser builds an `Ast` with every type slot empty. Type checking
//! fills each slot exactly once; code generation reads them afterwards.
//! Nodes own their children, so the tree never shares or cycles.

pub mod display;

pub use display::AstDisplay;

use crate::types::TypeId;
use serde::{Deserialize, Serialize};
use tern_common::{Location, Symbol};

/// How code generation must treat a variable occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Access {
    /// Load the stored value
    #[default]
    Load,
    /// Use the storage location itself, without loading
    Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ast {
    pub kind: AstKind,
    pub location: Location,
    cached_type: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstKind {
    Nil,
    Boolean(bool),
    Integer(i64),

    Variable {
        symbol: Symbol,
        access: Access,
    },

    /// `symbol := affix`
    Bind {
        symbol: Symbol,
        affix: Box<Ast>,
    },

    Assignment {
        left: Box<Ast>,
        right: Box<Ast>,
    },

    Binop {
        op: Symbol,
        left: Box<Ast>,
        right: Box<Ast>,
    },

    Unop {
        op: Symbol,
        right: Box<Ast>,
    },

    AddressOf {
        right: Box<Ast>,
    },

    /// Dereference
    ValueOf {
        right: Box<Ast>,
    },

    Application {
        callee: Box<Ast>,
        arguments: Vec<Ast>,
    },

    /// Tuple projection by constant index
    Dot {
        left: Box<Ast>,
        right: Box<Ast>,
    },

    Subscript {
        left: Box<Ast>,
        right: Box<Ast>,
    },

    Array {
        elements: Vec<Ast>,
    },

    Tuple {
        elements: Vec<Ast>,
    },

    Block {
        statements: Vec<Ast>,
    },

    Conditional {
        test: Box<Ast>,
        first: Box<Ast>,
        second: Box<Ast>,
    },

    While {
        test: Box<Ast>,
        body: Box<Ast>,
    },

    Function {
        name: Symbol,
        arguments: Vec<(Symbol, TypeId)>,
        body: Box<Ast>,
    },
}

impl AstKind {
    pub fn is_literal(&self) -> bool {
        matches!(self, AstKind::Nil | AstKind::Boolean(_) | AstKind::Integer(_))
    }
}

impl Ast {
    pub fn new(kind: AstKind, location: Location) -> Self {
        Self {
            kind,
            location,
            cached_type: None,
        }
    }

    pub fn kind(&self) -> &AstKind {
        &self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// The type recorded by the checker, if this node has been checked
    pub fn cached_type(&self) -> Option<TypeId> {
        self.cached_type
    }

    /// Record the node's type. The slot is write-once; writing a different
    /// type over an existing one is an engine bug.
    pub fn set_cached_type(&mut self, ty: TypeId) {
        match self.cached_type {
            Some(existing) if existing != ty => {
                panic!(
                    "type of node at {} rewritten from #{} to #{}",
                    self.location,
                    existing.index(),
                    ty.index()
                );
            }
            _ => self.cached_type = Some(ty),
        }
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    /// Dump the tree, including computed types, for the backend
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn nil(location: Location) -> Self {
        Self::new(AstKind::Nil, location)
    }

    pub fn boolean(value: bool, location: Location) -> Self {
        Self::new(AstKind::Boolean(value), location)
    }

    pub fn integer(value: i64, location: Location) -> Self {
        Self::new(AstKind::Integer(value), location)
    }

    pub fn variable(symbol: Symbol, location: Location) -> Self {
        Self::new(AstKind::Variable { symbol, access: Access::Load }, location)
    }

    pub fn bind(symbol: Symbol, affix: Ast, location: Location) -> Self {
        Self::new(AstKind::Bind { symbol, affix: Box::new(affix) }, location)
    }

    pub fn assignment(left: Ast, right: Ast, location: Location) -> Self {
        Self::new(
            AstKind::Assignment { left: Box::new(left), right: Box::new(right) },
            location,
        )
    }

    pub fn binop(op: Symbol, left: Ast, right: Ast, location: Location) -> Self {
        Self::new(
            AstKind::Binop { op, left: Box::new(left), right: Box::new(right) },
            location,
        )
    }

    pub fn unop(op: Symbol, right: Ast, location: Location) -> Self {
        Self::new(AstKind::Unop { op, right: Box::new(right) }, location)
    }

    pub fn address_of(right: Ast, location: Location) -> Self {
        Self::new(AstKind::AddressOf { right: Box::new(right) }, location)
    }

    pub fn value_of(right: Ast, location: Location) -> Self {
        Self::new(AstKind::ValueOf { right: Box::new(right) }, location)
    }

    pub fn application(callee: Ast, arguments: Vec<Ast>, location: Location) -> Self {
        Self::new(
            AstKind::Application { callee: Box::new(callee), arguments },
            location,
        )
    }

    pub fn dot(left: Ast, right: Ast, location: Location) -> Self {
        Self::new(AstKind::Dot { left: Box::new(left), right: Box::new(right) }, location)
    }

    pub fn subscript(left: Ast, right: Ast, location: Location) -> Self {
        Self::new(
            AstKind::Subscript { left: Box::new(left), right: Box::new(right) },
            location,
        )
    }

    pub fn array(elements: Vec<Ast>, location: Location) -> Self {
        Self::new(AstKind::Array { elements }, location)
    }

    pub fn tuple(elements: Vec<Ast>, location: Location) -> Self {
        Self::new(AstKind::Tuple { elements }, location)
    }

    pub fn block(statements: Vec<Ast>, location: Location) -> Self {
        Self::new(AstKind::Block { statements }, location)
    }

    pub fn conditional(test: Ast, first: Ast, second: Ast, location: Location) -> Self {
        Self::new(
            AstKind::Conditional {
                test: Box::new(test),
                first: Box::new(first),
                second: Box::new(second),
            },
            location,
        )
    }

    pub fn while_loop(test: Ast, body: Ast, location: Location) -> Self {
        Self::new(AstKind::While { test: Box::new(test), body: Box::new(body) }, location)
    }

    pub fn function(
        name: Symbol,
        arguments: Vec<(Symbol, TypeId)>,
        body: Ast,
        location: Location,
    ) -> Self {
        Self::new(AstKind::Function { name, arguments, body: Box::new(body) }, location)
    }
}
