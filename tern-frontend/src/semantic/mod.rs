//! Semantic analysis for Tern
//!
//! Type checking is one recursive pass over the tree. Every node's type is
//! computed from its children, recorded in the node's cache, and returned.
//! The first error aborts the pass.

pub mod context;
pub mod environment;
pub mod errors;
pub mod expressions;
pub mod statements;

pub use context::Context;
pub use environment::{Binding, Environment, ValueHandle};
pub use errors::SemanticError;

use crate::ast::{Ast, AstDisplay, AstKind};
use crate::operators::OperatorTables;
use crate::types::{Substitution, TypeDisplay, TypeId, TypeInterner};
use tern_common::{CompilerError, StringInterner, Symbol};

/// Name of the type variable standing for a function's result while its
/// body is being checked
pub const RETURN_TYPE_VARIABLE: &str = "return";

/// The typechecker borrows the per-compilation state it reads and grows
pub struct TypeChecker<'a, F> {
    pub strings: &'a mut StringInterner,
    pub types: &'a mut TypeInterner,
    pub env: &'a mut Environment,
    pub operators: &'a OperatorTables<F>,
    /// What `'return` stands for in each function body being checked,
    /// innermost last
    results: Vec<Substitution>,
}

impl<'a, F> TypeChecker<'a, F> {
    pub fn new(
        strings: &'a mut StringInterner,
        types: &'a mut TypeInterner,
        env: &'a mut Environment,
        operators: &'a OperatorTables<F>,
    ) -> Self {
        Self {
            strings,
            types,
            env,
            operators,
            results: Vec::new(),
        }
    }

    /// Typecheck `ast`, filling the type cache of every node visited
    pub fn check(&mut self, ast: &mut Ast) -> Result<TypeId, CompilerError> {
        self.check_node(ast, Context::default()).map_err(CompilerError::from)
    }

    pub(crate) fn check_node(
        &mut self,
        ast: &mut Ast,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        if let Some(ty) = ast.cached_type() {
            return Ok(ty);
        }

        let location = ast.location();
        let ty = match &mut ast.kind {
            AstKind::Nil => self.types.nil_type(),
            AstKind::Boolean(_) => self.types.boolean_type(),
            AstKind::Integer(_) => self.types.integer_type(),
            AstKind::Variable { symbol, access } => {
                self.check_variable(*symbol, access, location, ctx)?
            }
            AstKind::Bind { symbol, affix } => self.check_bind(*symbol, affix, location)?,
            AstKind::Assignment { left, right } => self.check_assignment(left, right, location)?,
            AstKind::Binop { op, left, right } => self.check_binop(*op, left, right, location)?,
            AstKind::Unop { op, right } => self.check_unop(*op, right, location, ctx)?,
            AstKind::AddressOf { right } => self.check_address_of(right, location, ctx)?,
            AstKind::ValueOf { right } => self.check_value_of(right, location, ctx)?,
            AstKind::Application { callee, arguments } => {
                self.check_application(callee, arguments, location)?
            }
            AstKind::Dot { left, right } => self.check_dot(left, right, location, ctx)?,
            AstKind::Subscript { left, right } => {
                self.check_subscript(left, right, location, ctx)?
            }
            AstKind::Array { elements } => self.check_array(elements)?,
            AstKind::Tuple { elements } => self.check_tuple(elements)?,
            AstKind::Block { statements } => self.check_block(statements)?,
            AstKind::Conditional { test, first, second } => {
                self.check_conditional(test, first, second, location)?
            }
            AstKind::While { test, body } => self.check_while(test, body, location)?,
            AstKind::Function { name, arguments, body } => {
                self.check_function(*name, arguments, body, location)?
            }
        };

        ast.set_cached_type(ty);
        Ok(ty)
    }

    pub(crate) fn show_type(&self, ty: TypeId) -> String {
        TypeDisplay::new(self.types, self.strings, ty).to_string()
    }

    pub(crate) fn show_ast(&self, ast: &Ast) -> String {
        AstDisplay::new(ast, self.strings, self.types).to_string()
    }

    pub(crate) fn name(&self, symbol: Symbol) -> String {
        self.strings.resolve(symbol).to_string()
    }
}
