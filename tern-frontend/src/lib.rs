//! Tern - Semantic Front End
//!
//! This crate provides the semantic components of the Tern front end:
//! - Types: hash-consed type model, equality and substitution
//! - AST: the tree the parser builds and the typechecker annotates
//! - Operators: overload tables with parser-visible precedence
//! - Semantic analysis: scoped environment and the typechecker

pub mod ast;
pub mod config;
pub mod operators;
pub mod semantic;
pub mod types;

pub use ast::{Access, Ast, AstDisplay, AstKind};
pub use config::CompilationOptions;
pub use operators::{Associativity, Intrinsic, OperatorTables, Resolved};
pub use semantic::{Binding, Context, Environment, SemanticError, TypeChecker, ValueHandle};
pub use types::{Substitution, SubstitutionError, TypeDisplay, TypeId, TypeInterner, TypeKind};

use log::debug;
use tern_common::{CompilerError, Diagnostic, StringInterner, Symbol};

/// All mutable state of one compilation.
///
/// `F` is the backend's codegen callback type, stored in operator overloads.
/// Compilations share nothing, so separate ones may run on separate threads.
pub struct Compilation<F = Intrinsic> {
    pub options: CompilationOptions,
    pub strings: StringInterner,
    pub types: TypeInterner,
    pub env: Environment,
    pub operators: OperatorTables<F>,
}

impl Compilation<Intrinsic> {
    pub fn new(options: CompilationOptions) -> Self {
        Self::with_callbacks(options, |intrinsic| intrinsic)
    }
}

impl<F> Compilation<F> {
    /// Create a compilation whose built-in overloads carry `map(intrinsic)`
    pub fn with_callbacks(options: CompilationOptions, map: impl Fn(Intrinsic) -> F) -> Self {
        let mut strings = StringInterner::new();
        let mut types = TypeInterner::new();
        let operators = if options.builtin_operators {
            OperatorTables::with_builtins(&mut strings, &mut types, map)
        } else {
            OperatorTables::new(&mut strings)
        };

        debug!("new compilation for {}", options.filename);
        Self {
            options,
            strings,
            types,
            env: Environment::new(),
            operators,
        }
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        self.strings.intern(name)
    }

    pub fn checker(&mut self) -> TypeChecker<'_, F> {
        TypeChecker::new(&mut self.strings, &mut self.types, &mut self.env, &self.operators)
    }

    /// Typecheck one top-level declaration
    pub fn typecheck(&mut self, ast: &mut Ast) -> Result<TypeId, CompilerError> {
        self.checker().check(ast)
    }

    /// Selected overload of a typechecked `Binop` or `Unop` node
    pub fn resolve_operator(&mut self, ast: &Ast) -> Option<Resolved<'_, F>> {
        match &ast.kind {
            AstKind::Binop { op, left, right } => {
                let (left, right) = (left.cached_type()?, right.cached_type()?);
                self.operators.resolve_binop(*op, left, right).ok()
            }
            AstKind::Unop { op, right } => {
                let argument = right.cached_type()?;
                self.operators.resolve_unop(*op, argument, &mut self.types).ok()
            }
            _ => None,
        }
    }

    pub fn display_type(&self, ty: TypeId) -> String {
        self.types.display(&self.strings, ty).to_string()
    }

    pub fn display_ast(&self, ast: &Ast) -> String {
        AstDisplay::new(ast, &self.strings, &self.types).to_string()
    }

    /// Report `error` against this compilation's file
    pub fn diagnostic(&self, error: &CompilerError) -> Diagnostic {
        Diagnostic::new(self.options.filename.clone(), error.clone())
            .with_note(format!("{} error", error.kind().category()))
    }
}

impl Default for Compilation<Intrinsic> {
    fn default() -> Self {
        Self::new(CompilationOptions::default())
    }
}
