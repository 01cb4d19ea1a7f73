//! Statement semantic analysis
//!
//! This module handles declarations, blocks and control flow.

use super::{Context, SemanticError, TypeChecker, RETURN_TYPE_VARIABLE};
use crate::ast::Ast;
use crate::types::{Substitution, SubstitutionError, TypeId};
use log::debug;
use tern_common::{Location, Symbol};

impl<F> TypeChecker<'_, F> {
    pub(crate) fn check_bind(
        &mut self,
        symbol: Symbol,
        affix: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        self.ensure_unbound_locally(symbol, location)?;

        let ty = self.check_node(affix, Context::default())?;
        self.env
            .bind_variable(symbol, ty, None)
            .map_err(|_| SemanticError::AlreadyBound {
                name: self.name(symbol),
                location,
            })?;

        debug!("bind {} : {}", self.name(symbol), self.show_type(ty));
        Ok(ty)
    }

    fn ensure_unbound_locally(
        &self,
        symbol: Symbol,
        location: Location,
    ) -> Result<(), SemanticError> {
        match self.env.lookup_local_variable(symbol) {
            Some(_) => Err(SemanticError::AlreadyBound {
                name: self.name(symbol),
                location,
            }),
            None => Ok(()),
        }
    }

    /// Statements share one fresh scope, which is popped however checking ends
    pub(crate) fn check_block(&mut self, statements: &mut [Ast]) -> Result<TypeId, SemanticError> {
        self.env.push_scope();
        let result = self.check_statements(statements);
        self.env.pop_scope();
        result
    }

    fn check_statements(&mut self, statements: &mut [Ast]) -> Result<TypeId, SemanticError> {
        let mut last = self.types.nil_type();
        for statement in statements.iter_mut() {
            last = self.check_node(statement, Context::default())?;
        }
        Ok(last)
    }

    pub(crate) fn check_conditional(
        &mut self,
        test: &mut Ast,
        first: &mut Ast,
        second: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        let test_ty = self.check_node(test, Context::default())?;
        let test_ty = self.settle_result(test_ty, self.types.boolean_type(), test.location())?;
        if !self.types.equals(test_ty, self.types.boolean_type()) {
            return Err(SemanticError::CondTestNotBoolean {
                found: self.show_type(test_ty),
                location: test.location(),
            });
        }

        let first_ty = self.check_node(first, Context::default())?;
        let second_ty = self.check_node(second, Context::default())?;
        let first_ty = self.settle_result(first_ty, second_ty, first.location())?;
        let second_ty = self.settle_result(second_ty, first_ty, second.location())?;
        if !self.types.equals(first_ty, second_ty) {
            return Err(SemanticError::CondArmsDiffer {
                first: self.show_type(first_ty),
                second: self.show_type(second_ty),
                location,
            });
        }

        Ok(first_ty)
    }

    pub(crate) fn check_while(
        &mut self,
        test: &mut Ast,
        body: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        let test_ty = self.check_node(test, Context::default())?;
        let test_ty = self.settle_result(test_ty, self.types.boolean_type(), test.location())?;
        if !self.types.equals(test_ty, self.types.boolean_type()) {
            return Err(SemanticError::WhileTestNotBoolean {
                found: self.show_type(test_ty),
                location,
            });
        }

        self.check_node(body, Context::default())?;
        Ok(self.types.nil_type())
    }

    /// Check a function definition.
    ///
    /// The name is false-bound in the enclosing scope to a function type
    /// returning the `'return` variable, so calls inside the body resolve.
    /// The first known type a self-call's result meets fixes `'return`, and
    /// the body's type must agree with it. Once the body type is known the
    /// placeholder is replaced by the real binding. If the body fails, the
    /// placeholder stays false-bound and leaves with the enclosing scope.
    pub(crate) fn check_function(
        &mut self,
        name: Symbol,
        arguments: &[(Symbol, TypeId)],
        body: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        self.ensure_unbound_locally(name, location)?;

        let params: Vec<TypeId> = arguments.iter().map(|(_, ty)| *ty).collect();
        let return_ty = self.return_placeholder();
        let placeholder = self.types.function_type(return_ty, params.clone());

        self.env
            .false_bind_variable(name, placeholder)
            .map_err(|_| SemanticError::AlreadyBound {
                name: self.name(name),
                location,
            })?;

        self.env.push_scope();
        self.results.push(Substitution::new());
        let body_ty = self.check_function_body(arguments, body, location);
        let assumed = self.results.pop().and_then(|results| results.get(return_ty));
        self.env.pop_scope();
        let body_ty = self.reconcile_result(body_ty?, assumed, location)?;

        let ty = self.types.function_type(body_ty, params);
        self.env.unbind_variable(name);
        self.env
            .bind_variable(name, ty, None)
            .map_err(|_| SemanticError::AlreadyBound {
                name: self.name(name),
                location,
            })?;

        debug!("function {} : {}", self.name(name), self.show_type(ty));
        Ok(ty)
    }

    fn check_function_body(
        &mut self,
        arguments: &[(Symbol, TypeId)],
        body: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        for (argument, ty) in arguments {
            self.env
                .bind_variable(*argument, *ty, None)
                .map_err(|_| SemanticError::AlreadyBound {
                    name: self.name(*argument),
                    location,
                })?;
        }

        self.check_node(body, Context::default())
    }

    fn return_placeholder(&mut self) -> TypeId {
        let variable = self.strings.intern(RETURN_TYPE_VARIABLE);
        self.types.variable_type(variable)
    }

    /// Take `other` as the enclosing function's result where `ty` is the
    /// `'return` placeholder of a self-call. Other types pass through.
    pub(crate) fn settle_result(
        &mut self,
        ty: TypeId,
        other: TypeId,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        let placeholder = self.return_placeholder();
        if ty != placeholder || other == placeholder || self.results.is_empty() {
            return Ok(ty);
        }

        match self.assumed_result(placeholder) {
            Some(bound) if !self.types.equals(bound, other) => {
                Err(self.result_conflict(placeholder, bound, other, location))
            }
            Some(_) => Ok(other),
            None => {
                if let Some(results) = self.results.last_mut() {
                    results.bind(placeholder, other);
                }
                Ok(other)
            }
        }
    }

    /// The type already settled for the innermost function's result
    fn assumed_result(&self, placeholder: TypeId) -> Option<TypeId> {
        self.results.last()?.get(placeholder)
    }

    /// A self-call's result once an earlier use has settled it
    pub(crate) fn known_result(&mut self, ty: TypeId) -> TypeId {
        let placeholder = self.return_placeholder();
        match self.assumed_result(placeholder) {
            Some(bound) if ty == placeholder => bound,
            _ => ty,
        }
    }

    fn reconcile_result(
        &mut self,
        body_ty: TypeId,
        assumed: Option<TypeId>,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        let placeholder = self.return_placeholder();
        match assumed {
            Some(assumed) if body_ty == placeholder => Ok(assumed),
            Some(assumed) if !self.types.equals(assumed, body_ty) => {
                Err(self.result_conflict(placeholder, assumed, body_ty, location))
            }
            _ => Ok(body_ty),
        }
    }

    fn result_conflict(
        &self,
        placeholder: TypeId,
        bound: TypeId,
        found: TypeId,
        location: Location,
    ) -> SemanticError {
        let err = SubstitutionError::ConflictingBinding { variable: placeholder, bound, found };
        SemanticError::Substitution {
            kind: err.kind(),
            detail: err.describe(self.types, self.strings),
            location,
        }
    }
}
