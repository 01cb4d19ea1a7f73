//! Expression semantic analysis
//!
//! Variables and the operator, reference, call and projection forms.

use super::{Context, SemanticError, TypeChecker};
use crate::ast::{Access, Ast, AstKind};
use crate::types::{Substitution, TypeId, TypeKind};
use tern_common::{ErrorKind, Location, Symbol};

impl<F> TypeChecker<'_, F> {
    pub(crate) fn check_variable(
        &mut self,
        symbol: Symbol,
        access: &mut Access,
        location: Location,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        let binding = self.env.lookup_variable(symbol).map_err(|_| SemanticError::UnboundName {
            name: self.name(symbol),
            location,
        })?;

        *access = ctx.variable_access();
        Ok(binding.ty)
    }

    pub(crate) fn check_assignment(
        &mut self,
        left: &mut Ast,
        right: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        if left.is_literal() {
            return Err(SemanticError::NotAssignable {
                target: self.show_ast(left),
                location: left.location(),
            });
        }

        let left_ty = self.check_node(left, Context::default().assignment_target())?;
        let right_ty = self.check_node(right, Context::default())?;
        let right_ty = self.settle_result(right_ty, left_ty, right.location())?;

        if !self.types.equals(left_ty, right_ty) {
            return Err(SemanticError::AssigneeMismatch {
                expected: self.show_type(left_ty),
                found: self.show_type(right_ty),
                location,
            });
        }

        Ok(left_ty)
    }

    pub(crate) fn check_binop(
        &mut self,
        op: Symbol,
        left: &mut Ast,
        right: &mut Ast,
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        let left_ty = self.check_node(left, Context::default())?;
        let right_ty = self.check_node(right, Context::default())?;
        let left_ty = self.settle_result(left_ty, right_ty, left.location())?;
        let right_ty = self.settle_result(right_ty, left_ty, right.location())?;

        match self.operators.resolve_binop(op, left_ty, right_ty).map(|r| r.result) {
            Ok(result) => Ok(result),
            Err(ErrorKind::UnknownBinop) => Err(SemanticError::UnknownBinop {
                op: self.name(op),
                location,
            }),
            Err(_) => Err(SemanticError::OperandMismatch {
                op: self.name(op),
                operands: format!("{} and {}", self.show_type(left_ty), self.show_type(right_ty)),
                location,
            }),
        }
    }

    pub(crate) fn check_unop(
        &mut self,
        op: Symbol,
        right: &mut Ast,
        location: Location,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        let unops = &self.operators.unops;
        let operand_ctx = if unops.is_address_of(op) {
            self.check_addressable(right, location, ctx)?;
            ctx.address_of()
        } else if unops.is_dereference(op) {
            ctx.dereference()
        } else {
            Context::default()
        };

        let argument = self.check_node(right, operand_ctx)?;
        let resolved = self
            .operators
            .resolve_unop(op, argument, self.types)
            .map(|r| r.result);

        match resolved {
            Ok(result) => Ok(result),
            Err(ErrorKind::UnknownUnop) => Err(SemanticError::UnknownUnop {
                op: self.name(op),
                location,
            }),
            Err(_) => Err(SemanticError::OperandMismatch {
                op: self.name(op),
                operands: self.show_type(argument),
                location,
            }),
        }
    }

    /// Reject taking the address of something with no storage, or of an
    /// assignment target
    fn check_addressable(
        &self,
        right: &Ast,
        location: Location,
        ctx: Context,
    ) -> Result<(), SemanticError> {
        if ctx.lhs_of_assignment {
            return Err(SemanticError::NotAssignable {
                target: format!("&{}", self.show_ast(right)),
                location,
            });
        }

        if right.is_literal() {
            return Err(SemanticError::AddressOfLiteral {
                literal: self.show_ast(right),
                location,
            });
        }

        Ok(())
    }

    pub(crate) fn check_address_of(
        &mut self,
        right: &mut Ast,
        location: Location,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        self.check_addressable(right, location, ctx)?;
        let pointee = self.check_node(right, ctx.address_of())?;
        Ok(self.types.pointer_type(pointee))
    }

    pub(crate) fn check_value_of(
        &mut self,
        right: &mut Ast,
        location: Location,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        let ty = self.check_node(right, ctx.dereference())?;

        self.types
            .kind(ty)
            .pointee()
            .ok_or_else(|| SemanticError::DereferenceNonPointer {
                found: self.show_type(ty),
                location,
            })
    }

    /// Calls match arguments to parameters positionally. A parameter whose
    /// type mentions a type variable is matched polymorphically, and the
    /// bindings collected on the way instantiate the result type. Every
    /// argument for the same variable must agree.
    pub(crate) fn check_application(
        &mut self,
        callee: &mut Ast,
        arguments: &mut [Ast],
        location: Location,
    ) -> Result<TypeId, SemanticError> {
        let callee_ty = self.check_node(callee, Context::default())?;
        let (result, params) = match self.types.kind(callee_ty) {
            TypeKind::Function { result, params } => (*result, params.clone()),
            _ => {
                return Err(SemanticError::NotCallable {
                    found: self.show_type(callee_ty),
                    location,
                })
            }
        };

        if params.len() != arguments.len() {
            return Err(SemanticError::ArgumentCount {
                expected: params.len(),
                found: arguments.len(),
                location,
            });
        }

        let mut bindings = Substitution::new();
        for (index, (argument, param)) in arguments.iter_mut().zip(&params).enumerate() {
            let argument_ty = self.check_node(argument, Context::default())?;
            if !self.types.contains_variables(*param) {
                let argument_ty = self.settle_result(argument_ty, *param, argument.location())?;
                if self.types.equals(*param, argument_ty) {
                    continue;
                }
                return Err(SemanticError::ArgumentMismatch {
                    index,
                    expected: self.show_type(*param),
                    found: self.show_type(argument_ty),
                    location: argument.location(),
                });
            }

            self.types
                .poly_match(*param, argument_ty, &mut bindings)
                .map_err(|err| SemanticError::Substitution {
                    kind: err.kind(),
                    detail: err.describe(self.types, self.strings),
                    location: argument.location(),
                })?;
        }

        let result = if bindings.is_empty() {
            result
        } else {
            bindings.apply(self.types, result)
        };
        Ok(self.known_result(result))
    }

    pub(crate) fn check_dot(
        &mut self,
        left: &mut Ast,
        right: &mut Ast,
        location: Location,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        let left_ty = self.check_node(left, ctx)?;
        let elements = match self.types.kind(left_ty) {
            TypeKind::Tuple(elements) => elements.clone(),
            _ => {
                return Err(SemanticError::DotLeftNotTuple {
                    found: self.show_type(left_ty),
                    location: left.location(),
                })
            }
        };

        let index = match right.kind {
            AstKind::Integer(index) => index,
            _ => {
                return Err(SemanticError::DotRightNotInt {
                    index: self.show_ast(right),
                    location: right.location(),
                })
            }
        };
        self.check_node(right, Context::default())?;

        usize::try_from(index)
            .ok()
            .and_then(|i| elements.get(i).copied())
            .ok_or(SemanticError::DotIndexOutOfRange {
                index,
                arity: elements.len(),
                location,
            })
    }

    pub(crate) fn check_subscript(
        &mut self,
        left: &mut Ast,
        right: &mut Ast,
        location: Location,
        ctx: Context,
    ) -> Result<TypeId, SemanticError> {
        let left_ty = self.check_node(left, ctx)?;
        let element = match self.types.kind(left_ty) {
            TypeKind::Array { element, .. } | TypeKind::Slice(element) => *element,
            _ => {
                return Err(SemanticError::NotSubscriptable {
                    found: self.show_type(left_ty),
                    location,
                })
            }
        };

        let index_ty = self.check_node(right, Context::default())?;
        let index_ty = self.settle_result(index_ty, self.types.integer_type(), right.location())?;
        if !self.types.equals(index_ty, self.types.integer_type()) {
            return Err(SemanticError::SubscriptNotIndex {
                found: self.show_type(index_ty),
                location: right.location(),
            });
        }

        Ok(element)
    }

    /// An empty literal has no element to take a type from and is `[Nil; 0]`
    pub(crate) fn check_array(&mut self, elements: &mut [Ast]) -> Result<TypeId, SemanticError> {
        let size = elements.len();
        let Some((first, rest)) = elements.split_first_mut() else {
            let nil = self.types.nil_type();
            return Ok(self.types.array_type(0, nil));
        };

        let mut element = self.check_node(first, Context::default())?;
        for (offset, member) in rest.iter_mut().enumerate() {
            let member_ty = self.check_node(member, Context::default())?;
            let member_ty = self.settle_result(member_ty, element, member.location())?;
            element = self.settle_result(element, member_ty, first.location())?;
            if !self.types.equals(element, member_ty) {
                return Err(SemanticError::ArrayMemberMismatch {
                    index: offset + 1,
                    expected: self.show_type(element),
                    found: self.show_type(member_ty),
                    location: member.location(),
                });
            }
        }

        Ok(self.types.array_type(size, element))
    }

    pub(crate) fn check_tuple(&mut self, elements: &mut [Ast]) -> Result<TypeId, SemanticError> {
        let mut element_types = Vec::with_capacity(elements.len());
        for element in elements.iter_mut() {
            element_types.push(self.check_node(element, Context::default())?);
        }
        Ok(self.types.tuple_type(element_types))
    }
}
