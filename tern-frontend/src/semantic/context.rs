//! Positional flags threaded through typechecking
//!
//! A `Context` describes where the node being checked sits. It is passed by
//! value, so each recursive call sees its own copy and the caller's flags are
//! unchanged when the call returns, on success or error.

use crate::ast::Access;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub lhs_of_assignment: bool,
    pub within_address_of: bool,
    pub within_dereference: bool,
}

impl Context {
    /// The assignment target position
    pub fn assignment_target(self) -> Self {
        Self {
            lhs_of_assignment: true,
            ..self
        }
    }

    /// Operand of `&`
    pub fn address_of(self) -> Self {
        Self {
            lhs_of_assignment: false,
            within_address_of: true,
            within_dereference: false,
        }
    }

    /// Operand of a dereference
    pub fn dereference(self) -> Self {
        Self {
            lhs_of_assignment: false,
            within_dereference: true,
            ..self
        }
    }

    /// A plain value position
    pub fn value(self) -> Self {
        Self::default()
    }

    /// Whether a variable here denotes its storage rather than its value
    pub fn variable_access(&self) -> Access {
        if (self.lhs_of_assignment || self.within_address_of) && !self.within_dereference {
            Access::Address
        } else {
            Access::Load
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_access() {
        let ctx = Context::default();
        assert_eq!(ctx.variable_access(), Access::Load);
        assert_eq!(ctx.assignment_target().variable_access(), Access::Address);
        assert_eq!(ctx.address_of().variable_access(), Access::Address);
        assert_eq!(ctx.assignment_target().dereference().variable_access(), Access::Load);
        assert_eq!(ctx.address_of().dereference().variable_access(), Access::Load);
    }

    #[test]
    fn test_value_clears_flags() {
        let ctx = Context::default().assignment_target().address_of().dereference();
        assert_eq!(ctx.value(), Context::default());
    }

    #[test]
    fn test_flags_are_copied() {
        let outer = Context::default();
        let inner = outer.assignment_target();
        assert!(inner.lhs_of_assignment);
        assert!(!outer.lhs_of_assignment);
    }
}
