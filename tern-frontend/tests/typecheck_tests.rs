//! End-to-end typechecking of hand-built trees

mod common;

use common::*;
use pretty_assertions::assert_eq;
use tern_common::{ErrorKind, Location};
use tern_frontend::{Access, Ast, AstKind, Compilation, CompilationOptions};

#[test]
fn test_bind_integer() {
    let mut c = compilation();
    let mut ast = bind(&mut c, "x", int(30));

    let ty = c.typecheck(&mut ast).unwrap();
    assert_eq!(ty, c.types.integer_type());
    assert_eq!(c.env.lookup_variable(c.strings.get("x").unwrap()).unwrap().ty, ty);
}

#[test]
fn test_compare_boolean_variable() {
    let mut c = compilation();
    let x = var(&mut c, "x");
    let compare = binop(&mut c, "==", x, boolean(false));
    let mut program = vec![bind(&mut c, "x", boolean(true)), bind(&mut c, "y", compare)];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.boolean_type());
}

#[test]
fn test_subscript_array() {
    let mut c = compilation();
    let a = var(&mut c, "a");
    let index = Ast::subscript(a, int(0), loc());
    let mut program = vec![
        bind(&mut c, "a", Ast::array(vec![int(1), int(2), int(3)], loc())),
        bind(&mut c, "b", index),
    ];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.integer_type());
    let int_ty = c.types.integer_type();
    assert_eq!(program[0].cached_type(), Some(c.types.array_type(3, int_ty)));
}

#[test]
fn test_tuple_projection() {
    let mut c = compilation();
    let t = var(&mut c, "t");
    let project = Ast::dot(t, int(1), loc());
    let mut program = vec![
        bind(&mut c, "t", Ast::tuple(vec![int(1), boolean(true)], loc())),
        bind(&mut c, "u", project),
    ];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.boolean_type());
    assert_eq!(c.display_ast(&program[1]), "u := t.1");
}

#[test]
fn test_function_application() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let a = var(&mut c, "a");
    let b = var(&mut c, "b");
    let sum = binop(&mut c, "+", a, b);
    let f = function(&mut c, "f", &[("a", int_ty), ("b", int_ty)], vec![sum]);
    let apply = call(&mut c, "f", vec![int(1), int(2)]);
    let mut program = vec![f, bind(&mut c, "r", apply)];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), int_ty);
    assert_eq!(program[0].cached_type(), Some(c.types.function_type(int_ty, vec![int_ty, int_ty])));
    assert!(c.env.false_bindings().is_empty());
}

#[test]
fn test_pointer_round_trip() {
    let mut c = compilation();
    let x = var(&mut c, "x");
    let y = var(&mut c, "y");
    let mut program = vec![
        bind(&mut c, "x", int(1)),
        bind(&mut c, "y", Ast::address_of(x, loc())),
        bind(&mut c, "z", Ast::value_of(y, loc())),
    ];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.integer_type());
    let int_ty = c.types.integer_type();
    assert_eq!(program[1].cached_type(), Some(c.types.pointer_type(int_ty)));

    match &program[1].kind {
        AstKind::Bind { affix, .. } => match &affix.kind {
            AstKind::AddressOf { right } => {
                assert!(matches!(right.kind, AstKind::Variable { access: Access::Address, .. }))
            }
            other => panic!("unexpected node {:?}", other),
        },
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_pointer_operators() {
    let mut c = compilation();
    let x = var(&mut c, "x");
    let y = var(&mut c, "y");
    let address = unop(&mut c, "&", x);
    let load = unop(&mut c, "*", y);
    let mut program = vec![
        bind(&mut c, "x", boolean(true)),
        bind(&mut c, "y", address),
        bind(&mut c, "z", load),
    ];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.boolean_type());
}

#[test]
fn test_address_of_literal_rejected() {
    let mut c = compilation();
    let at = Location::new(1, 6, 1, 7);
    let mut ast = bind(&mut c, "z", Ast::address_of(int(1), at));

    let err = c.typecheck(&mut ast).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CannotTakeAddressOfLiteral);
    assert_eq!(err.location(), at);
    assert!(c.env.lookup_variable(c.strings.get("z").unwrap()).is_err());

    let mut ast = unop(&mut c, "&", boolean(true));
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::CannotTakeAddressOfLiteral);
}

#[test]
fn test_unbound_name() {
    let mut c = compilation();
    let mut ast = var(&mut c, "nowhere");
    let err = c.typecheck(&mut ast).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NameNotBoundInScope);
    assert_eq!(err.detail, "'nowhere' is not bound in this scope");
}

#[test]
fn test_rebind_in_same_scope() {
    let mut c = compilation();
    let mut program = vec![bind(&mut c, "x", int(1)), bind(&mut c, "x", int(2))];
    assert_eq!(
        check_all(&mut c, &mut program).unwrap_err().kind(),
        ErrorKind::NameAlreadyBoundInScope
    );
}

#[test]
fn test_shadowing_in_block() {
    let mut c = compilation();
    let inner = bind(&mut c, "x", boolean(false));
    let use_inner = var(&mut c, "x");
    let use_outer = var(&mut c, "x");
    let mut program = vec![
        bind(&mut c, "x", int(1)),
        Ast::block(vec![inner, use_inner], loc()),
        use_outer,
    ];

    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.integer_type());
    assert_eq!(program[1].cached_type(), Some(c.types.boolean_type()));
}

#[test]
fn test_assignment() {
    let mut c = compilation();
    let target = var(&mut c, "x");
    let mismatched_target = var(&mut c, "x");
    let mut program = vec![
        bind(&mut c, "x", int(1)),
        Ast::assignment(target, int(2), loc()),
    ];
    assert_eq!(check_all(&mut c, &mut program).unwrap(), c.types.integer_type());

    let mut ast = Ast::assignment(mismatched_target, boolean(true), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::AssigneeTypeMismatch);

    let mut ast = Ast::assignment(int(3), int(4), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::ValueCannotBeAssigned);
}

#[test]
fn test_dereference_non_pointer() {
    let mut c = compilation();
    let mut ast = Ast::value_of(int(1), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::CannotDereferenceNonPointer);
}

#[test]
fn test_dereference_slice() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let slice = c.types.slice_type(int_ty);
    let s = c.intern("s");
    c.env.bind_variable(s, slice, None).unwrap();

    let mut load = Ast::value_of(Ast::variable(s, loc()), loc());
    assert_eq!(c.typecheck(&mut load).unwrap(), int_ty);

    let mut index = Ast::subscript(Ast::variable(s, loc()), int(4), loc());
    assert_eq!(c.typecheck(&mut index).unwrap(), int_ty);
}

#[test]
fn test_call_shape_errors() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let a = var(&mut c, "a");
    let f = function(&mut c, "f", &[("a", int_ty)], vec![a]);
    let too_many = call(&mut c, "f", vec![int(1), int(2)]);
    let wrong_type = call(&mut c, "f", vec![boolean(true)]);
    let not_callable = call(&mut c, "n", vec![]);
    let mut program = vec![f, bind(&mut c, "n", int(0))];
    check_all(&mut c, &mut program).unwrap();

    for (mut ast, kind) in [
        (too_many, ErrorKind::ArgNumMismatch),
        (wrong_type, ErrorKind::ArgTypeMismatch),
        (not_callable, ErrorKind::TypeCannotBeCalled),
    ] {
        assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), kind);
    }
}

#[test]
fn test_dot_errors() {
    let mut c = compilation();
    let pair = || Ast::tuple(vec![int(1), int(2)], loc());
    let x = var(&mut c, "x");

    let mut ast = Ast::dot(int(1), int(0), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::DotLeftIsNotATuple);

    let mut ast = Ast::dot(pair(), boolean(true), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::DotRightIsNotAnInt);

    // A variable index is not a constant, even when it is an Integer
    let mut program = vec![bind(&mut c, "x", int(0)), Ast::dot(pair(), x, loc())];
    assert_eq!(check_all(&mut c, &mut program).unwrap_err().kind(), ErrorKind::DotRightIsNotAnInt);

    let mut ast = Ast::dot(pair(), int(2), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::DotIndexOutOfRange);

    let mut ast = Ast::dot(pair(), int(-1), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::DotIndexOutOfRange);
}

#[test]
fn test_subscript_errors() {
    let mut c = compilation();
    let array = || Ast::array(vec![int(1)], loc());

    let mut ast = Ast::subscript(int(1), int(0), loc());
    assert_eq!(
        c.typecheck(&mut ast).unwrap_err().kind(),
        ErrorKind::SubscriptLeftIsNotSubscriptable
    );

    let mut ast = Ast::subscript(array(), boolean(false), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::SubscriptRightIsNotAnIndex);
}

#[test]
fn test_array_literals() {
    let mut c = compilation();

    let mut ast = Ast::array(vec![int(1), boolean(true)], loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::ArrayMemberTypeMismatch);

    let mut empty = Ast::array(vec![], loc());
    let nil = c.types.nil_type();
    assert_eq!(c.typecheck(&mut empty).unwrap(), c.types.array_type(0, nil));
    assert_eq!(c.display_type(empty.cached_type().unwrap()), "[Nil; 0]");
}

#[test]
fn test_conditional_and_while() {
    let mut c = compilation();

    let mut ast = Ast::conditional(boolean(true), int(1), int(2), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap(), c.types.integer_type());

    let mut ast = Ast::conditional(int(0), int(1), int(2), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::CondTestExprTypeMismatch);

    let mut ast = Ast::conditional(boolean(true), int(1), boolean(false), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::CondBodyExprTypeMismatch);

    let mut ast = Ast::while_loop(boolean(false), Ast::block(vec![int(1)], loc()), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap(), c.types.nil_type());

    let mut ast = Ast::while_loop(int(1), Ast::block(vec![], loc()), loc());
    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::WhileTestTypeMismatch);
}

#[test]
fn test_empty_block_is_nil() {
    let mut c = compilation();
    let mut ast = Ast::block(vec![], loc());
    assert_eq!(c.typecheck(&mut ast).unwrap(), c.types.nil_type());
}

#[test]
fn test_self_call_checks_against_placeholder() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let n = var(&mut c, "n");
    let recurse = call(&mut c, "spin", vec![n]);
    let mut ast = function(&mut c, "spin", &[("n", int_ty)], vec![recurse, int(1)]);

    let ty = c.typecheck(&mut ast).unwrap();
    assert_eq!(c.display_type(ty), "fn(Integer) -> Integer");

    let spin = c.strings.get("spin").unwrap();
    assert_eq!(c.env.lookup_variable(spin).unwrap().ty, ty);
    assert!(c.env.false_bindings().is_empty());
}

/// `fn fact(n: Integer) { if n == 0 then 1 else n * fact(n - 1) }`
#[test]
fn test_recursive_result_used_in_expression() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let n = var(&mut c, "n");
    let test = binop(&mut c, "==", n, int(0));
    let n = var(&mut c, "n");
    let pred = binop(&mut c, "-", n, int(1));
    let recurse = call(&mut c, "fact", vec![pred]);
    let n = var(&mut c, "n");
    let product = binop(&mut c, "*", n, recurse);
    let body = Ast::conditional(test, int(1), product, loc());
    let mut ast = function(&mut c, "fact", &[("n", int_ty)], vec![body]);

    let ty = c.typecheck(&mut ast).unwrap();
    assert_eq!(c.display_type(ty), "fn(Integer) -> Integer");
}

#[test]
fn test_recursive_result_settled_by_later_arm() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let n = var(&mut c, "n");
    let test = binop(&mut c, "<", n, int(0));
    let n = var(&mut c, "n");
    let recurse = call(&mut c, "done", vec![n]);
    let body = Ast::conditional(test, recurse, boolean(true), loc());
    let mut ast = function(&mut c, "done", &[("n", int_ty)], vec![body]);

    let ty = c.typecheck(&mut ast).unwrap();
    assert_eq!(c.display_type(ty), "fn(Integer) -> Boolean");
}

#[test]
fn test_recursive_result_must_match_body() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let n = var(&mut c, "n");
    let recurse = call(&mut c, "bad", vec![n]);
    let sum = binop(&mut c, "+", recurse, int(1));
    let x = bind(&mut c, "x", sum);
    let mut ast = function(&mut c, "bad", &[("n", int_ty)], vec![x, boolean(true)]);

    let err = c.typecheck(&mut ast).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeSubstitutionInvalid);
    assert_eq!(err.detail, "'return is already Integer, cannot also be Boolean");
}

#[test]
fn test_failed_function_leaves_with_its_scope() {
    let mut c = compilation();
    let ghost = var(&mut c, "ghost");
    let bad = function(&mut c, "bad", &[], vec![ghost]);
    let mut ast = Ast::block(vec![bad], loc());

    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::NameNotBoundInScope);
    assert!(c.env.is_global());
    assert!(c.env.lookup_variable(c.strings.get("bad").unwrap()).is_err());
}

#[test]
fn test_function_redefinition_rejected() {
    let mut c = compilation();
    let f = function(&mut c, "f", &[], vec![int(1)]);
    let again = function(&mut c, "f", &[], vec![int(2)]);
    let mut program = vec![f, again];

    assert_eq!(
        check_all(&mut c, &mut program).unwrap_err().kind(),
        ErrorKind::NameAlreadyBoundInScope
    );
}

#[test]
fn test_duplicate_argument_names() {
    let mut c = compilation();
    let int_ty = c.types.integer_type();
    let mut ast = function(&mut c, "f", &[("a", int_ty), ("a", int_ty)], vec![int(1)]);

    assert_eq!(c.typecheck(&mut ast).unwrap_err().kind(), ErrorKind::NameAlreadyBoundInScope);
    // The placeholder stays false-bound in the global scope
    assert_eq!(c.env.false_bindings().len(), 1);
}

#[test]
fn test_diagnostic_rendering() {
    let mut c = compilation();
    let one = Ast::integer(1, Location::new(2, 3, 2, 4));
    let mut ast = Ast::value_of(one, Location::new(2, 2, 2, 4));

    let err = c.typecheck(&mut ast).unwrap_err();
    assert_eq!(
        c.diagnostic(&err).to_string(),
        "test.tn:2:2-4: error[CannotDereferenceNonPointer]: cannot dereference a non-pointer: \
         Integer cannot be dereferenced\n  note: reference/value error"
    );
}

#[test]
fn test_json_dump_after_check() {
    let mut c = Compilation::new(CompilationOptions::default());
    let mut ast = bind(&mut c, "x", int(30));
    c.typecheck(&mut ast).unwrap();

    let json = ast.to_json().unwrap();
    let back: Ast = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ast);
    assert_eq!(back.cached_type(), Some(c.types.integer_type()));
}
