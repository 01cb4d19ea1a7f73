//! Tree builders shared by the integration tests

#![allow(dead_code)]

use tern_common::Location;
use tern_frontend::{Ast, Compilation, CompilationOptions, TypeId};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn compilation() -> Compilation {
    init_logging();
    Compilation::new(CompilationOptions::new("test.tn"))
}

pub fn loc() -> Location {
    Location::dummy()
}

pub fn int(value: i64) -> Ast {
    Ast::integer(value, loc())
}

pub fn boolean(value: bool) -> Ast {
    Ast::boolean(value, loc())
}

pub fn var<F>(c: &mut Compilation<F>, name: &str) -> Ast {
    Ast::variable(c.intern(name), loc())
}

pub fn bind<F>(c: &mut Compilation<F>, name: &str, affix: Ast) -> Ast {
    Ast::bind(c.intern(name), affix, loc())
}

pub fn binop<F>(c: &mut Compilation<F>, op: &str, left: Ast, right: Ast) -> Ast {
    Ast::binop(c.intern(op), left, right, loc())
}

pub fn unop<F>(c: &mut Compilation<F>, op: &str, right: Ast) -> Ast {
    Ast::unop(c.intern(op), right, loc())
}

pub fn call<F>(c: &mut Compilation<F>, name: &str, arguments: Vec<Ast>) -> Ast {
    let callee = var(c, name);
    Ast::application(callee, arguments, loc())
}

pub fn function<F>(
    c: &mut Compilation<F>,
    name: &str,
    arguments: &[(&str, TypeId)],
    body: Vec<Ast>,
) -> Ast {
    let arguments = arguments
        .iter()
        .map(|(argument, ty)| (c.intern(argument), *ty))
        .collect();
    Ast::function(c.intern(name), arguments, Ast::block(body, loc()), loc())
}

/// Typecheck a sequence of top-level declarations, returning the last type
pub fn check_all<F>(
    c: &mut Compilation<F>,
    declarations: &mut [Ast],
) -> Result<TypeId, tern_common::CompilerError> {
    let mut last = c.types.nil_type();
    for declaration in declarations.iter_mut() {
        last = c.typecheck(declaration)?;
    }
    Ok(last)
}
