// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::path::Path;

use micac::{
    ast::Program,
    errors::Diagnostic,
    lexer::tokenize,
    parser::parse,
    semantics::scope::{Scope, bind_global_symbols},
};

pub const TEST_FILE: &str = "test.mica";

pub fn parse_source(src: &str) -> Result<Program, Diagnostic> {
    let path = Path::new(TEST_FILE);
    let tokens = tokenize(src, path)?;
    parse(tokens, path)
}

/// Run the whole front-end pipeline and hand back the populated global
/// scope.
pub fn compile(src: &str) -> Result<Scope<'static>, Diagnostic> {
    let program = parse_source(src)?;
    let mut scope = Scope::new();
    bind_global_symbols(&mut scope, &program)?;
    Ok(scope)
}

/// Type of a global variable, as its canonical string form.
pub fn variable_type(scope: &Scope<'_>, name: &str) -> String {
    scope
        .variables
        .get(name)
        .unwrap_or_else(|| panic!("variable '{name}' not bound"))
        .sem_type
        .to_string()
}

/// Type of a global function, as its canonical string form.
pub fn function_type(scope: &Scope<'_>, name: &str) -> String {
    scope
        .functions
        .get(name)
        .unwrap_or_else(|| panic!("function '{name}' not bound"))
        .sem_type
        .to_string()
}
