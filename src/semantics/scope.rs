use std::fmt::{self, Display};

use crate::{
    ast::{Program, StmtKind},
    errors::{Diagnostic, ErrorKind},
    semantics::{
        lower::{lower_function, lower_type},
        symbol_table::{Symbol, SymbolTable},
    },
};

/// A lexical scope: functions and variables live in disjoint tables, so a
/// function and a variable may share a name. `parent` is a non-owning
/// back-reference; only the global scope is populated for now, and
/// function-body scopes will nest under it.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    pub functions: SymbolTable,
    pub variables: SymbolTable,
    pub parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: &'a Scope<'a>) -> Self {
        Self {
            functions: SymbolTable::new(),
            variables: SymbolTable::new(),
            parent: Some(parent),
        }
    }
}

/// Walk the top-level declarations in source order, lower each signature or
/// declared type, and bind one symbol per declaration. The first redefined
/// name within a table aborts the pass.
pub fn bind_global_symbols(scope: &mut Scope<'_>, program: &Program) -> Result<(), Diagnostic> {
    for decl in &program.declarations {
        match &decl.kind {
            StmtKind::FnDecl(fn_decl) => {
                if scope.functions.get(&fn_decl.name).is_some() {
                    return Err(Diagnostic::new(
                        ErrorKind::DuplicateSymbol,
                        format!("duplicate function '{}'", fn_decl.name),
                    ));
                }
                let sem_type = lower_function(fn_decl);
                scope
                    .functions
                    .insert(Symbol::new(fn_decl.name.as_ref(), sem_type));
            }
            StmtKind::VarDecl(var_decl) => {
                if scope.variables.get(&var_decl.name).is_some() {
                    return Err(Diagnostic::new(
                        ErrorKind::DuplicateSymbol,
                        format!("duplicate variable '{}'", var_decl.name),
                    ));
                }
                let sem_type = lower_type(&var_decl.declared_type);
                scope
                    .variables
                    .insert(Symbol::new(var_decl.name.as_ref(), sem_type));
            }
            _ => {}
        }
    }
    Ok(())
}

impl Display for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "globalScope")?;
        writeln!(f, "  Functions:")?;
        for symbol in self.functions.sorted() {
            writeln!(f, "    {} : {}", symbol.name, symbol.sem_type)?;
        }
        writeln!(f, "  Variables:")?;
        for symbol in self.variables.sorted() {
            writeln!(f, "    {} : {}", symbol.name, symbol.sem_type)?;
        }
        Ok(())
    }
}
