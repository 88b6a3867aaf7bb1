use std::fmt::{self, Display};

use thin_vec::ThinVec;

use crate::ast::Expr;

/// A syntactic type as written in source. Suffixes are recorded on the
/// record itself in the order the grammar admits them: pointer stars before
/// the first dimension, the dimensions, then trailing stars. Grouping
/// (`(T)`) is its own case so suffixes can bind to the whole group:
///
/// ```text
/// i32*[10]    array of 10 pointers to i32
/// (i32[10])*  pointer to an array of 10 i32
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AstType {
    pub kind: AstTypeKind,
    pub is_const: bool,
    pub pre_stars: usize,
    /// One entry per `[...]` suffix; `None` is an unsized `[]`.
    pub dimensions: ThinVec<Option<Expr>>,
    pub post_stars: usize,
}

impl AstType {
    pub fn new(kind: AstTypeKind) -> Self {
        Self {
            kind,
            is_const: false,
            pre_stars: 0,
            dimensions: ThinVec::new(),
            post_stars: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstTypeKind {
    /// A primitive or user-written type name.
    Named(NamedType),
    /// `fn '(' (Type (',' Type)*)? ')' ('->' Type)?`
    Function(FunctionType),
    /// `'(' Type ')'`
    Grouped(GroupedType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: Box<str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: ThinVec<AstType>,
    pub return_type: Option<Box<AstType>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedType {
    pub inner: Box<AstType>,
}

impl Display for AstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }

        match &self.kind {
            AstTypeKind::Named(named) => write!(f, "{}", named.name)?,
            AstTypeKind::Function(func) => {
                write!(f, "fn(")?;
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")?;
                if let Some(ret) = &func.return_type {
                    write!(f, " -> {ret}")?;
                }
            }
            AstTypeKind::Grouped(group) => write!(f, "({})", group.inner)?,
        }

        for _ in 0..self.pre_stars {
            write!(f, "*")?;
        }
        for dim in &self.dimensions {
            match dim {
                // The dump shows sized dimensions only when they are
                // literal; anything else renders as its unresolved form.
                Some(expr) => match &expr.kind {
                    crate::ast::ExprKind::Literal(lit) => write!(f, "[{}]", lit.value)?,
                    _ => write!(f, "[?]")?,
                },
                None => write!(f, "[]")?,
            }
        }
        for _ in 0..self.post_stars {
            write!(f, "*")?;
        }

        Ok(())
    }
}
