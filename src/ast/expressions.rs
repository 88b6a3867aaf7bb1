use thin_vec::ThinVec;

use crate::ast::{AssignOp, BinaryOp, Expr, PostfixOp, UnaryOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Float,
    Bool,
    Str,
    Char,
}

/// Literals keep their exact source spelling; numeric values are extracted
/// where a pass needs them (array sizes during type lowering).
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub kind: LiteralKind,
    pub value: Box<str>,
}

impl LiteralExpr {
    /// The literal's integer value, or `None` for non-integer literals.
    pub fn integer_value(&self) -> Option<usize> {
        if self.kind != LiteralKind::Integer {
            return None;
        }
        self.value.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: Box<str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub operand: Box<Expr>,
    pub op: PostfixOp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Box<Expr>,
    pub op: AssignOp,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: ThinVec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
}

/// `{ a, b, { c } }` where elements are expressions or nested lists. A
/// trailing comma is a parse error; `{}` is legal.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerListExpr {
    pub elements: ThinVec<Expr>,
}
