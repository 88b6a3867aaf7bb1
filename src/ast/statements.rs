use thin_vec::ThinVec;

use crate::ast::{Expr, Stmt, types::AstType};

/// `name ':' 'const'? Type ('=' initializer)?`
///
/// The `const` qualifier lives on the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub name: Box<str>,
    pub declared_type: AstType,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Box<str>,
    pub declared_type: AstType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: Box<str>,
    pub params: ThinVec<Param>,
    pub return_type: Option<AstType>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub statements: ThinVec<Stmt>,
}

/// `else` chains either to a nested `If` statement or to a block; both are
/// represented as the boxed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: BlockStmt,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(VarDeclStmt),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub condition: Option<Expr>,
    pub post: Option<Expr>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}
