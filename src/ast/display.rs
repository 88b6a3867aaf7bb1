//! Indented tree dump for the `--ast` flag.

use std::fmt::{self, Display, Formatter};

use crate::ast::{
    Expr, ExprKind, Program, Stmt, StmtKind,
    expressions::LiteralKind,
    statements::{BlockStmt, ForInit},
};

const STEP: usize = 2;

fn pad(f: &mut Formatter<'_>, indent: usize) -> fmt::Result {
    write!(f, "{:indent$}", "")
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;
        for decl in &self.declarations {
            write_stmt(f, decl, STEP)?;
        }
        Ok(())
    }
}

fn write_block(f: &mut Formatter<'_>, block: &BlockStmt, indent: usize) -> fmt::Result {
    pad(f, indent)?;
    writeln!(f, "Block")?;
    for stmt in &block.statements {
        write_stmt(f, stmt, indent + STEP)?;
    }
    Ok(())
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, indent: usize) -> fmt::Result {
    match &stmt.kind {
        StmtKind::VarDecl(decl) => {
            pad(f, indent)?;
            writeln!(f, "VariableDeclaration '{}' : {}", decl.name, decl.declared_type)?;
            if let Some(init) = &decl.initializer {
                write_expr(f, init, indent + STEP)?;
            }
            Ok(())
        }
        StmtKind::FnDecl(decl) => {
            pad(f, indent)?;
            writeln!(f, "FunctionDeclaration '{}'", decl.name)?;
            for param in &decl.params {
                pad(f, indent + STEP)?;
                writeln!(f, "Param '{}' : {}", param.name, param.declared_type)?;
            }
            if let Some(ret) = &decl.return_type {
                pad(f, indent + STEP)?;
                writeln!(f, "ReturnType {ret}")?;
            }
            write_block(f, &decl.body, indent + STEP)
        }
        StmtKind::Block(block) => write_block(f, block, indent),
        StmtKind::If(if_stmt) => {
            pad(f, indent)?;
            writeln!(f, "If")?;
            write_expr(f, &if_stmt.condition, indent + STEP)?;
            write_block(f, &if_stmt.then_branch, indent + STEP)?;
            if let Some(else_branch) = &if_stmt.else_branch {
                pad(f, indent)?;
                writeln!(f, "Else")?;
                write_stmt(f, else_branch, indent + STEP)?;
            }
            Ok(())
        }
        StmtKind::While(while_stmt) => {
            pad(f, indent)?;
            writeln!(f, "While")?;
            write_expr(f, &while_stmt.condition, indent + STEP)?;
            write_block(f, &while_stmt.body, indent + STEP)
        }
        StmtKind::For(for_stmt) => {
            pad(f, indent)?;
            writeln!(f, "For")?;
            match &for_stmt.init {
                Some(ForInit::Declaration(decl)) => {
                    pad(f, indent + STEP)?;
                    writeln!(f, "Init VariableDeclaration '{}' : {}", decl.name, decl.declared_type)?;
                    if let Some(init) = &decl.initializer {
                        write_expr(f, init, indent + 2 * STEP)?;
                    }
                }
                Some(ForInit::Expression(expr)) => {
                    pad(f, indent + STEP)?;
                    writeln!(f, "Init")?;
                    write_expr(f, expr, indent + 2 * STEP)?;
                }
                None => {}
            }
            if let Some(cond) = &for_stmt.condition {
                pad(f, indent + STEP)?;
                writeln!(f, "Condition")?;
                write_expr(f, cond, indent + 2 * STEP)?;
            }
            if let Some(post) = &for_stmt.post {
                pad(f, indent + STEP)?;
                writeln!(f, "Post")?;
                write_expr(f, post, indent + 2 * STEP)?;
            }
            write_block(f, &for_stmt.body, indent + STEP)
        }
        StmtKind::Return(ret) => {
            pad(f, indent)?;
            writeln!(f, "Return")?;
            if let Some(value) = &ret.value {
                write_expr(f, value, indent + STEP)?;
            }
            Ok(())
        }
        StmtKind::Break => {
            pad(f, indent)?;
            writeln!(f, "Break")
        }
        StmtKind::Continue => {
            pad(f, indent)?;
            writeln!(f, "Continue")
        }
        StmtKind::Expression(expr_stmt) => {
            pad(f, indent)?;
            writeln!(f, "ExpressionStatement")?;
            write_expr(f, &expr_stmt.expression, indent + STEP)
        }
    }
}

fn write_expr(f: &mut Formatter<'_>, expr: &Expr, indent: usize) -> fmt::Result {
    match &expr.kind {
        ExprKind::Literal(lit) => {
            pad(f, indent)?;
            let label = match lit.kind {
                LiteralKind::Integer => "Integer",
                LiteralKind::Float => "Float",
                LiteralKind::Bool => "Bool",
                LiteralKind::Str => "String",
                LiteralKind::Char => "Char",
            };
            writeln!(f, "{label} {}", lit.value)
        }
        ExprKind::Symbol(symbol) => {
            pad(f, indent)?;
            writeln!(f, "Identifier '{}'", symbol.name)
        }
        ExprKind::Binary(binary) => {
            pad(f, indent)?;
            writeln!(f, "Binary '{}'", binary.op)?;
            write_expr(f, &binary.left, indent + STEP)?;
            write_expr(f, &binary.right, indent + STEP)
        }
        ExprKind::Unary(unary) => {
            pad(f, indent)?;
            writeln!(f, "Unary '{}'", unary.op)?;
            write_expr(f, &unary.operand, indent + STEP)
        }
        ExprKind::Postfix(postfix) => {
            pad(f, indent)?;
            writeln!(f, "Postfix '{}'", postfix.op)?;
            write_expr(f, &postfix.operand, indent + STEP)
        }
        ExprKind::Assignment(assign) => {
            pad(f, indent)?;
            writeln!(f, "Assignment '{}'", assign.op)?;
            write_expr(f, &assign.target, indent + STEP)?;
            write_expr(f, &assign.value, indent + STEP)
        }
        ExprKind::Call(call) => {
            pad(f, indent)?;
            writeln!(f, "Call")?;
            write_expr(f, &call.callee, indent + STEP)?;
            for arg in &call.arguments {
                write_expr(f, arg, indent + STEP)?;
            }
            Ok(())
        }
        ExprKind::Subscript(subscript) => {
            pad(f, indent)?;
            writeln!(f, "Subscript")?;
            write_expr(f, &subscript.target, indent + STEP)?;
            write_expr(f, &subscript.index, indent + STEP)
        }
        ExprKind::InitializerList(list) => {
            pad(f, indent)?;
            writeln!(f, "InitializerList")?;
            for element in &list.elements {
                write_expr(f, element, indent + STEP)?;
            }
            Ok(())
        }
    }
}
