use thin_vec::ThinVec;

use crate::{
    ast::{
        Stmt, StmtKind,
        statements::{
            BlockStmt, ExpressionStmt, FnDeclStmt, ForInit, ForStmt, IfStmt, Param, ReturnStmt,
            VarDeclStmt, WhileStmt,
        },
    },
    errors::{Diagnostic, ErrorKind},
    lexer::token::TokenKind,
    parser::{
        Parser,
        expr::{parse_expr, parse_initializer_list},
        lookups::{BindingPower, STMT_LU},
        types::parse_type,
    },
};

/// Top-level dispatch: `fn` opens a function declaration, an identifier a
/// variable declaration; nothing else may appear at the top level.
pub fn parse_declaration(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    match parser.current_kind() {
        TokenKind::Fn => parse_fn_declaration(parser),
        TokenKind::Identifier => parse_var_decl_stmt(parser),
        _ => Err(parser.error(
            ErrorKind::ExpectedToken,
            "Expected function or variable declaration",
        )),
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let stmt_fn = {
        let stmt_lu = STMT_LU.get().expect("parser lookups not initialized");
        stmt_lu.get(&parser.current_kind()).copied()
    };

    match stmt_fn {
        Some(stmt_fn) => stmt_fn(parser),
        None => parse_expression_stmt(parser),
    }
}

/// `IDENT ':'` starts a declaration; any other second token means the
/// identifier opens an expression statement. The only place the parser
/// looks two tokens ahead.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    if parser.peek().kind == TokenKind::Colon {
        parse_var_decl_stmt(parser)
    } else {
        parse_expression_stmt(parser)
    }
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let expression = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_terminator("expected ';' at end of expression statement")?;
    Ok(Stmt::new(StmtKind::Expression(ExpressionStmt {
        expression,
    })))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let decl = parse_variable_declaration(parser)?;
    parser.expect_terminator("expected a semicolon at declaration end")?;
    Ok(Stmt::new(StmtKind::VarDecl(decl)))
}

/// `IDENT ':' 'const'? Type ('=' (Expression | InitializerList))?`
///
/// The terminating semicolon belongs to the caller, so for-loop inits can
/// reuse this directly.
fn parse_variable_declaration(parser: &mut Parser) -> Result<VarDeclStmt, Diagnostic> {
    let name = parser
        .expect_msg(
            TokenKind::Identifier,
            "expected identifier in variable declaration",
        )?
        .lexeme;
    parser.expect_msg(TokenKind::Colon, "expected ':' after variable name")?;

    let declared_type = parse_type(parser)?;

    let initializer = if parser.current_kind() == TokenKind::Assign {
        parser.advance();
        let init = if parser.current_kind() == TokenKind::OpenCurly {
            parse_initializer_list(parser)?
        } else {
            parse_expr(parser, BindingPower::DefaultBp)?
        };
        Some(init)
    } else {
        None
    };

    Ok(VarDeclStmt {
        name,
        declared_type,
        initializer,
    })
}

/// `'fn' IDENT '(' ParamList? ')' ('->' Type)? Block`
pub fn parse_fn_declaration(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect_msg(TokenKind::Fn, "expected 'fn' keyword")?;
    let name = parser
        .expect_msg(TokenKind::Identifier, "expected function name")?
        .lexeme;

    parser.expect_msg(TokenKind::OpenParen, "expected '(' after function name")?;
    let mut params: ThinVec<Param> = ThinVec::new();
    while parser.current_kind() != TokenKind::CloseParen {
        if parser.current_kind() == TokenKind::Eof {
            return Err(parser.error(
                ErrorKind::ExpectedToken,
                "unexpected end of input in parameter list",
            ));
        }

        let param_name = parser
            .expect_msg(
                TokenKind::Identifier,
                "expected identifier for parameter name",
            )?
            .lexeme;
        parser.expect_msg(TokenKind::Colon, "expected ':' after parameter name")?;
        let declared_type = parse_type(parser)?;
        params.push(Param {
            name: param_name,
            declared_type,
        });

        if parser.current_kind() != TokenKind::CloseParen {
            parser.expect_msg(TokenKind::Comma, "expected a ',' or ')'")?;
        }
    }
    parser.expect_msg(
        TokenKind::CloseParen,
        "expected ')' after function parameters",
    )?;

    let return_type = if parser.current_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Stmt::new(StmtKind::FnDecl(FnDeclStmt {
        name,
        params,
        return_type,
        body,
    })))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    Ok(Stmt::new(StmtKind::Block(parse_block(parser)?)))
}

fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Diagnostic> {
    parser.expect_msg(TokenKind::OpenCurly, "expected '{' to start block")?;

    let mut statements: ThinVec<Stmt> = ThinVec::new();
    loop {
        match parser.current_kind() {
            TokenKind::Eof => {
                return Err(parser.error(
                    ErrorKind::ExpectedToken,
                    "unexpected end of input in block",
                ));
            }
            TokenKind::CloseCurly => {
                parser.advance();
                break;
            }
            _ => statements.push(parse_stmt(parser)?),
        }
    }

    Ok(BlockStmt { statements })
}

/// Control-flow bodies are always braced blocks; `else` chains to another
/// `if` or to a block.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect(TokenKind::If)?;
    parser.expect_msg(TokenKind::OpenParen, "expected '(' after 'if'")?;
    let condition = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_msg(TokenKind::CloseParen, "expected ')' after if condition")?;

    let then_branch = parse_block(parser)?;

    let else_branch = if parser.current_kind() == TokenKind::Else {
        parser.advance();
        let branch = if parser.current_kind() == TokenKind::If {
            parse_if_stmt(parser)?
        } else {
            parse_block_stmt(parser)?
        };
        Some(Box::new(branch))
    } else {
        None
    };

    Ok(Stmt::new(StmtKind::If(IfStmt {
        condition,
        then_branch,
        else_branch,
    })))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect(TokenKind::While)?;
    parser.expect_msg(TokenKind::OpenParen, "expected '(' after 'while'")?;
    let condition = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_msg(TokenKind::CloseParen, "expected ')' after while condition")?;
    let body = parse_block(parser)?;

    Ok(Stmt::new(StmtKind::While(WhileStmt { condition, body })))
}

/// `'for' '(' ForInit? ';' Expression? ';' Expression? ')' Block`
///
/// After the init, declaration or expression, exactly one ';' is consumed
/// here.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect(TokenKind::For)?;
    parser.expect_msg(TokenKind::OpenParen, "expected '(' after 'for'")?;

    let init = if parser.current_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else if parser.current_kind() == TokenKind::Identifier
        && parser.peek().kind == TokenKind::Colon
    {
        let decl = parse_variable_declaration(parser)?;
        parser.expect_terminator("expected ';' after for-init declaration")?;
        Some(ForInit::Declaration(decl))
    } else {
        let expr = parse_expr(parser, BindingPower::DefaultBp)?;
        parser.expect_terminator("expected ';' after for-init expression")?;
        Some(ForInit::Expression(expr))
    };

    let condition = if parser.current_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else {
        let cond = parse_expr(parser, BindingPower::DefaultBp)?;
        parser.expect_terminator("expected ';' after for-condition")?;
        Some(cond)
    };

    let post = if parser.current_kind() == TokenKind::CloseParen {
        parser.advance();
        None
    } else {
        let post = parse_expr(parser, BindingPower::DefaultBp)?;
        parser.expect_msg(
            TokenKind::CloseParen,
            "expected ')' after for-post expression",
        )?;
        Some(post)
    };

    let body = parse_block(parser)?;

    Ok(Stmt::new(StmtKind::For(ForStmt {
        init,
        condition,
        post,
        body,
    })))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect(TokenKind::Return)?;

    let value = if parser.current_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::DefaultBp)?)
    } else {
        None
    };

    parser.expect_terminator("expected ';' after return")?;
    Ok(Stmt::new(StmtKind::Return(ReturnStmt { value })))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect(TokenKind::Break)?;
    parser.expect_terminator("expected ';' after break")?;
    Ok(Stmt::new(StmtKind::Break))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    parser.expect(TokenKind::Continue)?;
    parser.expect_terminator("expected ';' after continue")?;
    Ok(Stmt::new(StmtKind::Continue))
}
