use thin_vec::ThinVec;

use crate::{
    ast::{
        AssignOp, BinaryOp, Expr, ExprKind, PostfixOp, UnaryOp,
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, InitializerListExpr, LiteralExpr, LiteralKind,
            PostfixExpr, SubscriptExpr, SymbolExpr, UnaryExpr,
        },
    },
    errors::{Diagnostic, ErrorKind},
    lexer::token::TokenKind,
    parser::{
        Parser,
        lookups::{BP_LU, BindingPower, LED_LU, NUD_LU},
    },
};

fn binary_op(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::EqualsEquals => BinaryOp::Eq,
        TokenKind::BangEquals => BinaryOp::Ne,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::LessEquals => BinaryOp::Le,
        TokenKind::GreaterEquals => BinaryOp::Ge,
        TokenKind::AndAnd => BinaryOp::And,
        TokenKind::OrOr => BinaryOp::Or,
        other => unreachable!("token {other:?} is not registered as a binary operator"),
    }
}

fn prefix_op(kind: TokenKind) -> UnaryOp {
    match kind {
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Minus => UnaryOp::Minus,
        TokenKind::Bang => UnaryOp::Not,
        TokenKind::Star => UnaryOp::Deref,
        TokenKind::Amp => UnaryOp::AddrOf,
        TokenKind::PlusPlus => UnaryOp::PreInc,
        TokenKind::MinusMinus => UnaryOp::PreDec,
        other => unreachable!("token {other:?} is not registered as a prefix operator"),
    }
}

fn assign_op(kind: TokenKind) -> AssignOp {
    match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::PlusEquals => AssignOp::AddAssign,
        TokenKind::MinusEquals => AssignOp::SubAssign,
        TokenKind::StarEquals => AssignOp::MulAssign,
        TokenKind::SlashEquals => AssignOp::DivAssign,
        TokenKind::PercentEquals => AssignOp::ModAssign,
        other => unreachable!("token {other:?} is not registered as an assignment operator"),
    }
}

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    let token = parser.current_token();

    let nud_fn = {
        let nud_lu = NUD_LU.get().expect("parser lookups not initialized");
        nud_lu.get(&token.kind).copied()
    };
    let Some(nud_fn) = nud_fn else {
        return Err(parser.error(
            ErrorKind::ExpectedToken,
            "expected primary expression (literal, identifier, or parenthesized expression)",
        ));
    };

    let mut left = nud_fn(parser)?;

    loop {
        let current_bp = {
            let bp_lu = BP_LU.get().expect("parser lookups not initialized");
            *bp_lu
                .get(&parser.current_kind())
                .unwrap_or(&BindingPower::DefaultBp)
        };

        if current_bp <= bp {
            break;
        }

        let led_fn = {
            let led_lu = LED_LU.get().expect("parser lookups not initialized");
            led_lu
                .get(&parser.current_kind())
                .copied()
                .expect("binding power registered without a led handler")
        };

        left = led_fn(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.advance();
    let kind = match token.kind {
        TokenKind::Integer => ExprKind::Literal(LiteralExpr {
            kind: LiteralKind::Integer,
            value: token.lexeme,
        }),
        TokenKind::Float => ExprKind::Literal(LiteralExpr {
            kind: LiteralKind::Float,
            value: token.lexeme,
        }),
        TokenKind::True | TokenKind::False => ExprKind::Literal(LiteralExpr {
            kind: LiteralKind::Bool,
            value: token.lexeme,
        }),
        TokenKind::StringLiteral => ExprKind::Literal(LiteralExpr {
            kind: LiteralKind::Str,
            value: token.lexeme,
        }),
        TokenKind::CharLiteral => ExprKind::Literal(LiteralExpr {
            kind: LiteralKind::Char,
            value: token.lexeme,
        }),
        TokenKind::Identifier => ExprKind::Symbol(SymbolExpr { name: token.lexeme }),
        other => unreachable!("token {other:?} is not registered as a primary expression"),
    };
    Ok(Expr::new(kind))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_msg(
        TokenKind::CloseParen,
        "expected ')' after parenthesized expression",
    )?;
    Ok(expr)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let op = binary_op(parser.advance().kind);
    // Right operand at the operator's own power: equal-precedence
    // operators break out and rebind in the caller, left to right.
    let right = parse_expr(parser, bp)?;

    Ok(Expr::new(ExprKind::Binary(BinaryExpr {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let op = prefix_op(parser.advance().kind);
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(ExprKind::Unary(UnaryExpr {
        op,
        operand: Box::new(operand),
    })))
}

pub fn parse_postfix_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let op = match parser.advance().kind {
        TokenKind::PlusPlus => PostfixOp::Inc,
        TokenKind::MinusMinus => PostfixOp::Dec,
        other => unreachable!("token {other:?} is not registered as a postfix operator"),
    };

    Ok(Expr::new(ExprKind::Postfix(PostfixExpr {
        operand: Box::new(left),
        op,
    })))
}

/// Assignments are right-associative and demand a syntactic lvalue on the
/// left; the value is a full expression, so `a = b = c` nests rightward.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    if !left.is_lvalue() {
        return Err(parser.error(
            ErrorKind::LvalueRequired,
            "lvalue required on left side of assignment",
        ));
    }

    let op = assign_op(parser.advance().kind);
    let value = parse_expr(parser, BindingPower::DefaultBp)?;

    Ok(Expr::new(ExprKind::Assignment(AssignmentExpr {
        target: Box::new(left),
        op,
        value: Box::new(value),
    })))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments: ThinVec<Expr> = ThinVec::new();
    while parser.current_kind() != TokenKind::CloseParen {
        if parser.current_kind() == TokenKind::Eof {
            return Err(parser.error(
                ErrorKind::ExpectedToken,
                "unexpected end of input in argument list",
            ));
        }

        // Initializer lists are allowed as call arguments.
        let argument = if parser.current_kind() == TokenKind::OpenCurly {
            parse_initializer_list(parser)?
        } else {
            parse_expr(parser, BindingPower::DefaultBp)?
        };
        arguments.push(argument);

        if parser.current_kind() != TokenKind::CloseParen {
            parser.expect_msg(TokenKind::Comma, "expected a ',' or ')'")?;
        }
    }
    parser.expect_msg(TokenKind::CloseParen, "expected ')' after function arguments")?;

    Ok(Expr::new(ExprKind::Call(CallExpr {
        callee: Box::new(left),
        arguments,
    })))
}

pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::DefaultBp)?;
    parser.expect_msg(TokenKind::CloseBracket, "expected ']' after array index")?;

    Ok(Expr::new(ExprKind::Subscript(SubscriptExpr {
        target: Box::new(left),
        index: Box::new(index),
    })))
}

/// `{ elem (',' elem)* }` where elements are expressions or nested lists.
/// `{}` is legal; a trailing comma is not.
pub fn parse_initializer_list(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    parser.expect_msg(TokenKind::OpenCurly, "expected '{' to start initializer list")?;

    let mut elements: ThinVec<Expr> = ThinVec::new();

    if parser.current_kind() == TokenKind::CloseCurly {
        parser.advance();
        return Ok(Expr::new(ExprKind::InitializerList(InitializerListExpr {
            elements,
        })));
    }

    loop {
        if parser.current_kind() == TokenKind::Eof {
            return Err(parser.error(
                ErrorKind::ExpectedToken,
                "unexpected end of input in initializer list",
            ));
        }

        let element = if parser.current_kind() == TokenKind::OpenCurly {
            parse_initializer_list(parser)?
        } else {
            parse_expr(parser, BindingPower::DefaultBp)?
        };
        elements.push(element);

        match parser.current_kind() {
            TokenKind::Comma => {
                parser.advance();
                if parser.current_kind() == TokenKind::CloseCurly {
                    return Err(parser.error(
                        ErrorKind::MalformedInitializer,
                        "trailing comma not allowed in initializer list",
                    ));
                }
            }
            TokenKind::CloseCurly => {
                parser.advance();
                return Ok(Expr::new(ExprKind::InitializerList(InitializerListExpr {
                    elements,
                })));
            }
            _ => {
                return Err(parser.error(
                    ErrorKind::MalformedInitializer,
                    "expected ',' or '}' in initializer list",
                ));
            }
        }
    }
}
