use thin_vec::ThinVec;

use crate::{
    ast::types::{AstType, AstTypeKind, FunctionType, GroupedType, NamedType},
    errors::{Diagnostic, ErrorKind},
    lexer::token::TokenKind,
    parser::{Parser, expr::parse_expr, lookups::BindingPower},
};

/// `Type ::= 'const'? TypeAtom ('*')* ('[' Expr? ']')* ('*')*`
///
/// The suffixes land on the atom's own record; grouping introduces a fresh
/// record so `(i32[10])*` and `i32*[10]` reconstruct differently during
/// lowering.
pub fn parse_type(parser: &mut Parser) -> Result<AstType, Diagnostic> {
    let is_const = parser.current_kind() == TokenKind::Const;
    if is_const {
        parser.advance();
    }

    let mut ast_type = parse_type_atom(parser)?;
    ast_type.is_const = is_const;
    parse_type_suffixes(parser, &mut ast_type)?;

    Ok(ast_type)
}

fn parse_type_atom(parser: &mut Parser) -> Result<AstType, Diagnostic> {
    let token = parser.current_token();

    if token.kind.is_primitive_type() || token.kind == TokenKind::Identifier {
        parser.advance();
        return Ok(AstType::new(AstTypeKind::Named(NamedType {
            name: token.lexeme,
        })));
    }

    match token.kind {
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_type(parser)?;
            parser.expect_msg(TokenKind::CloseParen, "expected ')' after grouped type")?;
            Ok(AstType::new(AstTypeKind::Grouped(GroupedType {
                inner: Box::new(inner),
            })))
        }
        TokenKind::Fn => parse_function_type(parser),
        _ => Err(parser.error(
            ErrorKind::ExpectedToken,
            "expected base type (i32, f64, ...), 'fn', or '(' in type",
        )),
    }
}

/// `'fn' '(' (Type (',' Type)*)? ')' ('->' Type)?`
///
/// The return type is parsed greedily, so its own suffixes belong to it;
/// group the function type to apply suffixes to the function itself.
fn parse_function_type(parser: &mut Parser) -> Result<AstType, Diagnostic> {
    parser.expect(TokenKind::Fn)?;
    parser.expect_msg(TokenKind::OpenParen, "expected '(' in function type")?;

    let mut params: ThinVec<AstType> = ThinVec::new();
    while parser.current_kind() != TokenKind::CloseParen {
        if parser.current_kind() == TokenKind::Eof {
            return Err(parser.error(
                ErrorKind::ExpectedToken,
                "unexpected end of input in function type",
            ));
        }

        params.push(parse_type(parser)?);

        if parser.current_kind() != TokenKind::CloseParen {
            parser.expect_msg(TokenKind::Comma, "expected a ',' or ')'")?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_kind() == TokenKind::Arrow {
        parser.advance();
        Some(Box::new(parse_type(parser)?))
    } else {
        None
    };

    Ok(AstType::new(AstTypeKind::Function(FunctionType {
        params,
        return_type,
    })))
}

fn parse_type_suffixes(parser: &mut Parser, ast_type: &mut AstType) -> Result<(), Diagnostic> {
    while parser.current_kind() == TokenKind::Star {
        ast_type.pre_stars += 1;
        parser.advance();
    }

    while parser.current_kind() == TokenKind::OpenBracket {
        parser.advance();
        if parser.current_kind() == TokenKind::CloseBracket {
            parser.advance();
            ast_type.dimensions.push(None);
        } else {
            let size_expr = parse_expr(parser, BindingPower::DefaultBp)?;
            parser.expect_msg(TokenKind::CloseBracket, "expected ']' after array size")?;
            ast_type.dimensions.push(Some(size_expr));
        }
    }

    while parser.current_kind() == TokenKind::Star {
        ast_type.post_stars += 1;
        parser.advance();
    }

    Ok(())
}
