mod expr;
mod lookups;
mod stmt;
mod types;

use std::path::{Path, PathBuf};

use thin_vec::ThinVec;

use crate::{
    ast::Program,
    errors::{Diagnostic, ErrorKind},
    lexer::token::{Token, TokenKind, TokenStream},
    parser::{lookups::create_token_lookups, stmt::parse_declaration},
};

pub struct Parser {
    tokens: ThinVec<Token>,
    pos: usize,
    filename: PathBuf,
}

impl Parser {
    pub fn new(tokens: TokenStream, filename: &Path) -> Self {
        Parser {
            tokens: tokens.0,
            pos: 0,
            filename: filename.to_path_buf(),
        }
    }

    pub fn current_token(&self) -> Token {
        if self.pos < self.tokens.len() {
            self.tokens[self.pos].clone()
        } else {
            // Lexing always terminates the stream with Eof; synthesize one
            // if a caller runs past it anyway.
            let last = self.tokens.last();
            Token::new(
                TokenKind::Eof,
                "",
                last.map_or(1, |t| t.line),
                last.map_or(1, |t| t.col),
            )
        }
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn peek(&self) -> Token {
        if self.pos + 1 < self.tokens.len() {
            self.tokens[self.pos + 1].clone()
        } else {
            self.current_token()
        }
    }

    pub fn advance(&mut self) -> Token {
        let current = self.current_token();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        current
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_kind() != TokenKind::Eof
    }

    fn previous_token(&self) -> Option<Token> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .cloned()
    }

    /// A diagnostic anchored at the current token.
    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(kind, message)
            .with_token(self.current_token())
            .in_file(&self.filename)
    }

    /// A diagnostic for a missing terminator: the caret belongs after the
    /// previous token rather than under the one we found instead.
    pub fn error_after_previous(
        &self,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Diagnostic {
        self.error(kind, message)
            .underline_previous(self.previous_token())
    }

    pub fn expect(&mut self, expected: TokenKind) -> Result<Token, Diagnostic> {
        let token = self.current_token();
        if token.kind != expected {
            return Err(self.error(
                ErrorKind::ExpectedToken,
                format!("expected {} but found {}", expected, token.kind),
            ));
        }
        Ok(self.advance())
    }

    pub fn expect_msg(&mut self, expected: TokenKind, message: &str) -> Result<Token, Diagnostic> {
        let token = self.current_token();
        if token.kind != expected {
            return Err(self.error(ErrorKind::ExpectedToken, message));
        }
        Ok(self.advance())
    }

    /// Like `expect_msg` for statement terminators, anchoring the caret
    /// after the previous token.
    pub fn expect_terminator(&mut self, message: &str) -> Result<Token, Diagnostic> {
        let token = self.current_token();
        if token.kind != TokenKind::Semicolon {
            return Err(self.error_after_previous(ErrorKind::ExpectedToken, message));
        }
        Ok(self.advance())
    }
}

/// Parse a comment-free token stream into a program. Single pass, one
/// token of lookahead; the first error aborts and surfaces as the run's
/// only diagnostic.
pub fn parse(tokens: TokenStream, filename: &Path) -> Result<Program, Diagnostic> {
    create_token_lookups();

    let mut parser = Parser::new(tokens, filename);
    let mut declarations = ThinVec::new();

    while parser.has_tokens() {
        declarations.push(parse_declaration(&mut parser)?);
    }

    if parser.current_kind() == TokenKind::Eof {
        parser.advance();
    }
    if parser.pos < parser.tokens.len() {
        return Err(parser.error(
            ErrorKind::TrailingTokens,
            "unexpected tokens after program end",
        ));
    }

    Ok(Program { declarations })
}
