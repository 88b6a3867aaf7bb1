pub mod token;

use std::{path::Path, sync::OnceLock};

use parking_lot::Once;
use regex::Regex;
use thin_vec::ThinVec;

use crate::{
    errors::{Diagnostic, ErrorKind},
    lexer::token::{FIXED_SPELLINGS, Token, TokenKind, TokenStream},
};

struct PatternEntry {
    kind: TokenKind,
    regex: Regex,
}

macro_rules! pattern {
    ($kind:expr, $pattern:expr) => {
        PatternEntry {
            kind: $kind,
            regex: Regex::new($pattern).unwrap(),
        }
    };
}

static INITIALIZE: Once = Once::new();
static PATTERNS: OnceLock<Vec<PatternEntry>> = OnceLock::new();

/// Pattern-described tokens, compiled once per process. Order matters: the
/// first entry matching at the cursor wins, so float precedes integer.
fn initialize_patterns() {
    INITIALIZE.call_once(|| {
        use TokenKind as T;
        let patterns = vec![
            pattern!(T::Float, r"^[0-9]+\.[0-9]+"),
            pattern!(T::Integer, r"^[0-9]+"),
            pattern!(T::StringLiteral, r#"^"[^"\n]*""#),
            pattern!(T::CharLiteral, r"^'[^'\n]'"),
            pattern!(T::Identifier, r"^[a-zA-Z_][a-zA-Z0-9_]*"),
        ];
        let _ = PATTERNS.set(patterns);
    });
}

/// Byte-cursor lexer over a single source buffer. Produces one token per
/// `next_token` call; the `tokenize` entry point drives it to `Eof` and
/// drops comments.
pub struct Lexer<'src> {
    src: &'src str,
    filename: &'src Path,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str, filename: &'src Path) -> Self {
        initialize_patterns();
        Self {
            src,
            filename,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn remaining(&self) -> &'src str {
        &self.src[self.pos..]
    }

    /// Advance past `len` bytes of a token. Tokens never span lines, so
    /// this only moves the column.
    fn advance(&mut self, len: usize) {
        self.pos += len;
        self.col += len as u32;
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.src.as_bytes().get(self.pos) {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.col = 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c' => {
                    self.col += 1;
                    self.pos += 1;
                }
                _ => break,
            }
        }
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(kind, message)
            .at(self.line, self.col)
            .in_file(self.filename)
    }

    /// `// ...` to end of line. The lexeme is the comment text without the
    /// leading slashes.
    fn handle_comment(&mut self) -> Option<Token> {
        if !self.remaining().starts_with("//") {
            return None;
        }
        let (line, col) = (self.line, self.col);
        let rest = self.remaining();
        let len = rest.find('\n').unwrap_or(rest.len());
        let text = &rest[2..len];
        self.advance(len);
        Some(Token::new(TokenKind::Comment, text, line, col))
    }

    /// Longest fixed-spelling match. Spellings that start like an
    /// identifier (keywords, primitive names) must not be a prefix of a
    /// longer identifier; punctuation has no boundary rule.
    fn handle_fixed_spellings(&mut self) -> Option<Token> {
        let rest = self.remaining();
        let bytes = rest.as_bytes();
        let mut best: Option<(&'static str, TokenKind)> = None;

        for &(spelling, kind) in FIXED_SPELLINGS {
            if !rest.starts_with(spelling) {
                continue;
            }

            let first = spelling.as_bytes()[0];
            if first.is_ascii_alphabetic() || first == b'_' {
                if let Some(&next) = bytes.get(spelling.len())
                    && (next.is_ascii_alphanumeric() || next == b'_')
                {
                    continue;
                }
            }

            if best.is_none_or(|(b, _)| spelling.len() > b.len()) {
                best = Some((spelling, kind));
            }
        }

        best.map(|(spelling, kind)| {
            let token = Token::new(kind, spelling, self.line, self.col);
            self.advance(spelling.len());
            token
        })
    }

    fn handle_patterns(&mut self) -> Option<Token> {
        let rest = self.remaining();
        let patterns = PATTERNS.get().expect("lexer patterns not initialized");
        for entry in patterns.iter() {
            if let Some(mat) = entry.regex.find(rest)
                && mat.start() == 0
            {
                let token = Token::new(entry.kind, mat.as_str(), self.line, self.col);
                self.advance(mat.len());
                return Some(token);
            }
        }
        None
    }

    pub fn next_token(&mut self) -> Result<Token, Diagnostic> {
        self.skip_whitespace();

        if self.at_eof() {
            return Ok(Token::new(TokenKind::Eof, "", self.line, self.col));
        }

        if let Some(comment) = self.handle_comment() {
            return Ok(comment);
        }

        if let Some(fixed) = self.handle_fixed_spellings() {
            return Ok(fixed);
        }

        if let Some(token) = self.handle_patterns() {
            return Ok(token);
        }

        let next = self.remaining().chars().next().unwrap_or('\0');
        if next == '"' {
            return Err(self.error(
                ErrorKind::UnterminatedString,
                "unterminated string literal",
            ));
        }

        // One unknown byte becomes an error token; the caller decides how
        // to surface it.
        let token = Token::new(
            TokenKind::Unknown,
            next.to_string(),
            self.line,
            self.col,
        );
        self.advance(next.len_utf8());
        Ok(token)
    }
}

/// Lex a whole buffer. Comments are filtered out; the stream always ends
/// with an `Eof` token. The first unknown byte or unterminated string
/// aborts lexing.
pub fn tokenize(src: &str, filename: &Path) -> Result<TokenStream, Diagnostic> {
    let mut lexer = Lexer::new(src, filename);
    let mut tokens: ThinVec<Token> = ThinVec::new();

    loop {
        let token = lexer.next_token()?;
        match token.kind {
            TokenKind::Comment => continue,
            TokenKind::Unknown => {
                return Err(Diagnostic::new(
                    ErrorKind::UnknownToken,
                    format!("unknown token '{}'", token.lexeme),
                )
                .with_token(token)
                .in_file(filename));
            }
            TokenKind::Eof => {
                tokens.push(token);
                break;
            }
            _ => tokens.push(token),
        }
    }

    Ok(tokens.into())
}
