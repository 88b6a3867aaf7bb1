use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    fs,
    path::PathBuf,
};

use colored::Colorize;

use crate::lexer::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownToken,
    UnterminatedString,
    ExpectedToken,
    LvalueRequired,
    TrailingTokens,
    MalformedInitializer,
    DuplicateSymbol,
}

/// A single pipeline diagnostic. The whole front-end reports at most one of
/// these per run; every stage aborts on its first failure.
///
/// `line`/`col` anchor the caret. When `underline_previous` is set and the
/// previous token sits on an earlier line (a missing terminator), the
/// renderer shows that line instead and places the caret one column past the
/// previous token's last byte.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub found: Option<Token>,
    pub previous: Option<Token>,
    pub line: u32,
    pub col: u32,
    pub filename: PathBuf,
    pub underline_previous: bool,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            found: None,
            previous: None,
            line: 0,
            col: 0,
            filename: PathBuf::new(),
            underline_previous: false,
        }
    }

    pub fn at(mut self, line: u32, col: u32) -> Self {
        self.line = line;
        self.col = col;
        self
    }

    pub fn in_file(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.line = token.line;
        self.col = token.col;
        self.found = Some(token);
        self
    }

    pub fn underline_previous(mut self, previous: Option<Token>) -> Self {
        self.underline_previous = true;
        self.previous = previous;
        self
    }

    /// The line to print and the 1-based caret column on it.
    fn caret_anchor(&self) -> (u32, usize) {
        if self.underline_previous
            && let Some(prev) = &self.previous
            && prev.line > 0
            && prev.line < self.line
        {
            return (prev.line, prev.col as usize + prev.lexeme.len());
        }
        (self.line, self.col.max(1) as usize)
    }

    fn write_snippet(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (display_line, caret_col) = self.caret_anchor();
        if display_line == 0 {
            return Ok(());
        }

        let Ok(content) = fs::read_to_string(&self.filename) else {
            return Ok(());
        };
        let Some(line_text) = content.lines().nth(display_line as usize - 1) else {
            return Ok(());
        };

        writeln!(f, "    {line_text}")?;

        let caret_col = caret_col.clamp(1, line_text.len() + 1);
        write!(f, "    ")?;
        let bytes = line_text.as_bytes();
        for i in 0..caret_col - 1 {
            // Tabs keep their width so the caret lines up visually.
            if bytes.get(i) == Some(&b'\t') {
                write!(f, "\t")?;
            } else {
                write!(f, " ")?;
            }
        }
        writeln!(f, "{}", "^".red().bold())
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", "Error".red().bold(), self.message.bold())?;

        if let Some(token) = &self.found {
            if token.lexeme.is_empty() {
                writeln!(
                    f,
                    "Found Token: {:?} at {}:{}:{}",
                    token.kind,
                    self.filename.display(),
                    self.line,
                    self.col
                )?;
            } else {
                writeln!(
                    f,
                    "Found Token: {:?} (\"{}\") at {}:{}:{}",
                    token.kind,
                    token.lexeme,
                    self.filename.display(),
                    self.line,
                    self.col
                )?;
            }
        } else if self.line > 0 {
            writeln!(
                f,
                "At {}:{}:{}",
                self.filename.display(),
                self.line,
                self.col
            )?;
        }

        self.write_snippet(f)
    }
}

impl Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenKind;

    #[test]
    fn test_caret_anchor_normal() {
        let diag = Diagnostic::new(ErrorKind::ExpectedToken, "expected ')'").at(3, 7);
        assert_eq!(diag.caret_anchor(), (3, 7));
    }

    #[test]
    fn test_caret_anchor_previous_line() {
        let prev = Token::new(TokenKind::Integer, "10", 1, 10);
        let diag = Diagnostic::new(ErrorKind::ExpectedToken, "expected ';'")
            .at(2, 1)
            .underline_previous(Some(prev));
        // One column past the previous token's last byte.
        assert_eq!(diag.caret_anchor(), (1, 12));
    }

    #[test]
    fn test_caret_anchor_previous_same_line() {
        let prev = Token::new(TokenKind::Integer, "10", 2, 5);
        let diag = Diagnostic::new(ErrorKind::ExpectedToken, "expected ';'")
            .at(2, 8)
            .underline_previous(Some(prev));
        // Previous token is on the same line, keep the primary anchor.
        assert_eq!(diag.caret_anchor(), (2, 8));
    }

    #[test]
    fn test_header_only_without_position() {
        let diag = Diagnostic::new(ErrorKind::DuplicateSymbol, "duplicate function 'f'");
        let rendered = format!("{diag}");
        assert!(rendered.contains("duplicate function 'f'"));
        assert!(!rendered.contains("Found Token"));
    }
}
