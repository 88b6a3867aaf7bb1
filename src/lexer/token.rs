use std::{
    fmt::{self, Display},
    ops::Deref,
};

use colored::Colorize;
use thin_vec::ThinVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Symbols
    Semicolon,
    Colon,
    Comma,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    Arrow,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    PlusPlus,
    MinusMinus,
    EqualsEquals,
    BangEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    AndAnd,
    OrOr,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,

    // Reserved
    Fn,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    Const,
    True,
    False,

    // Primitive type names
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Str,

    // Literals
    Integer,
    Float,
    StringLiteral,
    CharLiteral,
    Identifier,

    // Special
    Comment,
    Eof,
    Unknown,
}

/// Every fixed-spelling token, keywords and punctuation alike. The lexer
/// scans the whole table and keeps the longest spelling that matches, so
/// order does not matter here.
pub const FIXED_SPELLINGS: &[(&str, TokenKind)] = &[
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("{", TokenKind::OpenCurly),
    ("}", TokenKind::CloseCurly),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    ("->", TokenKind::Arrow),
    ("=", TokenKind::Assign),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("!", TokenKind::Bang),
    ("&", TokenKind::Amp),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("==", TokenKind::EqualsEquals),
    ("!=", TokenKind::BangEquals),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("<=", TokenKind::LessEquals),
    (">=", TokenKind::GreaterEquals),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("+=", TokenKind::PlusEquals),
    ("-=", TokenKind::MinusEquals),
    ("*=", TokenKind::StarEquals),
    ("/=", TokenKind::SlashEquals),
    ("%=", TokenKind::PercentEquals),
    ("fn", TokenKind::Fn),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("return", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("const", TokenKind::Const),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("i8", TokenKind::I8),
    ("i16", TokenKind::I16),
    ("i32", TokenKind::I32),
    ("i64", TokenKind::I64),
    ("u8", TokenKind::U8),
    ("u16", TokenKind::U16),
    ("u32", TokenKind::U32),
    ("u64", TokenKind::U64),
    ("f32", TokenKind::F32),
    ("f64", TokenKind::F64),
    ("bool", TokenKind::Bool),
    ("str", TokenKind::Str),
];

impl TokenKind {
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::I8
                | TokenKind::I16
                | TokenKind::I32
                | TokenKind::I64
                | TokenKind::U8
                | TokenKind::U16
                | TokenKind::U32
                | TokenKind::U64
                | TokenKind::F32
                | TokenKind::F64
                | TokenKind::Bool
                | TokenKind::Str
        )
    }

    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
        )
    }

    /// The literal spelling for fixed tokens, used in error messages.
    pub fn spelling(self) -> Option<&'static str> {
        FIXED_SPELLINGS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(spelling, _)| *spelling)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spelling() {
            Some(spelling) => write!(f, "'{spelling}'"),
            None => write!(f, "{self:?}"),
        }
    }
}

/// A token with its exact source spelling and the 1-based position of its
/// first byte. Columns count bytes; tabs advance a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Box<str>,
    pub line: u32,
    pub col: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<Box<str>>, line: u32, col: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            col,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format!("<{:?}>", self.kind).blue().bold(),
            format!("\"{}\"", self.lexeme).green(),
            format!("{}:{}", self.line, self.col).dimmed(),
        )
    }
}

/// The lexer's output: comment-free tokens terminated by an `Eof` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream(pub ThinVec<Token>);

impl Deref for TokenStream {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ThinVec<Token>> for TokenStream {
    fn from(tokens: ThinVec<Token>) -> Self {
        Self(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings_round_trip() {
        assert_eq!(TokenKind::Arrow.spelling(), Some("->"));
        assert_eq!(TokenKind::Fn.spelling(), Some("fn"));
        assert_eq!(TokenKind::PlusEquals.spelling(), Some("+="));
        assert_eq!(TokenKind::Identifier.spelling(), None);
        assert_eq!(TokenKind::Eof.spelling(), None);
    }

    #[test]
    fn test_fixed_spellings_are_unique() {
        for (i, (spelling, _)) in FIXED_SPELLINGS.iter().enumerate() {
            for (other, _) in &FIXED_SPELLINGS[i + 1..] {
                assert_ne!(spelling, other, "duplicate spelling in registry");
            }
        }
    }

    #[test]
    fn test_primitive_type_predicate() {
        assert!(TokenKind::I32.is_primitive_type());
        assert!(TokenKind::Bool.is_primitive_type());
        assert!(!TokenKind::Identifier.is_primitive_type());
        assert!(!TokenKind::True.is_primitive_type());
    }

    #[test]
    fn test_assignment_op_predicate() {
        assert!(TokenKind::Assign.is_assignment_op());
        assert!(TokenKind::PercentEquals.is_assignment_op());
        assert!(!TokenKind::EqualsEquals.is_assignment_op());
    }
}
