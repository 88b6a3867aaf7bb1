use std::sync::OnceLock;

use parking_lot::Once;
use rustc_hash::FxHashMap;

use crate::{
    ast::{Expr, Stmt},
    errors::Diagnostic,
    lexer::token::{TokenKind, TokenKind as T},
    parser::{Parser, expr::*, stmt::*},
};

/// Expression binding powers, weakest first. A led fires only while the
/// operator binds tighter than the surrounding context, which makes every
/// binary level left-associative; assignment re-parses its value as a full
/// expression instead (see `parse_assignment_expr`).
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BindingPower {
    DefaultBp,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Primary,
}
use BindingPower as BP;

type NudHandler = fn(&mut Parser) -> Result<Expr, Diagnostic>;
type LedHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Diagnostic>;
type StmtHandler = fn(&mut Parser) -> Result<Stmt, Diagnostic>;

type NudLookup = FxHashMap<TokenKind, NudHandler>;
type LedLookup = FxHashMap<TokenKind, LedHandler>;
type StmtLookup = FxHashMap<TokenKind, StmtHandler>;
pub type BpLookup = FxHashMap<TokenKind, BindingPower>;

static INITIALIZE: Once = Once::new();
pub static BP_LU: OnceLock<BpLookup> = OnceLock::new();
pub static NUD_LU: OnceLock<NudLookup> = OnceLock::new();
pub static LED_LU: OnceLock<LedLookup> = OnceLock::new();
pub static STMT_LU: OnceLock<StmtLookup> = OnceLock::new();

fn led(
    kind: TokenKind,
    bp: BindingPower,
    led_fn: LedHandler,
    bp_lu: &mut BpLookup,
    led_lu: &mut LedLookup,
) {
    bp_lu.insert(kind, bp);
    led_lu.insert(kind, led_fn);
}

fn nud(kind: TokenKind, nud_fn: NudHandler, nud_lu: &mut NudLookup) {
    nud_lu.insert(kind, nud_fn);
}

fn stmt(kind: TokenKind, stmt_fn: StmtHandler, stmt_lu: &mut StmtLookup) {
    stmt_lu.insert(kind, stmt_fn);
}

pub fn create_token_lookups() {
    INITIALIZE.call_once(|| {
        let mut bp_lu = BpLookup::default();
        let mut nud_lu = NudLookup::default();
        let mut led_lu = LedLookup::default();
        let mut stmt_lu = StmtLookup::default();

        // Assignment
        led(T::Assign, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);
        led(T::PlusEquals, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);
        led(T::MinusEquals, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);
        led(T::StarEquals, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);
        led(T::SlashEquals, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);
        led(T::PercentEquals, BP::Assignment, parse_assignment_expr, &mut bp_lu, &mut led_lu);

        // Logical
        led(T::OrOr, BP::LogicalOr, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::AndAnd, BP::LogicalAnd, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Equality & relational
        led(T::EqualsEquals, BP::Equality, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::BangEquals, BP::Equality, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Less, BP::Relational, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Greater, BP::Relational, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::LessEquals, BP::Relational, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::GreaterEquals, BP::Relational, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Arithmetic
        led(T::Plus, BP::Additive, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Minus, BP::Additive, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Star, BP::Multiplicative, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Slash, BP::Multiplicative, parse_binary_expr, &mut bp_lu, &mut led_lu);
        led(T::Percent, BP::Multiplicative, parse_binary_expr, &mut bp_lu, &mut led_lu);

        // Postfix: calls, subscripts, ++/--
        led(T::OpenParen, BP::Call, parse_call_expr, &mut bp_lu, &mut led_lu);
        led(T::OpenBracket, BP::Call, parse_subscript_expr, &mut bp_lu, &mut led_lu);
        led(T::PlusPlus, BP::Call, parse_postfix_expr, &mut bp_lu, &mut led_lu);
        led(T::MinusMinus, BP::Call, parse_postfix_expr, &mut bp_lu, &mut led_lu);

        // Literals & symbols
        nud(T::Integer, parse_primary_expr, &mut nud_lu);
        nud(T::Float, parse_primary_expr, &mut nud_lu);
        nud(T::True, parse_primary_expr, &mut nud_lu);
        nud(T::False, parse_primary_expr, &mut nud_lu);
        nud(T::StringLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::CharLiteral, parse_primary_expr, &mut nud_lu);
        nud(T::Identifier, parse_primary_expr, &mut nud_lu);
        nud(T::OpenParen, parse_grouping_expr, &mut nud_lu);

        // Prefix operators
        nud(T::Plus, parse_prefix_expr, &mut nud_lu);
        nud(T::Minus, parse_prefix_expr, &mut nud_lu);
        nud(T::Bang, parse_prefix_expr, &mut nud_lu);
        nud(T::Star, parse_prefix_expr, &mut nud_lu);
        nud(T::Amp, parse_prefix_expr, &mut nud_lu);
        nud(T::PlusPlus, parse_prefix_expr, &mut nud_lu);
        nud(T::MinusMinus, parse_prefix_expr, &mut nud_lu);

        // Statements; anything unlisted falls back to an expression
        // statement.
        stmt(T::If, parse_if_stmt, &mut stmt_lu);
        stmt(T::While, parse_while_stmt, &mut stmt_lu);
        stmt(T::For, parse_for_stmt, &mut stmt_lu);
        stmt(T::Return, parse_return_stmt, &mut stmt_lu);
        stmt(T::Break, parse_break_stmt, &mut stmt_lu);
        stmt(T::Continue, parse_continue_stmt, &mut stmt_lu);
        stmt(T::OpenCurly, parse_block_stmt, &mut stmt_lu);
        stmt(T::Identifier, parse_identifier_stmt, &mut stmt_lu);

        let _ = BP_LU.set(bp_lu);
        let _ = NUD_LU.set(nud_lu);
        let _ = LED_LU.set(led_lu);
        let _ = STMT_LU.set(stmt_lu);
    });
}
