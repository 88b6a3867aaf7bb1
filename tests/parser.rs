//! AST-shape tests: operator precedence and associativity, the type
//! grammar, lvalue enforcement, and statement forms.

mod common;

use common::{compile, parse_source, variable_type};
use micac::{
    ast::{Expr, ExprKind, Program, Stmt, StmtKind, statements::ForInit},
    errors::ErrorKind,
    semantics::types::TypeKind,
};
use pretty_assertions::assert_eq;

/// Render an expression as an s-expression so shape assertions stay
/// readable.
fn sexpr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(lit) => lit.value.to_string(),
        ExprKind::Symbol(sym) => sym.name.to_string(),
        ExprKind::Binary(bin) => {
            format!("({} {} {})", bin.op, sexpr(&bin.left), sexpr(&bin.right))
        }
        ExprKind::Unary(unary) => format!("({} {})", unary.op, sexpr(&unary.operand)),
        ExprKind::Postfix(postfix) => {
            format!("(post{} {})", postfix.op, sexpr(&postfix.operand))
        }
        ExprKind::Assignment(assign) => {
            format!("({} {} {})", assign.op, sexpr(&assign.target), sexpr(&assign.value))
        }
        ExprKind::Call(call) => {
            let mut out = format!("(call {}", sexpr(&call.callee));
            for arg in &call.arguments {
                out.push(' ');
                out.push_str(&sexpr(arg));
            }
            out.push(')');
            out
        }
        ExprKind::Subscript(sub) => {
            format!("(index {} {})", sexpr(&sub.target), sexpr(&sub.index))
        }
        ExprKind::InitializerList(list) => {
            let mut out = String::from("(init");
            for element in &list.elements {
                out.push(' ');
                out.push_str(&sexpr(element));
            }
            out.push(')');
            out
        }
    }
}

/// The initializer of the first (variable) declaration in `src`.
fn first_initializer(program: &Program) -> &Expr {
    let Some(first) = program.declarations.first() else {
        panic!("program has no declarations");
    };
    match &first.kind {
        StmtKind::VarDecl(decl) => decl.initializer.as_ref().expect("missing initializer"),
        other => panic!("expected variable declaration, got {other:?}"),
    }
}

fn init_sexpr(src: &str) -> String {
    let program = parse_source(src).expect("parse failed");
    sexpr(first_initializer(&program))
}

fn body_of_main(program: &Program) -> &[Stmt] {
    match &program.declarations[0].kind {
        StmtKind::FnDecl(decl) => &decl.body.statements,
        other => panic!("expected function declaration, got {other:?}"),
    }
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(
        init_sexpr("x: i32 = 1 + 2 * 3 - 4 / 2;"),
        "(- (+ 1 (* 2 3)) (/ 4 2))"
    );
}

#[test]
fn test_binary_left_associativity() {
    assert_eq!(init_sexpr("x: i32 = a - b - c;"), "(- (- a b) c)");
    assert_eq!(init_sexpr("x: i32 = a / b / c;"), "(/ (/ a b) c)");
}

#[test]
fn test_assignment_right_associativity() {
    let program = parse_source("fn main() { a = b = c; }").expect("parse failed");
    let body = body_of_main(&program);
    let StmtKind::Expression(stmt) = &body[0].kind else {
        panic!("expected expression statement");
    };
    assert_eq!(sexpr(&stmt.expression), "(= a (= b c))");
}

#[test]
fn test_logical_and_comparison_layering() {
    assert_eq!(
        init_sexpr("x: bool = a < b && c == d || e;"),
        "(|| (&& (< a b) (== c d)) e)"
    );
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(init_sexpr("x: i32 = -a + b;"), "(+ (- a) b)");
    assert_eq!(init_sexpr("x: i32 = !a && b;"), "(&& (! a) b)");
    assert_eq!(init_sexpr("x: i32 = *p[0];"), "(* (index p 0))");
}

#[test]
fn test_postfix_chaining() {
    assert_eq!(
        init_sexpr("x: i32 = matrix[i][j];"),
        "(index (index matrix i) j)"
    );
    assert_eq!(init_sexpr("x: i32 = f(a)(b);"), "(call (call f a) b)");
    assert_eq!(init_sexpr("x: i32 = f()[i];"), "(index (call f) i)");
    assert_eq!(init_sexpr("x: i32 = n++;"), "(post++ n)");
}

#[test]
fn test_parenthesized_grouping() {
    assert_eq!(init_sexpr("x: i32 = (1 + 2) * 3;"), "(* (+ 1 2) 3)");
}

#[test]
fn test_string_and_char_primaries() {
    assert_eq!(init_sexpr("s: str = \"hi\";"), "\"hi\"");
    assert_eq!(init_sexpr("c: i8 = 'c';"), "'c'");
}

#[test]
fn test_initializer_lists() {
    assert_eq!(init_sexpr("a: i32[3] = { 1, 2, 3 };"), "(init 1 2 3)");
    assert_eq!(init_sexpr("a: i32[] = {};"), "(init)");
    assert_eq!(
        init_sexpr("a: i32[2][2] = { { 1, 2 }, { 3, 4 } };"),
        "(init (init 1 2) (init 3 4))"
    );
}

#[test]
fn test_initializer_list_as_call_argument() {
    let program = parse_source("fn main() { f({ 1, 2 }, 3); }").expect("parse failed");
    let body = body_of_main(&program);
    let StmtKind::Expression(stmt) = &body[0].kind else {
        panic!("expected expression statement");
    };
    assert_eq!(sexpr(&stmt.expression), "(call f (init 1 2) 3)");
}

#[test]
fn test_trailing_comma_rejected() {
    let err = parse_source("a: i32[3] = { 1, 2, 3, };").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedInitializer);
}

#[test]
fn test_lvalue_required() {
    let err = parse_source("fn main() { 1 + 2 = 3; }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LvalueRequired);

    // Subscripts and dereferences are fine.
    parse_source("fn main() { a[0] = 1; *p = 2; }").expect("lvalue forms should parse");
}

#[test]
fn test_compound_assignment_operators() {
    let program =
        parse_source("fn main() { a += 1; a -= 2; a *= 3; a /= 4; a %= 5; }").expect("parse failed");
    let body = body_of_main(&program);
    assert_eq!(body.len(), 5);
}

#[test]
fn test_type_suffix_precedence() {
    let scope = compile("p: i32*[10]; q: (i32[10])*;").expect("compile failed");
    assert_eq!(variable_type(&scope, "p"), "i32*[10]");
    assert_eq!(variable_type(&scope, "q"), "i32[10]*");

    // p: array of pointers; q: pointer to array.
    let p = &scope.variables.get("p").unwrap().sem_type;
    assert!(matches!(p.kind, TypeKind::Array { size: 10, .. }));
    let q = &scope.variables.get("q").unwrap().sem_type;
    assert!(matches!(q.kind, TypeKind::Pointer { .. }));
}

#[test]
fn test_function_types() {
    let scope = compile("f: fn(i32) -> bool[5]; g: (fn(i32) -> bool)[5];").expect("compile failed");

    // Greedy return type: f is a function returning an array.
    let f = &scope.variables.get("f").unwrap().sem_type;
    let TypeKind::Function { return_type, .. } = &f.kind else {
        panic!("expected function type for f");
    };
    assert!(matches!(
        return_type.as_deref().unwrap().kind,
        TypeKind::Array { size: 5, .. }
    ));

    // Grouping makes g an array of functions.
    let g = &scope.variables.get("g").unwrap().sem_type;
    assert_eq!(g.to_string(), "(fn(i32) -> bool)[5]");
    assert!(matches!(g.kind, TypeKind::Array { size: 5, .. }));
}

#[test]
fn test_const_and_unsized_dimensions() {
    let scope = compile("k: const i32 = 1; buf: u8[]; m: i32[n];").expect("compile failed");
    assert_eq!(variable_type(&scope, "k"), "const i32");
    assert_eq!(variable_type(&scope, "buf"), "u8[]");
    // A non-literal dimension is unspecified until constant folding.
    assert_eq!(variable_type(&scope, "m"), "i32[]");
}

#[test]
fn test_user_named_base_type() {
    let scope = compile("v: Vector2;").expect("compile failed");
    assert_eq!(variable_type(&scope, "v"), "Vector2");
}

#[test]
fn test_braced_bodies_required() {
    let err = parse_source("fn main() { if (1) return; }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExpectedToken);

    parse_source("fn main() { if (1) { return; } }").expect("braced body should parse");
}

#[test]
fn test_else_if_chain() {
    let program = parse_source(
        "fn main() { if (a) { } else if (b) { } else { } }",
    )
    .expect("parse failed");
    let body = body_of_main(&program);
    let StmtKind::If(if_stmt) = &body[0].kind else {
        panic!("expected if statement");
    };
    let else_branch = if_stmt.else_branch.as_deref().expect("missing else branch");
    let StmtKind::If(nested) = &else_branch.kind else {
        panic!("expected chained if");
    };
    assert!(nested.else_branch.is_some());
}

#[test]
fn test_for_statement_forms() {
    let program = parse_source(
        "fn main() { \
         for (i: i32 = 0; i < 10; i++) { } \
         for (i = 0; ; ) { } \
         for (;;) { } }",
    )
    .expect("parse failed");
    let body = body_of_main(&program);

    let StmtKind::For(with_decl) = &body[0].kind else {
        panic!("expected for statement");
    };
    assert!(matches!(with_decl.init, Some(ForInit::Declaration(_))));
    assert!(with_decl.condition.is_some());
    assert!(with_decl.post.is_some());

    let StmtKind::For(with_expr) = &body[1].kind else {
        panic!("expected for statement");
    };
    assert!(matches!(with_expr.init, Some(ForInit::Expression(_))));
    assert!(with_expr.condition.is_none());
    assert!(with_expr.post.is_none());

    let StmtKind::For(bare) = &body[2].kind else {
        panic!("expected for statement");
    };
    assert!(bare.init.is_none() && bare.condition.is_none() && bare.post.is_none());
}

#[test]
fn test_declaration_vs_expression_lookahead() {
    let program = parse_source("fn main() { x: i32 = 1; x = 2; f(x); }").expect("parse failed");
    let body = body_of_main(&program);
    assert!(matches!(body[0].kind, StmtKind::VarDecl(_)));
    assert!(matches!(body[1].kind, StmtKind::Expression(_)));
    assert!(matches!(body[2].kind, StmtKind::Expression(_)));
}

#[test]
fn test_reparse_is_identical() {
    let src = "fn fib(n: i32) -> i32 { if (n <= 1) { return n; } \
               return fib(n - 1) + fib(n - 2); } \
               cache: i32[32];";
    let first = parse_source(src).expect("parse failed");
    let second = parse_source(src).expect("parse failed");
    assert_eq!(first, second);
}

#[test]
fn test_ast_dump_renders() {
    let program =
        parse_source("fn main() { x: i32 = 1 + 2; }").expect("parse failed");
    let dump = program.to_string();
    assert!(dump.starts_with("Program"));
    assert!(dump.contains("FunctionDeclaration 'main'"));
    assert!(dump.contains("VariableDeclaration 'x' : i32"));
    assert!(dump.contains("Binary '+'"));
}
