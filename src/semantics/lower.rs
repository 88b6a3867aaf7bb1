//! Lowering from syntactic types to the canonical semantic form.
//!
//! Lowering is total: it never fails on any `AstType` the parser can
//! produce. Dimensions that are not integer literals lower to size 0
//! (unspecified) until constant folding exists.

use crate::{
    ast::{
        Expr, ExprKind,
        statements::FnDeclStmt,
        types::{AstType, AstTypeKind},
    },
    semantics::types::Type,
};

fn dimension_size(dim: &Option<Expr>) -> usize {
    match dim {
        Some(expr) => match &expr.kind {
            ExprKind::Literal(lit) => lit.integer_value().unwrap_or(0),
            _ => 0,
        },
        None => 0,
    }
}

/// Build the canonical type for a syntactic type node. The inner case is
/// lowered first, then the suffixes wrap it left-to-right: pointer per
/// pre-star, array per dimension, pointer per post-star.
pub fn lower_type(ast_type: &AstType) -> Type {
    let mut base = match &ast_type.kind {
        AstTypeKind::Named(named) => Type::primitive(named.name.clone(), ast_type.is_const),
        AstTypeKind::Function(func) => {
            let return_type = func.return_type.as_deref().map(lower_type);
            let params = func.params.iter().map(lower_type).collect();
            Type::function(return_type, params, ast_type.is_const)
        }
        AstTypeKind::Grouped(group) => {
            let mut inner = lower_type(&group.inner);
            inner.is_const |= ast_type.is_const;
            inner
        }
    };

    for _ in 0..ast_type.pre_stars {
        base = Type::pointer(base, false);
    }
    for dim in &ast_type.dimensions {
        base = Type::array(base, dimension_size(dim), false);
    }
    for _ in 0..ast_type.post_stars {
        base = Type::pointer(base, false);
    }

    base
}

/// Lower a function declaration's signature to a function type.
pub fn lower_function(decl: &FnDeclStmt) -> Type {
    let return_type = decl.return_type.as_ref().map(lower_type);
    let params = decl
        .params
        .iter()
        .map(|param| lower_type(&param.declared_type))
        .collect();
    Type::function(return_type, params, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        expressions::{LiteralExpr, LiteralKind},
        types::NamedType,
    };
    use thin_vec::thin_vec;

    fn named(name: &str) -> AstType {
        AstType::new(AstTypeKind::Named(NamedType { name: name.into() }))
    }

    fn int_literal(value: &str) -> Expr {
        Expr::new(ExprKind::Literal(LiteralExpr {
            kind: LiteralKind::Integer,
            value: value.into(),
        }))
    }

    #[test]
    fn test_star_binds_before_dimension() {
        // i32*[10]
        let mut ast = named("i32");
        ast.pre_stars = 1;
        ast.dimensions = thin_vec![Some(int_literal("10"))];
        assert_eq!(lower_type(&ast).to_string(), "i32*[10]");
    }

    #[test]
    fn test_grouped_array_then_pointer() {
        // (i32[10])*
        let mut inner = named("i32");
        inner.dimensions = thin_vec![Some(int_literal("10"))];

        let mut grouped = AstType::new(AstTypeKind::Grouped(
            crate::ast::types::GroupedType {
                inner: Box::new(inner),
            },
        ));
        grouped.pre_stars = 1;

        let lowered = lower_type(&grouped);
        assert_eq!(lowered.to_string(), "i32[10]*");
        match &lowered.kind {
            crate::semantics::types::TypeKind::Pointer { to } => {
                assert!(matches!(
                    to.kind,
                    crate::semantics::types::TypeKind::Array { size: 10, .. }
                ));
            }
            other => panic!("expected pointer, got {other:?}"),
        }
    }

    #[test]
    fn test_non_literal_dimension_is_unspecified() {
        let mut ast = named("i32");
        ast.dimensions = thin_vec![
            Some(Expr::new(ExprKind::Symbol(
                crate::ast::expressions::SymbolExpr { name: "n".into() },
            ))),
            None,
        ];
        assert_eq!(lower_type(&ast).to_string(), "i32[][]");
    }

    #[test]
    fn test_relowering_is_equal() {
        let mut ast = named("f64");
        ast.pre_stars = 2;
        ast.dimensions = thin_vec![Some(int_literal("4"))];
        ast.post_stars = 1;
        assert_eq!(lower_type(&ast), lower_type(&ast));
    }

    #[test]
    fn test_const_carries_through_group() {
        let mut grouped = AstType::new(AstTypeKind::Grouped(
            crate::ast::types::GroupedType {
                inner: Box::new(named("i32")),
            },
        ));
        grouped.is_const = true;
        assert_eq!(lower_type(&grouped).to_string(), "const i32");
    }
}
