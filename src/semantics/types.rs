use std::fmt::{self, Display};

/// Canonical semantic type. Always a tree with unique ownership: a type is
/// owned by exactly one symbol-table entry or AST node, never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub is_const: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive { name: Box<str> },
    Pointer { to: Box<Type> },
    /// `size == 0` means unspecified (`[]` or a non-constant dimension).
    Array { of: Box<Type>, size: usize },
    Function {
        return_type: Option<Box<Type>>,
        params: Vec<Type>,
    },
}

impl Type {
    pub fn primitive(name: impl Into<Box<str>>, is_const: bool) -> Self {
        Self {
            kind: TypeKind::Primitive { name: name.into() },
            is_const,
        }
    }

    pub fn pointer(to: Type, is_const: bool) -> Self {
        Self {
            kind: TypeKind::Pointer { to: Box::new(to) },
            is_const,
        }
    }

    pub fn array(of: Type, size: usize, is_const: bool) -> Self {
        Self {
            kind: TypeKind::Array {
                of: Box::new(of),
                size,
            },
            is_const,
        }
    }

    pub fn function(return_type: Option<Type>, params: Vec<Type>, is_const: bool) -> Self {
        Self {
            kind: TypeKind::Function {
                return_type: return_type.map(Box::new),
                params,
            },
            is_const,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        match &self.kind {
            TypeKind::Primitive { name } => write!(f, "{name}"),
            TypeKind::Pointer { to } => {
                // Function types need grouping or the star would read as
                // part of the return type.
                if matches!(to.kind, TypeKind::Function { .. }) {
                    write!(f, "({to})*")
                } else {
                    write!(f, "{to}*")
                }
            }
            TypeKind::Array { of, size } => {
                if matches!(of.kind, TypeKind::Function { .. }) {
                    write!(f, "({of})")?;
                } else {
                    write!(f, "{of}")?;
                }
                if *size == 0 {
                    write!(f, "[]")
                } else {
                    write!(f, "[{size}]")
                }
            }
            TypeKind::Function {
                return_type,
                params,
            } => {
                write!(f, "fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")?;
                if let Some(ret) = return_type {
                    write!(f, " -> {ret}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_display() {
        assert_eq!(Type::primitive("i32", false).to_string(), "i32");
        assert_eq!(Type::primitive("f64", true).to_string(), "const f64");
    }

    #[test]
    fn test_pointer_and_array_display() {
        let ptr = Type::pointer(Type::primitive("i32", false), false);
        assert_eq!(ptr.to_string(), "i32*");

        let arr = Type::array(ptr, 10, false);
        assert_eq!(arr.to_string(), "i32*[10]");

        let unsized_arr = Type::array(Type::primitive("u8", false), 0, false);
        assert_eq!(unsized_arr.to_string(), "u8[]");
    }

    #[test]
    fn test_function_display() {
        let func = Type::function(
            Some(Type::primitive("i32", false)),
            vec![
                Type::primitive("i32", false),
                Type::primitive("bool", false),
            ],
            false,
        );
        assert_eq!(func.to_string(), "fn(i32, bool) -> i32");

        let void_fn = Type::function(None, vec![], false);
        assert_eq!(void_fn.to_string(), "fn()");
    }

    #[test]
    fn test_function_grouped_inside_wrappers() {
        let func = Type::function(Some(Type::primitive("bool", false)), vec![], false);
        let arr_of_fn = Type::array(func.clone(), 5, false);
        assert_eq!(arr_of_fn.to_string(), "(fn() -> bool)[5]");

        let ptr_to_fn = Type::pointer(func, false);
        assert_eq!(ptr_to_fn.to_string(), "(fn() -> bool)*");
    }
}
