use crate::token::TokenType;

/// Where an operand appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Context {
    /// Either side of a [`BinaryOp`](crate::ast::Expression::BinaryOp).
    BinaryOperation,
    /// Operand of a [`UnaryOp`](crate::ast::Expression::UnaryOp).
    UnaryOperation,
}

const BINARY_OPERATION_TYPES: [TokenType; 2] = [TokenType::Integer, TokenType::Real];

const UNARY_OPERATION_TYPES: [TokenType; 2] = [TokenType::Integer, TokenType::Real];

impl Context {
    /// Builtin types allowed in this context.
    pub fn allowed_types(self) -> &'static [TokenType] {
        match self {
            Context::BinaryOperation => &BINARY_OPERATION_TYPES,
            Context::UnaryOperation => &UNARY_OPERATION_TYPES,
        }
    }
}

/// Decides whether a type may be used in a [`Context`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeChecker;

impl TypeChecker {
    /// Whether `type_name`, the canonical name of a builtin type such as
    /// `INTEGER`, is allowed in `context`.
    pub fn is_allowed(self, context: Context, type_name: &str) -> bool {
        context
            .allowed_types()
            .iter()
            .any(|allowed| allowed.as_str() == type_name)
    }
}
