use crate::token::{Token, TokenType};
use crate::visitors::Value;
use std::fmt;
use thiserror::Error;

/// Error codes shared by the parser and the semantic analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ErrorCode {
    UnexpectedToken,
    IdNotFound,
    DuplicateId,
    TypeError,
    ZeroDivision,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorCode::UnexpectedToken => "Unexpected token",
            ErrorCode::IdNotFound => "Identifier not found",
            ErrorCode::DuplicateId => "Duplicate id found",
            ErrorCode::TypeError => "Type error",
            ErrorCode::ZeroDivision => "Division by zero",
        };

        write!(f, "{}", message)
    }
}

#[derive(Error, Clone, Debug, PartialEq)]
/// Error from the [`Tokenizer`](crate::Tokenizer).
pub enum TokenizeError {
    /// Character does not start any token.
    #[error("Tokenize error on {character} **line: {line} **column: {column}")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// Line of the character.
        line: usize,
        /// Column of the character.
        column: usize,
    },

    /// Input ended inside a `{ ... }` comment.
    #[error("Tokenize error: unterminated comment starting at **line: {line} **column: {column}")]
    UnterminatedComment {
        /// Line of the opening brace.
        line: usize,
        /// Column of the opening brace.
        column: usize,
    },

    /// Numeric literal does not fit its type.
    #[error("Tokenize error: invalid number '{text}' **line: {line} **column: {column}")]
    InvalidNumber {
        /// Source text of the literal.
        text: String,
        /// Line the literal starts on.
        line: usize,
        /// Column the literal starts on.
        column: usize,
    },
}

fn join_types(types: &[TokenType]) -> String {
    types
        .iter()
        .map(|token_type| token_type.name())
        .collect::<Vec<&str>>()
        .join(" or ")
}

#[derive(Error, Debug, PartialEq)]
/// Error from the [`Parser`](crate::ast::Parser).
pub enum ParseError {
    /// Current token does not fit the grammar.
    #[error("{}: expected {}\n\t{found}", ErrorCode::UnexpectedToken, join_types(.expected))]
    UnexpectedToken {
        /// Kinds that would have been accepted.
        expected: Vec<TokenType>,
        /// The token that was found instead.
        found: Token,
    },

    /// Parentheses nested deeper than the parser allows.
    #[error("Maximum parsing depth of {0} exceeded")]
    MaxDepth(usize),

    /// Error from the underlying [`Tokenizer`](crate::Tokenizer).
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

#[derive(Error, Debug, PartialEq)]
/// Error from the [`SemanticAnalyzer`](crate::visitors::SemanticAnalyzer).
pub enum SemanticError {
    /// Variable declared twice.
    #[error("{}\n\t{token}\n\tIdentifier: '{name}'", ErrorCode::DuplicateId)]
    DuplicateIdentifier {
        /// The second declaration.
        token: Token,
        /// Name of the variable.
        name: String,
    },

    /// Variable used without declaration.
    #[error("{}\n\t{token}\n\tIdentifier: '{name}'", ErrorCode::IdNotFound)]
    UndeclaredIdentifier {
        /// The reference to the unknown name.
        token: Token,
        /// The unknown name.
        name: String,
    },

    /// Operand type not allowed in its context.
    #[error("{}: {}\n\t{token}", ErrorCode::TypeError, .types.join(" and "))]
    TypeError {
        /// The operand with the offending type.
        token: Token,
        /// Type names involved, in operand order.
        types: Vec<String>,
    },

    /// Right operand is a literal zero.
    #[error("{}: {token}", ErrorCode::ZeroDivision)]
    ZeroDivision {
        /// Left operand of the operation.
        token: Token,
    },
}

impl SemanticError {
    /// Error code of this [`SemanticError`].
    pub fn code(&self) -> ErrorCode {
        match self {
            SemanticError::DuplicateIdentifier { .. } => ErrorCode::DuplicateId,
            SemanticError::UndeclaredIdentifier { .. } => ErrorCode::IdNotFound,
            SemanticError::TypeError { .. } => ErrorCode::TypeError,
            SemanticError::ZeroDivision { .. } => ErrorCode::ZeroDivision,
        }
    }

    /// The offending [`Token`].
    pub fn token(&self) -> &Token {
        match self {
            SemanticError::DuplicateIdentifier { token, .. }
            | SemanticError::UndeclaredIdentifier { token, .. }
            | SemanticError::TypeError { token, .. }
            | SemanticError::ZeroDivision { token } => token,
        }
    }
}

#[derive(Error, Debug)]
/// Error from the [`Evaluator`](crate::visitors::Evaluator).
pub enum RuntimeError {
    /// Binary operator applied to values it does not support.
    #[error("Unable to apply {operator} to {left} and {right}")]
    InvalidOperands {
        /// The operator.
        operator: Token,
        /// Value of the left operand.
        left: Value,
        /// Value of the right operand.
        right: Value,
    },

    /// Unary operator applied to a value it does not support.
    #[error("Unable to apply {operator} to {operand}")]
    InvalidOperand {
        /// The operator.
        operator: Token,
        /// Value of the operand.
        operand: Value,
    },

    /// Divisor evaluated to zero.
    #[error("{}: {operator}", ErrorCode::ZeroDivision)]
    DivisionByZero {
        /// The division operator.
        operator: Token,
    },

    /// Integer result does not fit in 64 bits.
    #[error("Integer overflow: {operator}")]
    Overflow {
        /// The operator whose result overflowed.
        operator: Token,
    },

    /// Writing `WRITELN` output failed.
    #[error("Unable to write output")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
/// Any error produced while compiling or running a DPL program.
pub enum Error {
    /// See [`TokenizeError`].
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// See [`ParseError`].
    #[error(transparent)]
    Parse(ParseError),

    /// See [`SemanticError`].
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// See [`RuntimeError`].
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Tokenize(error) => Error::Tokenize(error),
            other => Error::Parse(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_flattens_tokenize_error_test() {
        let inner = TokenizeError::UnrecognizedCharacter {
            character: '\'',
            line: 1,
            column: 2,
        };

        let error = Error::from(ParseError::from(inner.clone()));

        assert!(matches!(error, Error::Tokenize(ref e) if *e == inner));
    }

    #[test]
    fn semantic_error_message_test() {
        let error = SemanticError::TypeError {
            token: Token::identifier("x", 1, 5),
            types: vec!["STRING".to_string(), "INTEGER".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "Type error: STRING and INTEGER\n\tToken(ID, 'x', position=1:5)"
        );
        assert_eq!(error.code(), ErrorCode::TypeError);
    }
}
