use crate::ast::node::{
    Block, Compound, Expression, Node, Program, VarDeclaration,
};
use crate::ast::Visitor;
use crate::error::RuntimeError;
use crate::token::{Literal, Token, TokenType};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

type Result<T> = std::result::Result<T, RuntimeError>;

/// Runtime value of a DPL expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Result of integer literals and integer arithmetic.
    Integer(i64),
    /// Result of real literals, `/` and mixed arithmetic.
    Real(f64),
    /// String literal.
    String(String),
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// Value of a variable that was never assigned.
    Unassigned,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(integer) => write!(f, "{}", integer),
            Value::Real(real) => write!(f, "{:?}", real),
            Value::String(string) => write!(f, "{}", string),
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            Value::Unassigned => write!(f, "unassigned"),
        }
    }
}

impl Value {
    fn from_token(token: &Token) -> Self {
        match token.literal() {
            Some(Literal::Integer(integer)) => Value::Integer(*integer),
            Some(Literal::Real(real)) => Value::Real(*real),
            Some(Literal::String(string)) => Value::String(string.clone()),
            Some(Literal::Boolean(boolean)) => Value::Boolean(*boolean),
            _ => Value::Unassigned,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(integer) => Some(*integer as f64),
            Value::Real(real) => Some(*real),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(integer) => Some(*integer),
            Value::Real(real) => Some(real.trunc() as i64),
            _ => None,
        }
    }
}

/// Values of assigned variables, by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableStore(HashMap<String, Value>);

impl VariableStore {
    /// Create an empty [`VariableStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `name`, or [`Value::Unassigned`].
    pub fn get(&self, name: &str) -> Value {
        self.0.get(name).cloned().unwrap_or(Value::Unassigned)
    }

    /// Stores `value` for `name`, replacing any earlier value.
    pub fn assign<S: Into<String>>(&mut self, name: S, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variable was assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Runs a [`Program`], writing one line per `WRITELN` to its output.
///
/// Assumes the program passed semantic analysis: unknown variables evaluate
/// to [`Value::Unassigned`] instead of failing.
pub struct Evaluator<'w> {
    variables: VariableStore,
    output: &'w mut dyn Write,
}

impl<'w> Evaluator<'w> {
    /// Create an [`Evaluator`] writing to `output`.
    pub fn new(output: &'w mut dyn Write) -> Self {
        Self {
            variables: VariableStore::new(),
            output,
        }
    }

    /// Runs `program` and returns the final state of its variables.
    pub fn evaluate(
        program: &Program,
        output: &mut dyn Write,
    ) -> Result<VariableStore> {
        let mut evaluator = Evaluator::new(output);

        program.accept(&mut evaluator)?;

        debug!("Evaluated program \"{}\"", program.name());

        Ok(evaluator.variables)
    }

    fn invalid_operands(operator: &Token, left: Value, right: Value) -> RuntimeError {
        RuntimeError::InvalidOperands {
            operator: operator.clone(),
            left,
            right,
        }
    }

    fn arithmetic(
        operator: &Token,
        left: Value,
        right: Value,
        integer_op: fn(i64, i64) -> Option<i64>,
        real_op: fn(f64, f64) -> f64,
    ) -> Result<Value> {
        if let (Value::Integer(l), Value::Integer(r)) = (&left, &right) {
            return integer_op(*l, *r).map(Value::Integer).ok_or_else(|| {
                RuntimeError::Overflow {
                    operator: operator.clone(),
                }
            });
        }

        match (left.as_real(), right.as_real()) {
            (Some(l), Some(r)) => Ok(Value::Real(real_op(l, r))),
            _ => Err(Self::invalid_operands(operator, left, right)),
        }
    }

    fn floor_division(operator: &Token, left: Value, right: Value) -> Result<Value> {
        let (l, r) = match (left.as_integer(), right.as_integer()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(Self::invalid_operands(operator, left, right)),
        };

        if r == 0 {
            return Err(RuntimeError::DivisionByZero {
                operator: operator.clone(),
            });
        }

        let quotient = l.checked_div(r).ok_or_else(|| RuntimeError::Overflow {
            operator: operator.clone(),
        })?;

        // Round towards negative infinity.
        if l % r != 0 && ((l < 0) != (r < 0)) {
            Ok(Value::Integer(quotient - 1))
        } else {
            Ok(Value::Integer(quotient))
        }
    }

    fn real_division(operator: &Token, left: Value, right: Value) -> Result<Value> {
        let (l, r) = match (left.as_real(), right.as_real()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(Self::invalid_operands(operator, left, right)),
        };

        if r == 0.0 {
            return Err(RuntimeError::DivisionByZero {
                operator: operator.clone(),
            });
        }

        Ok(Value::Real(l / r))
    }

    fn apply_unary(operator: &Token, value: Value) -> Result<Value> {
        match (operator.token_type(), value) {
            (TokenType::Plus, value @ (Value::Integer(_) | Value::Real(_))) => {
                Ok(value)
            }
            (TokenType::Minus, Value::Integer(integer)) => integer
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| RuntimeError::Overflow {
                    operator: operator.clone(),
                }),
            (TokenType::Minus, Value::Real(real)) => Ok(Value::Real(-real)),
            (_, operand) => Err(RuntimeError::InvalidOperand {
                operator: operator.clone(),
                operand,
            }),
        }
    }
}

impl<'w> Visitor<Result<Value>> for Evaluator<'w> {
    fn visit_program(&mut self, program: &Program) -> Result<Value> {
        program.block().accept(self)
    }

    fn visit_block(&mut self, block: &Block) -> Result<Value> {
        block.compound().accept(self)
    }

    fn visit_var_declaration(&mut self, _: &VarDeclaration) -> Result<Value> {
        Ok(Value::Unassigned)
    }

    fn visit_compound(&mut self, compound: &Compound) -> Result<Value> {
        for statement in compound.statements() {
            statement.accept(self)?;
        }

        Ok(Value::Unassigned)
    }

    fn visit_assign(
        &mut self,
        target: &Token,
        _operator: &Token,
        value: &Expression,
    ) -> Result<Value> {
        let value = value.accept(self)?;
        let name = target.text().unwrap_or_default();

        trace!("{} := {}", name, value);

        self.variables.assign(name, value.clone());

        Ok(value)
    }

    fn visit_writeln(
        &mut self,
        _token: &Token,
        content: &[Expression],
    ) -> Result<Value> {
        // Only the first item is written.
        match content.first() {
            Some(item) => {
                let value = item.accept(self)?;
                writeln!(self.output, "{}", value)?;
                Ok(value)
            }
            None => Ok(Value::Unassigned),
        }
    }

    fn visit_empty(&mut self) -> Result<Value> {
        Ok(Value::Unassigned)
    }

    fn visit_binaryop(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Result<Value> {
        let l = left.accept(self)?;
        let r = right.accept(self)?;

        let value = match operator.token_type() {
            TokenType::Plus => {
                Self::arithmetic(operator, l, r, i64::checked_add, |l, r| l + r)
            }
            TokenType::Minus => {
                Self::arithmetic(operator, l, r, i64::checked_sub, |l, r| l - r)
            }
            TokenType::Mul => {
                Self::arithmetic(operator, l, r, i64::checked_mul, |l, r| l * r)
            }
            TokenType::IntegerDiv => Self::floor_division(operator, l, r),
            TokenType::FloatDiv => Self::real_division(operator, l, r),
            _ => Err(Self::invalid_operands(operator, l, r)),
        }?;

        trace!("{} yields {}", operator, value);

        Ok(value)
    }

    fn visit_unaryop(
        &mut self,
        operator: &Token,
        operand: &Expression,
    ) -> Result<Value> {
        let mut operators = vec![operator];
        let mut innermost = operand;

        while let Expression::UnaryOp { operator, operand } = innermost {
            operators.push(operator);
            innermost = &**operand;
        }

        let mut value = innermost.accept(self)?;

        for operator in operators.into_iter().rev() {
            value = Self::apply_unary(operator, value)?;
        }

        Ok(value)
    }

    fn visit_var(&mut self, variable: &Token) -> Result<Value> {
        Ok(self.variables.get(variable.text().unwrap_or_default()))
    }

    fn visit_num(&mut self, number: &Token) -> Result<Value> {
        Ok(Value::from_token(number))
    }

    fn visit_string(&mut self, string: &Token) -> Result<Value> {
        Ok(Value::from_token(string))
    }

    fn visit_boolean(&mut self, boolean: &Token) -> Result<Value> {
        Ok(Value::Boolean(boolean.token_type() == TokenType::True))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Parser;
    use anyhow::{bail, Result};

    fn run(statements: &str) -> Result<(String, VariableStore)> {
        let input = format!(
            "PROGRAM p; VAR a, b: INTEGER; r: REAL; s: STRING; f: BOOLEAN; BEGIN {} END.",
            statements
        );
        let program = Parser::new(&input)?.parse()?;

        let mut output = Vec::new();
        let variables = Evaluator::evaluate(&program, &mut output)?;

        Ok((String::from_utf8(output)?, variables))
    }

    fn run_err(statements: &str) -> Result<RuntimeError> {
        match run(statements) {
            Ok((output, _)) => bail!("Expected RuntimeError, got {:?}", output),
            Err(err) => match err.downcast::<RuntimeError>() {
                Ok(err) => Ok(err),
                Err(other) => bail!("Expected RuntimeError, got {}", other),
            },
        }
    }

    #[test]
    fn evaluator_precedence_test() -> Result<()> {
        let (output, variables) = run("a := 2 + 3 * 4; WRITELN a")?;

        assert_eq!(output, "14\n");
        assert_eq!(variables.get("a"), Value::Integer(14));

        Ok(())
    }

    #[test]
    fn evaluator_unary_chain_test() -> Result<()> {
        let (output, _) = run("a := 5 - - 2; WRITELN a; WRITELN - + - a")?;

        assert_eq!(output, "7\n7\n");

        Ok(())
    }

    #[test]
    fn evaluator_division_test() -> Result<()> {
        let (output, _) = run(
            "WRITELN 7 DIV 2; WRITELN -7 DIV 2; WRITELN 7 DIV -2; WRITELN 7 / 2; WRITELN 6 / 3; WRITELN 7.9 DIV 2",
        )?;

        assert_eq!(output, "3\n-4\n-4\n3.5\n2.0\n3\n");

        Ok(())
    }

    #[test]
    fn evaluator_mixed_arithmetic_test() -> Result<()> {
        let (output, variables) = run("r := 1.5 * 2; WRITELN r + 1")?;

        assert_eq!(output, "4.0\n");
        assert_eq!(variables.get("r"), Value::Real(3.0));

        Ok(())
    }

    #[test]
    fn evaluator_literals_test() -> Result<()> {
        let (output, variables) =
            run("s := 'Hello world'; f := FALSE; WRITELN s; WRITELN TRUE; WRITELN f")?;

        assert_eq!(output, "Hello world\nTRUE\nFALSE\n");
        assert_eq!(variables.len(), 2);

        Ok(())
    }

    #[test]
    fn evaluator_writes_first_item_only_test() -> Result<()> {
        let (output, _) = run("a := 3; WRITELN a * 2, 'ignored', a")?;

        assert_eq!(output, "6\n");

        Ok(())
    }

    #[test]
    fn evaluator_unassigned_variable_test() -> Result<()> {
        let (output, variables) = run("WRITELN a")?;

        assert_eq!(output, "unassigned\n");
        assert!(variables.is_empty());

        Ok(())
    }

    #[test]
    fn evaluator_runtime_division_by_zero_test() -> Result<()> {
        match run_err("a := 0; b := 10 DIV a")? {
            RuntimeError::DivisionByZero { operator } => {
                assert_eq!(operator.token_type(), TokenType::IntegerDiv);
                Ok(())
            }
            other => bail!("Expected DivisionByZero, got {}", other),
        }
    }

    #[test]
    fn evaluator_invalid_operands_test() -> Result<()> {
        match run_err("s := 'x'; a := s + 1")? {
            RuntimeError::InvalidOperands { left, right, .. } => {
                assert_eq!(left, Value::String("x".to_string()));
                assert_eq!(right, Value::Integer(1));
                Ok(())
            }
            other => bail!("Expected InvalidOperands, got {}", other),
        }
    }

    #[test]
    fn evaluator_overflow_test() -> Result<()> {
        match run_err("a := 9223372036854775807; a := a + 1")? {
            RuntimeError::Overflow { operator } => {
                assert_eq!(operator.token_type(), TokenType::Plus);
                Ok(())
            }
            other => bail!("Expected Overflow, got {}", other),
        }
    }
}
