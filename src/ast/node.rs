#![allow(missing_docs)]
use crate::ast::visitor::Visitor;
use crate::token::{Token, TokenType};

/// [Node] accepts a [Visitor], according to the [Visitor pattern].
///
/// [Visitor pattern]: https://en.wikipedia.org/wiki/Visitor_pattern
pub trait Node<T>: std::fmt::Debug {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T;
}

#[derive(Debug, PartialEq)]
pub struct Program {
    pub(crate) name: Token,
    pub(crate) block: Block,
}

impl Program {
    pub fn new(name: Token, block: Block) -> Self {
        Self { name, block }
    }

    /// Name of the program, as written after `PROGRAM`.
    pub fn name(&self) -> &str {
        self.name.text().unwrap_or_default()
    }

    pub fn block(&self) -> &Block {
        &self.block
    }
}

impl<T> Node<T> for Program {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_program(self)
    }
}

#[derive(Debug, PartialEq)]
pub struct Block {
    pub(crate) declarations: Vec<VarDeclaration>,
    pub(crate) compound: Compound,
}

impl Block {
    pub fn new(declarations: Vec<VarDeclaration>, compound: Compound) -> Self {
        Self {
            declarations,
            compound,
        }
    }

    pub fn declarations(&self) -> &[VarDeclaration] {
        &self.declarations
    }

    pub fn compound(&self) -> &Compound {
        &self.compound
    }
}

impl<T> Node<T> for Block {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_block(self)
    }
}

#[derive(Debug, PartialEq)]
pub struct VarDeclaration {
    pub(crate) variable: Token,
    pub(crate) type_spec: Token,
}

impl VarDeclaration {
    pub fn new(variable: Token, type_spec: Token) -> Self {
        Self {
            variable,
            type_spec,
        }
    }

    pub fn variable(&self) -> &Token {
        &self.variable
    }

    pub fn type_spec(&self) -> &Token {
        &self.type_spec
    }

    pub fn name(&self) -> &str {
        self.variable.text().unwrap_or_default()
    }

    /// Canonical name of the declared type, e.g. `INTEGER`.
    pub fn type_name(&self) -> &str {
        self.type_spec.token_type().as_str()
    }
}

impl<T> Node<T> for VarDeclaration {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_var_declaration(self)
    }
}

#[derive(Debug, PartialEq)]
pub struct Compound {
    pub(crate) statements: Vec<Statement>,
}

impl Compound {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

impl<T> Node<T> for Compound {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_compound(self)
    }
}

#[derive(Debug, PartialEq)]
pub enum Statement {
    Compound(Compound),
    Assign {
        target: Token,
        operator: Token,
        value: Expression,
    },
    Writeln {
        token: Token,
        content: Vec<Expression>,
    },
    Empty,
}

impl<T> Node<T> for Statement {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_statement(self)
    }
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    BinaryOp {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    UnaryOp {
        operator: Token,
        operand: Box<Expression>,
    },
    Var(Token),
    Num(Token),
    StringLit(Token),
    BoolLit(Token),
}

impl Expression {
    /// The operator of an operation, or the token of a leaf.
    pub fn token(&self) -> &Token {
        match self {
            Expression::BinaryOp { operator, .. }
            | Expression::UnaryOp { operator, .. } => operator,
            Expression::Var(token)
            | Expression::Num(token)
            | Expression::StringLit(token)
            | Expression::BoolLit(token) => token,
        }
    }

    /// Innermost operand of a chain of unary operators, or `self`.
    pub fn effective_operand(&self) -> &Expression {
        let mut current = self;

        while let Expression::UnaryOp { operand, .. } = current {
            current = &**operand;
        }

        current
    }

    fn placeholder() -> Expression {
        Expression::Num(Token::new(TokenType::Eof, None, 0, 0))
    }

    /// Moves the boxed children of an operation onto `pending`.
    fn detach_children(&mut self, pending: &mut Vec<Expression>) {
        match self {
            Expression::BinaryOp { left, right, .. } => {
                pending.push(std::mem::replace(&mut **left, Self::placeholder()));
                pending.push(std::mem::replace(&mut **right, Self::placeholder()));
            }
            Expression::UnaryOp { operand, .. } => {
                pending.push(std::mem::replace(&mut **operand, Self::placeholder()));
            }
            _ => (),
        }
    }

    pub fn is_operation(&self) -> bool {
        matches!(
            self,
            Expression::BinaryOp { .. } | Expression::UnaryOp { .. }
        )
    }

    /// Whether this is a reference whose type is checked against a
    /// [`Context`](crate::type_checker::Context).
    pub fn is_typed_reference(&self) -> bool {
        matches!(
            self,
            Expression::Var(_) | Expression::StringLit(_) | Expression::BoolLit(_)
        )
    }
}

// Deep trees are dropped from a worklist instead of recursively.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut child) = pending.pop() {
            child.detach_children(&mut pending);
        }
    }
}

impl<T> Node<T> for Expression {
    fn accept(&self, visitor: &mut dyn Visitor<T>) -> T {
        visitor.visit_expression(self)
    }
}
