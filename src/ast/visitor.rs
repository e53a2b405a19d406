#![allow(missing_docs)]

#[allow(clippy::wildcard_imports)]
use crate::ast::node::*;
use crate::token::Token;

/// [Visitor] visits [Node]s and returns `T`.
pub trait Visitor<T> {
    fn visit_program(&mut self, program: &Program) -> T;

    fn visit_block(&mut self, block: &Block) -> T;

    fn visit_var_declaration(&mut self, declaration: &VarDeclaration) -> T;

    fn visit_compound(&mut self, compound: &Compound) -> T;

    fn visit_statement(&mut self, statement: &Statement) -> T {
        match statement {
            Statement::Compound(compound) => self.visit_compound(compound),
            Statement::Assign {
                target,
                operator,
                value,
            } => self.visit_assign(target, operator, value),
            Statement::Writeln { token, content } => {
                self.visit_writeln(token, content)
            }
            Statement::Empty => self.visit_empty(),
        }
    }

    fn visit_assign(
        &mut self,
        target: &Token,
        operator: &Token,
        value: &Expression,
    ) -> T;

    fn visit_writeln(&mut self, token: &Token, content: &[Expression]) -> T;

    fn visit_empty(&mut self) -> T;

    fn visit_expression(&mut self, expression: &Expression) -> T {
        match expression {
            Expression::BinaryOp {
                left,
                operator,
                right,
            } => self.visit_binaryop(left, operator, right),
            Expression::UnaryOp { operator, operand } => {
                self.visit_unaryop(operator, operand)
            }
            Expression::Var(variable) => self.visit_var(variable),
            Expression::Num(number) => self.visit_num(number),
            Expression::StringLit(string) => self.visit_string(string),
            Expression::BoolLit(boolean) => self.visit_boolean(boolean),
        }
    }

    fn visit_binaryop(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> T;

    fn visit_unaryop(&mut self, operator: &Token, operand: &Expression) -> T;

    fn visit_var(&mut self, variable: &Token) -> T;

    fn visit_num(&mut self, number: &Token) -> T;

    fn visit_string(&mut self, string: &Token) -> T;

    fn visit_boolean(&mut self, boolean: &Token) -> T;
}
