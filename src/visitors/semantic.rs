use crate::ast::node::{
    Block, Compound, Expression, Node, Program, VarDeclaration,
};
use crate::ast::Visitor;
use crate::error::SemanticError;
use crate::symbols::{Symbol, SymbolTable};
use crate::token::{Token, TokenType};
use crate::type_checker::{Context, TypeChecker};
use log::{debug, trace};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, SemanticError>;

/// Walks the AST, fills the [`SymbolTable`] and checks declarations, types
/// and literal zero divisors.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbol_table: SymbolTable,
    type_checker: TypeChecker,
    // Token kind of the value most recently assigned to each variable.
    assigned_kinds: HashMap<String, TokenType>,
}

impl SemanticAnalyzer {
    /// Create an analyzer with a fresh [`SymbolTable`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes `program`, returning its completed [`SymbolTable`].
    pub fn analyze(program: &Program) -> Result<SymbolTable> {
        let mut analyzer = SemanticAnalyzer::new();

        program.accept(&mut analyzer)?;

        debug!("Semantic analysis complete:\n{}", analyzer.symbol_table);

        Ok(analyzer.symbol_table)
    }

    /// Symbols registered so far.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    fn identifier(token: &Token) -> &str {
        token.text().unwrap_or_default()
    }

    /// Declared type name of a variable or literal reference.
    fn declared_type(&self, expression: &Expression) -> Result<String> {
        match expression {
            Expression::Var(token) => {
                let name = Self::identifier(token);

                match self.symbol_table.lookup(name) {
                    Some(symbol) => Ok(symbol
                        .type_name()
                        .unwrap_or_else(|| symbol.name())
                        .to_string()),
                    None => Err(SemanticError::UndeclaredIdentifier {
                        token: token.clone(),
                        name: name.to_string(),
                    }),
                }
            }
            Expression::BinaryOp { .. } => Ok("BinaryOp".to_string()),
            Expression::UnaryOp { .. } => Ok("UnaryOp".to_string()),
            Expression::Num(token)
            | Expression::StringLit(token)
            | Expression::BoolLit(token) => Ok(token
                .token_type()
                .literal_type_name()
                .unwrap_or_else(|| token.token_type().name())
                .to_string()),
        }
    }

    /// Type of the value last assigned to a variable, if it was a literal.
    fn assigned_type(&self, expression: &Expression) -> Option<&'static str> {
        match expression {
            Expression::Var(token) => self
                .assigned_kinds
                .get(Self::identifier(token))
                .and_then(|kind| kind.literal_type_name()),
            _ => None,
        }
    }

    /// Type of `expression` that is not allowed in `context`, preferring the
    /// type of its assigned value over its declared type.
    fn disallowed_type(
        &self,
        context: Context,
        expression: &Expression,
    ) -> Result<Option<String>> {
        if let Some(assigned) = self.assigned_type(expression) {
            if !self.type_checker.is_allowed(context, assigned) {
                return Ok(Some(assigned.to_string()));
            }
        }

        let declared = self.declared_type(expression)?;

        if self.type_checker.is_allowed(context, &declared) {
            Ok(None)
        } else {
            Ok(Some(declared))
        }
    }
}

impl Visitor<Result<()>> for SemanticAnalyzer {
    fn visit_program(&mut self, program: &Program) -> Result<()> {
        trace!(r#"Analyzing program "{}""#, program.name());
        program.block().accept(self)
    }

    fn visit_block(&mut self, block: &Block) -> Result<()> {
        for declaration in block.declarations() {
            declaration.accept(self)?;
        }

        block.compound().accept(self)
    }

    fn visit_var_declaration(
        &mut self,
        declaration: &VarDeclaration,
    ) -> Result<()> {
        let name = declaration.name();
        let type_name = declaration.type_name();

        if self.symbol_table.lookup(type_name).is_none() {
            return Err(SemanticError::UndeclaredIdentifier {
                token: declaration.type_spec().clone(),
                name: type_name.to_string(),
            });
        }

        if self.symbol_table.contains(name) {
            return Err(SemanticError::DuplicateIdentifier {
                token: declaration.variable().clone(),
                name: name.to_string(),
            });
        }

        self.symbol_table.register(Symbol::variable(name, type_name));

        Ok(())
    }

    fn visit_compound(&mut self, compound: &Compound) -> Result<()> {
        for statement in compound.statements() {
            statement.accept(self)?;
        }

        Ok(())
    }

    fn visit_assign(
        &mut self,
        target: &Token,
        _operator: &Token,
        value: &Expression,
    ) -> Result<()> {
        value.accept(self)?;
        self.visit_var(target)?;

        let operand = value.effective_operand();

        if !matches!(operand, Expression::BinaryOp { .. }) {
            let name = Self::identifier(target).to_string();
            let kind = operand.token().token_type();

            trace!("Assigned {} to {}", kind, name);

            self.assigned_kinds.insert(name, kind);
        }

        Ok(())
    }

    fn visit_writeln(
        &mut self,
        _token: &Token,
        content: &[Expression],
    ) -> Result<()> {
        for item in content {
            item.accept(self)?;
        }

        for pair in content.windows(2) {
            let (previous, item) = (&pair[0], &pair[1]);

            if !previous.is_operation() || item.is_operation() {
                continue;
            }

            if let Some(item_type) =
                self.disallowed_type(Context::BinaryOperation, item)?
            {
                return Err(SemanticError::TypeError {
                    token: item.token().clone(),
                    types: vec![self.declared_type(previous)?, item_type],
                });
            }
        }

        Ok(())
    }

    fn visit_empty(&mut self) -> Result<()> {
        Ok(())
    }

    fn visit_binaryop(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Result<()> {
        trace!("Analyzing {}", operator);

        left.accept(self)?;
        right.accept(self)?;

        if let Expression::Num(divisor) = right.effective_operand() {
            if divisor.is_zero() {
                return Err(SemanticError::ZeroDivision {
                    token: left.token().clone(),
                });
            }
        }

        if left.is_typed_reference() {
            if let Some(left_type) =
                self.disallowed_type(Context::BinaryOperation, left)?
            {
                return Err(SemanticError::TypeError {
                    token: left.token().clone(),
                    types: vec![left_type, self.declared_type(right)?],
                });
            }
        }

        if right.is_typed_reference() {
            if let Some(right_type) =
                self.disallowed_type(Context::BinaryOperation, right)?
            {
                return Err(SemanticError::TypeError {
                    token: right.token().clone(),
                    types: vec![self.declared_type(left)?, right_type],
                });
            }
        }

        Ok(())
    }

    fn visit_unaryop(
        &mut self,
        operator: &Token,
        operand: &Expression,
    ) -> Result<()> {
        trace!("Analyzing {}", operator);

        // Only the innermost operand of a unary chain is a reference.
        let operand = operand.effective_operand();

        operand.accept(self)?;

        if operand.is_typed_reference() {
            let operand_type = self.declared_type(operand)?;

            if !self
                .type_checker
                .is_allowed(Context::UnaryOperation, &operand_type)
            {
                return Err(SemanticError::TypeError {
                    token: operand.token().clone(),
                    types: vec![operand_type],
                });
            }
        }

        Ok(())
    }

    fn visit_var(&mut self, variable: &Token) -> Result<()> {
        let name = Self::identifier(variable);

        if self.symbol_table.contains(name) {
            Ok(())
        } else {
            Err(SemanticError::UndeclaredIdentifier {
                token: variable.clone(),
                name: name.to_string(),
            })
        }
    }

    fn visit_num(&mut self, _number: &Token) -> Result<()> {
        Ok(())
    }

    fn visit_string(&mut self, _string: &Token) -> Result<()> {
        Ok(())
    }

    fn visit_boolean(&mut self, _boolean: &Token) -> Result<()> {
        Ok(())
    }
}
