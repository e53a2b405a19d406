use crate::ast::node::{
    Block, Compound, Expression, Program, Statement, VarDeclaration,
};
use crate::error::ParseError;
use crate::token::{Token, TokenType};
use crate::tokenizer::Tokenizer;
use log::trace;

type Result<T> = std::result::Result<T, ParseError>;

const MAX_PARSING_DEPTH: usize = 256;

/// Reads a stream of [Token]s and build an Abstract Syntax Tree.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    depth: usize,
    current_token: Token,
}

impl<'a> Parser<'a> {
    /// Create a [Parser<'a>] from a string and read its first token.
    pub fn new(input_text: &'a str) -> Result<Self> {
        let mut tokenizer = Tokenizer::new(input_text);

        // An empty input still yields an EOF token.
        let current_token = match tokenizer.next() {
            Some(result) => result?,
            None => Token::new(TokenType::Eof, None, 1, 1),
        };

        Ok(Parser {
            tokenizer,
            depth: 0,
            current_token,
        })
    }

    /// Run [Parser] to create an Abstract Syntax Tree.
    pub fn parse(&mut self) -> Result<Program> {
        let program = self.program()?;

        if self.current_type() != TokenType::Eof {
            return Err(self.unexpected(&[TokenType::Eof]));
        }

        Ok(program)
    }

    fn current_type(&self) -> TokenType {
        self.current_token.token_type()
    }

    fn unexpected(&self, expected: &[TokenType]) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_vec(),
            found: self.current_token.clone(),
        }
    }

    fn consume(&mut self, expected: TokenType) -> Result<Token> {
        if self.current_type() != expected {
            return Err(self.unexpected(&[expected]));
        }

        let next = match self.tokenizer.next() {
            Some(result) => result?,
            // Tokenizer is exhausted after EOF, keep reporting it.
            None => self.current_token.clone(),
        };

        Ok(std::mem::replace(&mut self.current_token, next))
    }

    fn inc_depth(&mut self) -> Result<()> {
        self.depth += 1;

        if self.depth > MAX_PARSING_DEPTH {
            return Err(ParseError::MaxDepth(MAX_PARSING_DEPTH));
        }

        Ok(())
    }

    fn dec_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Depth Prefix
    fn dp(&self) -> String {
        (0..self.depth).map(|i| (i % 10).to_string()).collect()
    }

    // Grammar functions
    fn program(&mut self) -> Result<Program> {
        // PROGRAM variable SEMI block DOT
        self.inc_depth()?;

        self.consume(TokenType::Program)?;
        let name = self.consume(TokenType::ID)?;

        trace!(r#"{} Program: "{}""#, self.dp(), name.text().unwrap_or_default());

        self.consume(TokenType::Semi)?;
        let block = self.block()?;
        self.consume(TokenType::Dot)?;

        self.dec_depth();
        Ok(Program::new(name, block))
    }

    fn block(&mut self) -> Result<Block> {
        // declarations compound_stmt
        self.inc_depth()?;
        trace!("{} Block", self.dp());

        let declarations = self.declarations()?;
        let compound = self.compound_statement()?;

        self.dec_depth();
        Ok(Block::new(declarations, compound))
    }

    fn declarations(&mut self) -> Result<Vec<VarDeclaration>> {
        // ( VAR ( var_decl SEMI )+ )*
        self.inc_depth()?;
        trace!("{} Declarations", self.dp());

        let mut declarations = Vec::new();

        while self.current_type() == TokenType::Var {
            self.consume(TokenType::Var)?;

            loop {
                declarations.extend(self.variable_declaration()?);
                self.consume(TokenType::Semi)?;

                if self.current_type() != TokenType::ID {
                    break;
                }
            }
        }

        self.dec_depth();
        Ok(declarations)
    }

    fn variable_declaration(&mut self) -> Result<Vec<VarDeclaration>> {
        // ID ( COMMA ID )* COLON type_spec
        self.inc_depth()?;

        let mut variables = vec![self.consume(TokenType::ID)?];

        while self.current_type() == TokenType::Comma {
            self.consume(TokenType::Comma)?;
            variables.push(self.consume(TokenType::ID)?);
        }

        self.consume(TokenType::Colon)?;

        let type_spec = self.type_spec()?;

        trace!(
            "{} VarDeclaration: {} variable(s) of {}",
            self.dp(),
            variables.len(),
            type_spec.token_type()
        );

        self.dec_depth();
        Ok(variables
            .into_iter()
            .map(|variable| VarDeclaration::new(variable, type_spec.clone()))
            .collect())
    }

    fn type_spec(&mut self) -> Result<Token> {
        // INTEGER | REAL | STRING | BOOLEAN
        let builtin_types = [
            TokenType::Integer,
            TokenType::Real,
            TokenType::String,
            TokenType::Boolean,
        ];

        let token_type = self.current_type();

        if builtin_types.contains(&token_type) {
            self.consume(token_type)
        } else {
            Err(self.unexpected(&builtin_types))
        }
    }

    fn compound_statement(&mut self) -> Result<Compound> {
        // BEGIN statement_list END
        self.inc_depth()?;
        trace!("{} Compound", self.dp());

        self.consume(TokenType::Begin)?;
        let statements = self.statement_list()?;
        self.consume(TokenType::End)?;

        self.dec_depth();
        Ok(Compound::new(statements))
    }

    fn statement_list(&mut self) -> Result<Vec<Statement>> {
        // statement ( SEMI statement )*
        let mut statements = vec![self.statement()?];

        while self.current_type() == TokenType::Semi {
            self.consume(TokenType::Semi)?;
            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<Statement> {
        // compound_stmt | writeln_stmt | assignment | empty
        self.inc_depth()?;
        trace!("{} Statement", self.dp());

        let statement = match self.current_type() {
            TokenType::Begin => Statement::Compound(self.compound_statement()?),
            TokenType::Writeln => self.writeln_statement()?,
            TokenType::ID => self.assignment_statement()?,
            _ => Statement::Empty,
        };

        self.dec_depth();
        Ok(statement)
    }

    fn writeln_statement(&mut self) -> Result<Statement> {
        // WRITELN item ( COMMA item )*
        self.inc_depth()?;
        trace!("{} Writeln", self.dp());

        let token = self.consume(TokenType::Writeln)?;

        let mut content = vec![self.item()?];

        while self.current_type() == TokenType::Comma {
            self.consume(TokenType::Comma)?;
            content.push(self.item()?);
        }

        self.dec_depth();
        Ok(Statement::Writeln { token, content })
    }

    fn assignment_statement(&mut self) -> Result<Statement> {
        // variable ASSIGN item
        self.inc_depth()?;

        let target = self.consume(TokenType::ID)?;

        trace!(
            r#"{} Assign: "{}""#,
            self.dp(),
            target.text().unwrap_or_default()
        );

        let operator = self.consume(TokenType::Assign)?;
        let value = self.item()?;

        self.dec_depth();
        Ok(Statement::Assign {
            target,
            operator,
            value,
        })
    }

    fn item(&mut self) -> Result<Expression> {
        // string_literal | TRUE | FALSE | expression
        match self.current_type() {
            TokenType::StringConst => {
                Ok(Expression::StringLit(self.consume(TokenType::StringConst)?))
            }
            token_type @ (TokenType::True | TokenType::False) => {
                Ok(Expression::BoolLit(self.consume(token_type)?))
            }
            _ => self.expression(),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        // term ( ( PLUS | MINUS ) term )*
        self.inc_depth()?;
        trace!("{} Expression", self.dp());

        let mut expression = self.term()?;

        loop {
            let operator = match self.current_type() {
                token_type @ (TokenType::Plus | TokenType::Minus) => {
                    self.consume(token_type)?
                }
                _ => break,
            };

            expression = Expression::BinaryOp {
                left: Box::new(expression),
                operator,
                right: Box::new(self.term()?),
            };
        }

        self.dec_depth();
        Ok(expression)
    }

    fn term(&mut self) -> Result<Expression> {
        // factor ( ( MUL | INTEGER_DIV | FLOAT_DIV ) factor )*
        self.inc_depth()?;
        trace!("{} Term", self.dp());

        let mut term = self.factor()?;

        loop {
            let operator = match self.current_type() {
                token_type @ (TokenType::Mul
                | TokenType::IntegerDiv
                | TokenType::FloatDiv) => self.consume(token_type)?,
                _ => break,
            };

            term = Expression::BinaryOp {
                left: Box::new(term),
                operator,
                right: Box::new(self.factor()?),
            };
        }

        self.dec_depth();
        Ok(term)
    }

    fn factor(&mut self) -> Result<Expression> {
        // ( PLUS | MINUS ) factor | INTEGER_CONST | REAL_CONST
        //     | LPAREN expression RPAREN | variable
        self.inc_depth()?;
        trace!("{} Factor", self.dp());

        // Unary chains are folded without recursion.
        let mut operators = Vec::new();

        while let token_type @ (TokenType::Plus | TokenType::Minus) =
            self.current_type()
        {
            operators.push(self.consume(token_type)?);
        }

        if !operators.is_empty() {
            trace!("{} Unary chain of {}", self.dp(), operators.len());
        }

        let mut factor = match self.current_type() {
            token_type @ (TokenType::IntegerConst | TokenType::RealConst) => {
                Expression::Num(self.consume(token_type)?)
            }
            TokenType::LParen => {
                self.consume(TokenType::LParen)?;
                let expression = self.expression()?;
                self.consume(TokenType::RParen)?;
                expression
            }
            TokenType::ID => Expression::Var(self.consume(TokenType::ID)?),
            _ => {
                return Err(self.unexpected(&[
                    TokenType::Plus,
                    TokenType::Minus,
                    TokenType::IntegerConst,
                    TokenType::RealConst,
                    TokenType::LParen,
                    TokenType::ID,
                ]))
            }
        };

        for operator in operators.into_iter().rev() {
            factor = Expression::UnaryOp {
                operator,
                operand: Box::new(factor),
            };
        }

        self.dec_depth();
        Ok(factor)
    }
}
