use crate::ast::{Parser, Program};
use crate::error::Error;
use crate::symbols::SymbolTable;
use crate::visitors::{Evaluator, SemanticAnalyzer, VariableStore};
use log::debug;
use std::io::Write;

type Result<T> = std::result::Result<T, Error>;

/// Parses and analyzes a DPL program, holding its AST and [`SymbolTable`].
#[derive(Debug)]
pub struct Script {
    program: Program,
    symbol_table: SymbolTable,
}

impl Script {
    /// Create a new [`Script`] by tokenizing, parsing and analyzing `input`.
    pub fn new<S>(input: S) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let mut parser = Parser::new(input.as_ref())?;
        let program = parser.parse()?;

        debug!(r#"Parsed program "{}""#, program.name());

        let symbol_table = SemanticAnalyzer::analyze(&program)?;

        Ok(Script {
            program,
            symbol_table,
        })
    }

    /// Returns the name
    pub fn name(&self) -> &str {
        self.program.name()
    }

    /// The parsed AST.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Symbols collected during analysis.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    /// Runs the program, writing its output to `output`.
    pub fn evaluate<W: Write>(&self, output: &mut W) -> Result<VariableStore> {
        Ok(Evaluator::evaluate(&self.program, output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SemanticError;
    use anyhow::{bail, Result};

    #[test]
    fn script_runs_program_test() -> Result<()> {
        let script = Script::new(
            "PROGRAM Sum; VAR x, y: INTEGER; BEGIN x := 20; y := x + 22; WRITELN y END.",
        )?;

        assert_eq!(script.name(), "Sum");
        assert_eq!(script.symbol_table().variables().count(), 2);

        let mut output = Vec::new();
        script.evaluate(&mut output)?;

        assert_eq!(String::from_utf8(output)?, "42\n");

        Ok(())
    }

    #[test]
    fn script_reports_semantic_error_test() -> Result<()> {
        match Script::new("PROGRAM p; BEGIN x := 1 END.") {
            Ok(script) => bail!("Expected semantic error, got {:?}", script),
            Err(Error::Semantic(SemanticError::UndeclaredIdentifier {
                name,
                ..
            })) => {
                assert_eq!(name, "x");
                Ok(())
            }
            Err(other) => bail!("Expected semantic error, got {}", other),
        }
    }

    #[test]
    fn script_flattens_tokenize_error_test() {
        let result = Script::new("PROGRAM p; BEGIN { unterminated END.");

        assert!(matches!(result, Err(Error::Tokenize(_))));
    }
}
