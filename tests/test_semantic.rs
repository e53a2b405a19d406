use anyhow::{bail, Result};
use dplc::error::{Error, ErrorCode, SemanticError};
use dplc::symbols::Symbol;
use dplc::Script;

pub mod common;

fn semantic_error(filename: &str) -> Result<SemanticError> {
    let input = common::get_script(filename)?;

    match Script::new(&input) {
        Ok(script) => bail!("Expected SemanticError, {} passed", script.name()),
        Err(Error::Semantic(err)) => Ok(err),
        Err(other) => bail!("Expected SemanticError, got {:?}", other),
    }
}

#[test]
fn semantic_typical_program_test() -> Result<()> {
    common::init_logger();
    let input = common::get_script("typical.dpl")?;

    let script = Script::new(&input)?;
    let table = script.symbol_table();

    assert_eq!(
        table.names(),
        [
            "INTEGER", "REAL", "STRING", "BOOLEAN", "count", "total", "ratio",
            "greeting", "done", "half"
        ]
    );
    assert_eq!(table.lookup("ratio"), Some(&Symbol::variable("ratio", "REAL")));
    assert_eq!(table.variables().count(), 6);

    let listing = table.to_string();
    assert!(listing.contains("| greeting:STRING\n"));
    assert!(listing.contains("| BOOLEAN\n"));

    Ok(())
}

#[test]
fn semantic_duplicate_test() -> Result<()> {
    let err = semantic_error("duplicate.dpl")?;

    assert_eq!(err.code(), ErrorCode::DuplicateId);
    assert_eq!((err.token().line_no(), err.token().col_no()), (3, 5));
    assert!(err.to_string().starts_with("Duplicate id found\n"));
    assert!(err.to_string().ends_with("Identifier: 'x'"));

    Ok(())
}

#[test]
fn semantic_undeclared_test() -> Result<()> {
    let err = semantic_error("undeclared.dpl")?;

    match err {
        SemanticError::UndeclaredIdentifier { token, name } => {
            assert_eq!(name, "y");
            assert_eq!((token.line_no(), token.col_no()), (4, 10));
        }
        other => bail!("Expected UndeclaredIdentifier, got {:?}", other),
    }

    Ok(())
}

#[test]
fn semantic_zero_division_test() -> Result<()> {
    let err = semantic_error("zero_division.dpl")?;

    assert_eq!(err.code(), ErrorCode::ZeroDivision);
    assert_eq!(err.token().text(), None);
    assert_eq!((err.token().line_no(), err.token().col_no()), (4, 10));

    Ok(())
}

#[test]
fn semantic_type_error_test() -> Result<()> {
    let err = semantic_error("type_error.dpl")?;

    match err {
        SemanticError::TypeError { token, types } => {
            assert_eq!(token.text(), Some("name"));
            assert_eq!((token.line_no(), token.col_no()), (7, 10));
            assert_eq!(types, ["STRING", "INTEGER"]);
        }
        other => bail!("Expected TypeError, got {:?}", other),
    }

    Ok(())
}
