use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

pub mod common;

fn dplc() -> Result<Command> {
    Ok(Command::cargo_bin("dplc")?)
}

#[test]
fn dplc_runs_program_test() -> Result<()> {
    dplc()?
        .arg(common::get_path("arithmetic.dpl"))
        .assert()
        .success()
        .stdout("14\n");

    Ok(())
}

#[test]
fn dplc_typical_program_test() -> Result<()> {
    dplc()?
        .arg(common::get_path("typical.dpl"))
        .assert()
        .success()
        .stdout("21\n5.25\n10\nHello, world!\nTRUE\n");

    Ok(())
}

#[test]
fn dplc_symbols_test() -> Result<()> {
    dplc()?
        .arg("-s")
        .arg(common::get_path("arithmetic.dpl"))
        .assert()
        .success()
        .stdout(predicate::str::contains(":::: Symbol table ::::"))
        .stdout(predicate::str::contains("| x:INTEGER\n"))
        .stdout(predicate::str::ends_with("14\n"));

    Ok(())
}

#[test]
fn dplc_tokens_test() -> Result<()> {
    dplc()?
        .arg("--tokens")
        .arg(common::get_path("arithmetic.dpl"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Token(PROGRAM, 'PROGRAM', position=1:1)\n",
        ))
        .stdout(predicate::str::contains("Token(EOF, None, position="));

    Ok(())
}

#[test]
fn dplc_semantic_error_test() -> Result<()> {
    dplc()?
        .arg("-s")
        .arg(common::get_path("duplicate.dpl"))
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Duplicate id found"));

    Ok(())
}

#[test]
fn dplc_parse_error_test() -> Result<()> {
    dplc()?
        .arg(common::get_path("syntax_error.dpl"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Unexpected token: expected END"));

    Ok(())
}

#[test]
fn dplc_crlf_source_test() -> Result<()> {
    let tempdir = TempDir::new()?;
    let source = tempdir.child("crlf.dpl");
    source.write_str("PROGRAM p;\r\nVAR x: REAL;\r\nBEGIN\r\n  x := 7 / 2;\r\n  WRITELN x\r\nEND.\r\n")?;

    dplc()?
        .arg("-t")
        .arg(source.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Token(ID, 'x', position=4:3)"))
        .stdout(predicate::str::ends_with("3.5\n"));

    tempdir.close()?;

    Ok(())
}

#[test]
fn dplc_missing_file_test() -> Result<()> {
    let tempdir = TempDir::new()?;

    dplc()?
        .arg(tempdir.child("missing.dpl").path())
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Unable to read"));

    Ok(())
}

#[test]
fn dplc_long_unary_chain_test() -> Result<()> {
    let tempdir = TempDir::new()?;
    let source = tempdir.child("unary.dpl");
    source.write_str(&format!(
        "PROGRAM p;\nVAR x: INTEGER;\nBEGIN\n  x := {}1;\n  WRITELN x\nEND.\n",
        "- ".repeat(50_000)
    ))?;

    dplc()?
        .arg(source.path())
        .assert()
        .success()
        .stdout("1\n");

    tempdir.close()?;

    Ok(())
}
