#![warn(missing_docs)]
#![warn(clippy::pedantic)]
//#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
//! Front end and reference interpreter for DPL, a small Pascal-like
//! teaching language.
//!
//! Source text is tokenized, parsed into an AST, checked by the
//! [`SemanticAnalyzer`](visitors::SemanticAnalyzer) and can then be run by
//! the [`Evaluator`](visitors::Evaluator).

/// Abstract syntax tree
pub mod ast;
/// Controls the command line interface
pub mod cli;
/// Crate errors.
pub mod error;
/// Script struct
pub mod script;
/// `Symbol` and `SymbolTable`
pub mod symbols;
/// `Token` and `TokenType`
pub mod token;
/// `Tokenizer`
pub mod tokenizer;
/// Allowed operand types
pub mod type_checker;
/// `Node` Visitors
pub mod visitors;

pub use error::Error;
pub use script::Script;
pub use tokenizer::Tokenizer;

/// Tokenizes all of `input_text`, up to and including the EOF token.
pub fn tokenize(input_text: &str) -> Result<Vec<token::Token>, error::TokenizeError> {
    Tokenizer::new(input_text).collect()
}

/// Normalizes newlines in `string`.
pub(crate) fn normalize_newlines<S: AsRef<str>>(string: &S) -> String {
    string.as_ref().replace("\r\n", "\n").replace('\r', "\n")
}
