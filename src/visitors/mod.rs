/// Reference interpreter
pub mod evaluator;
/// Semantic Analysis
pub mod semantic;

pub use evaluator::{Evaluator, Value, VariableStore};
pub use semantic::SemanticAnalyzer;
