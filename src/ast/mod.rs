/// Abstract Syntax Tree nodes
pub mod node;
/// Parser
pub mod parser;
/// Visitor Trait
pub mod visitor;

pub use node::{
    Block, Compound, Expression, Node, Program, Statement, VarDeclaration,
};
pub use parser::Parser;
pub use visitor::Visitor;
