use crate::token::TokenType;
use log::trace;
use std::collections::HashMap;
use std::fmt;

/// Types every [`SymbolTable`] starts with, in registration order.
pub const BUILTIN_TYPES: [TokenType; 4] = [
    TokenType::Integer,
    TokenType::Real,
    TokenType::String,
    TokenType::Boolean,
];

/// Named entry in a [`SymbolTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// One of the [`BUILTIN_TYPES`].
    BuiltinType {
        /// Canonical type name, e.g. `INTEGER`.
        name: String,
    },
    /// Declared variable and the name of its type.
    Variable {
        /// Variable name as declared.
        name: String,
        /// Name of its builtin type.
        type_name: String,
    },
}

impl Symbol {
    /// Create a [`Symbol::BuiltinType`].
    pub fn builtin<S: Into<String>>(name: S) -> Self {
        Symbol::BuiltinType { name: name.into() }
    }

    /// Create a [`Symbol::Variable`].
    pub fn variable<N, T>(name: N, type_name: T) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        Symbol::Variable {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Key of this symbol in a [`SymbolTable`].
    pub fn name(&self) -> &str {
        match self {
            Symbol::BuiltinType { name } | Symbol::Variable { name, .. } => name,
        }
    }

    /// Type of a variable. Builtin types have none.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Symbol::BuiltinType { .. } => None,
            Symbol::Variable { type_name, .. } => Some(type_name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::BuiltinType { name } => write!(f, "{}", name),
            Symbol::Variable { name, type_name } => {
                write!(f, "{}:{}", name, type_name)
            }
        }
    }
}

/// Insertion-ordered registry of builtin types and declared variables.
///
/// [`SymbolTable::register`] overwrites existing entries, checking for
/// duplicates is up to the caller.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a [`SymbolTable`] holding the [`BUILTIN_TYPES`].
    pub fn new() -> Self {
        let mut table = Self {
            symbols: Vec::new(),
            index: HashMap::new(),
        };

        for builtin in BUILTIN_TYPES {
            table.register(Symbol::builtin(builtin.as_str()));
        }

        table
    }

    /// Add `symbol`, replacing an existing symbol with the same name in
    /// place.
    pub fn register(&mut self, symbol: Symbol) {
        trace!("Registering symbol {}", symbol);

        if let Some(&position) = self.index.get(symbol.name()) {
            self.symbols[position] = symbol;
        } else {
            self.index
                .insert(symbol.name().to_string(), self.symbols.len());
            self.symbols.push(symbol);
        }
    }

    /// Finds the symbol registered as `name`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&position| &self.symbols[position])
    }

    /// Whether a symbol is registered as `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names of all symbols, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.symbols.iter().map(Symbol::name).collect()
    }

    /// Declared variables, in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols
            .iter()
            .filter(|symbol| matches!(symbol, Symbol::Variable { .. }))
    }

    /// Number of symbols, builtins included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table holds no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = "\t\t:::: Symbol table ::::";

        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "__".repeat(header.chars().count()))?;

        for symbol in &self.symbols {
            writeln!(f, "| {}", symbol)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_table_starts_with_builtins_test() {
        let table = SymbolTable::new();

        assert_eq!(table.names(), vec!["INTEGER", "REAL", "STRING", "BOOLEAN"]);
        assert_eq!(table.variables().count(), 0);
        assert_eq!(table.lookup("REAL"), Some(&Symbol::builtin("REAL")));
    }

    #[test]
    fn symbol_table_register_overwrites_in_place_test() {
        let mut table = SymbolTable::new();

        table.register(Symbol::variable("x", "INTEGER"));
        table.register(Symbol::variable("y", "STRING"));
        table.register(Symbol::variable("x", "REAL"));

        assert_eq!(table.len(), 6);
        assert_eq!(
            table.lookup("x").and_then(Symbol::type_name),
            Some("REAL")
        );
        assert_eq!(
            table.names(),
            vec!["INTEGER", "REAL", "STRING", "BOOLEAN", "x", "y"]
        );
    }

    #[test]
    fn symbol_table_lookup_is_case_sensitive_test() {
        let mut table = SymbolTable::new();
        table.register(Symbol::variable("Total", "INTEGER"));

        assert!(table.contains("Total"));
        assert!(!table.contains("total"));
        assert!(table.lookup("integer").is_none());
    }

    #[test]
    fn symbol_table_display_test() {
        let mut table = SymbolTable::new();
        table.register(Symbol::variable("x", "INTEGER"));

        let listing = table.to_string();
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines[0], "\t\t:::: Symbol table ::::");
        assert!(lines[1].chars().all(|c| c == '_'));
        assert_eq!(&lines[2..], &["| INTEGER", "| REAL", "| STRING", "| BOOLEAN", "| x:INTEGER"]);
    }
}
