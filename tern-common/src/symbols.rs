//! Interned identifiers
//!
//! Identifiers, operator tokens and type-variable names are interned once
//! per compilation so that the rest of the front end compares and hashes
//! small `Symbol` handles instead of strings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Handle to an interned string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u32);

impl Symbol {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of every interned string of one compilation
#[derive(Debug, Clone, Default)]
pub struct StringInterner {
    strings: Vec<String>,
    lookup: HashMap<String, Symbol>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Intern a string, returning the existing symbol when already present
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&symbol) = self.lookup.get(s) {
            return symbol;
        }

        let symbol = Symbol(self.strings.len() as u32);
        self.strings.push(s.to_string());
        self.lookup.insert(s.to_string(), symbol);
        symbol
    }

    /// Look up a string without interning it
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.lookup.get(s).copied()
    }

    /// Resolve a symbol back to its text
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
