//! Symbol model.
//!
//! Symbol categories are a closed enum, so every match rule is an
//! exhaustive dispatch rather than a chain of boolean flag checks.

use serde::{Deserialize, Serialize};

/// A materialized board symbol. A Multiplier carries the value drawn
/// when it landed; the other variants are pure identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Symbol {
    Standard(String),
    Wild,
    Scatter,
    Multiplier(u32),
}

impl Symbol {
    pub fn is_scatter(&self) -> bool {
        matches!(self, Symbol::Scatter)
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Symbol::Wild)
    }

    pub fn is_multiplier(&self) -> bool {
        matches!(self, Symbol::Multiplier(_))
    }

    /// The paytable name for a standard symbol, None otherwise.
    pub fn standard_name(&self) -> Option<&str> {
        match self {
            Symbol::Standard(name) => Some(name),
            _ => None,
        }
    }
}

/// Symbol identity as it appears in configuration, before any
/// per-instance value is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolSpec {
    Standard { name: String },
    Wild,
    Scatter,
    Multiplier,
}

impl SymbolSpec {
    pub fn standard(name: &str) -> Self {
        SymbolSpec::Standard { name: name.to_string() }
    }
}
