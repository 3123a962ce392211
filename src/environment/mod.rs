//! Symbol dictionary shared by all element parsers
//!
//! Keys are stored uppercased. Values are strings that are either numeric
//! literals or the names of further entries.

pub mod dictionary;

use crate::error::{Error, NumberKind, Result};
use std::collections::HashMap;

/// Maximum number of chained lookups before a definition is treated as cyclic
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Mutable symbol table for one parser session
#[derive(Debug, Clone, Default)]
pub struct Environment {
    entries: HashMap<String, String>,
}

impl Environment {
    /// Environment preloaded with the built-in instrument, percussion,
    /// controller and tempo names
    pub fn new() -> Self {
        let mut env = Self::empty();
        for table in dictionary::ALL {
            for (name, value) in table.iter() {
                env.entries.insert((*name).to_string(), value.to_string());
            }
        }
        env
    }

    /// Environment with no definitions
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a definition
    pub fn define(&mut self, name: &str, value: &str) {
        let key = strip_brackets(name).trim().to_ascii_uppercase();
        let value = strip_brackets(value).trim().to_string();
        log::debug!("define {} = {}", key, value);
        self.entries.insert(key, value);
    }

    /// Raw definition for a name, without chasing
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&strip_brackets(name).to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a symbol (optionally bracketed) to its terminal value
    pub fn resolve(&self, token: &str) -> Result<String> {
        let symbol = strip_brackets(token);
        let mut key = symbol.to_ascii_uppercase();

        let Some(mut value) = self.entries.get(&key) else {
            if is_numeric(symbol) {
                return Ok(symbol.to_string());
            }
            return Err(Error::UndefinedSymbol(symbol.to_string()));
        };

        let mut depth = 1;
        loop {
            let next_key = value.to_ascii_uppercase();
            match self.entries.get(&next_key) {
                Some(next) => {
                    depth += 1;
                    if depth > MAX_CHAIN_DEPTH {
                        return Err(Error::DictionaryCycle(symbol.to_string()));
                    }
                    log::trace!("{} -> {}", key, next_key);
                    key = next_key;
                    value = next;
                }
                None => return Ok(value.clone()),
            }
        }
    }

    pub fn byte(&self, token: &str) -> Result<u8> {
        let value = self.resolve(token)?;
        value.parse().map_err(|_| Error::Conversion {
            kind: NumberKind::Byte,
            value,
        })
    }

    pub fn int(&self, token: &str) -> Result<i32> {
        let value = self.resolve(token)?;
        value.parse().map_err(|_| Error::Conversion {
            kind: NumberKind::Int,
            value,
        })
    }

    pub fn long(&self, token: &str) -> Result<i64> {
        let value = self.resolve(token)?;
        value.parse().map_err(|_| Error::Conversion {
            kind: NumberKind::Long,
            value,
        })
    }

    pub fn double(&self, token: &str) -> Result<f64> {
        let value = self.resolve(token)?;
        value.parse().map_err(|_| Error::Conversion {
            kind: NumberKind::Double,
            value,
        })
    }
}

fn strip_brackets(token: &str) -> &str {
    token
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(token)
}

/// Digits with at most one decimal point
pub fn is_numeric(s: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
