//! Shorthand table — the one mapping from shorthand names to implied degrees.
//!
//! The resolver expands names through it and the prettifier scans it in
//! order to compress degree sets, so both directions always agree. Entries
//! are kept in prettify priority: larger and more specific patterns first.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::degree::Degree;

const fn nat(number: u8) -> Degree {
    Degree::from_parts(number, 0)
}

const fn flat(number: u8) -> Degree {
    Degree::from_parts(number, -1)
}

const fn sharp(number: u8) -> Degree {
    Degree::from_parts(number, 1)
}

const BUILTIN: &[(&str, &[Degree])] = &[
    ("13", &[nat(3), nat(5), flat(7), nat(9), nat(11), nat(13)]),
    ("maj13", &[nat(3), nat(5), nat(7), nat(9), nat(11), nat(13)]),
    ("min13", &[flat(3), nat(5), flat(7), nat(9), nat(11), nat(13)]),
    ("11", &[nat(3), nat(5), flat(7), nat(9), nat(11)]),
    ("min11", &[flat(3), nat(5), flat(7), nat(9), nat(11)]),
    ("9", &[nat(3), nat(5), flat(7), nat(9)]),
    ("maj9", &[nat(3), nat(5), nat(7), nat(9)]),
    ("min9", &[flat(3), nat(5), flat(7), nat(9)]),
    ("7", &[nat(3), nat(5), flat(7)]),
    ("maj6", &[nat(3), nat(5), nat(6)]),
    ("min6", &[flat(3), nat(5), nat(6)]),
    ("maj7", &[nat(3), nat(5), nat(7)]),
    ("dim7", &[flat(3), flat(5), Degree::from_parts(7, -2)]),
    ("min7", &[flat(3), nat(5), flat(7)]),
    ("hdim7", &[flat(3), flat(5), flat(7)]),
    ("minmaj7", &[flat(3), nat(5), nat(7)]),
    ("maj", &[nat(3), nat(5)]),
    ("min", &[flat(3), nat(5)]),
    ("dim", &[flat(3), flat(5)]),
    ("aug", &[nat(3), sharp(5)]),
    ("sus4", &[nat(4), nat(5)]),
    ("sus2", &[nat(2), nat(5)]),
    ("5", &[nat(5)]),
    ("1", &[]),
];

/// The built-in table, shared by every default parser.
pub static DEFAULT_TABLE: Lazy<ShorthandTable> = Lazy::new(ShorthandTable::builtin);

/// One shorthand and the degrees it implies (the root is always implied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorthandDef {
    pub name: String,
    pub degrees: Vec<Degree>,
}

impl ShorthandDef {
    pub fn new(name: impl Into<String>, degrees: Vec<Degree>) -> Self {
        Self {
            name: name.into(),
            degrees,
        }
    }

    /// True when every implied degree appears in `body`.
    pub fn is_contained_in(&self, body: &[Degree]) -> bool {
        self.degrees.iter().all(|d| body.contains(d))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("shorthand name {0:?} must be lowercase letters and digits")]
    InvalidName(String),
    #[error("shorthand {0:?} is defined twice")]
    DuplicateName(String),
    #[error("shorthand {name:?} cannot imply the omission {degree}")]
    OmittedDegree { name: String, degree: Degree },
}

/// Ordered shorthand table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandTable {
    entries: Vec<ShorthandDef>,
}

impl ShorthandTable {
    /// Build a table from definitions listed in prettify priority order.
    pub fn new(entries: Vec<ShorthandDef>) -> Result<Self, TableError> {
        let mut table = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for def in entries {
            let def = validate(def)?;
            if table.contains(&def.name) {
                return Err(TableError::DuplicateName(def.name));
            }
            table.entries.push(def);
        }
        Ok(table)
    }

    fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, degrees)| ShorthandDef::new(*name, degrees.to_vec()))
            .collect();
        Self { entries }
    }

    /// Add or redefine shorthands. New names are placed ahead of the first
    /// entry with fewer degrees so larger patterns keep winning.
    pub fn extend(&mut self, defs: Vec<ShorthandDef>) -> Result<(), TableError> {
        for def in defs {
            let def = validate(def)?;
            if let Some(existing) = self.entries.iter_mut().find(|e| e.name == def.name) {
                existing.degrees = def.degrees;
                continue;
            }
            let at = self
                .entries
                .iter()
                .position(|e| e.degrees.len() < def.degrees.len())
                .unwrap_or(self.entries.len());
            self.entries.insert(at, def);
        }
        Ok(())
    }

    /// Implied degrees for `name`, root excluded.
    pub fn get(&self, name: &str) -> Option<&[Degree]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.degrees.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in prettify priority order.
    pub fn iter(&self) -> impl Iterator<Item = &ShorthandDef> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShorthandTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

fn validate(mut def: ShorthandDef) -> Result<ShorthandDef, TableError> {
    let well_formed = !def.name.is_empty()
        && def
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !well_formed {
        return Err(TableError::InvalidName(def.name));
    }
    if let Some(degree) = def.degrees.iter().find(|d| d.is_omitted()) {
        return Err(TableError::OmittedDegree {
            name: def.name.clone(),
            degree: *degree,
        });
    }
    // The root is implied by every shorthand.
    def.degrees.retain(|d| !d.is_root());
    def.degrees.sort();
    def.degrees.dedup();
    Ok(def)
}
