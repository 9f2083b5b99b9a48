//! Parser configuration

use crate::error::{FormulaError, FormulaResult};

/// Default capacity guard for the infix and postfix sequences
pub const DEFAULT_MAX_ATOMS: usize = 512;

/// Named constants resolved by the tokenizer before the variable table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constants {
    entries: Vec<(String, f64)>,
}

impl Constants {
    /// A table without any constants
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace a constant (names are case-insensitive)
    pub fn insert(&mut self, name: &str, value: f64) {
        let name = name.to_uppercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let name = name.to_uppercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl Default for Constants {
    /// `PI` and `E`
    fn default() -> Self {
        let mut constants = Self::empty();
        constants.insert("PI", std::f64::consts::PI);
        constants.insert("E", std::f64::consts::E);
        constants
    }
}

/// Configuration injected into a [`FormulaParser`](crate::FormulaParser)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Character literal `.` and `,` are normalized to before tokenizing
    pub decimal_separator: char,
    /// Capacity guard for each atom sequence (None = unbounded)
    pub max_atoms: Option<usize>,
    /// Constants resolved by name
    pub constants: Constants,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            max_atoms: Some(DEFAULT_MAX_ATOMS),
            constants: Constants::default(),
        }
    }
}

impl ParserConfig {
    /// Default configuration with a different decimal separator
    pub fn with_decimal_separator(decimal_separator: char) -> Self {
        Self {
            decimal_separator,
            ..Default::default()
        }
    }

    /// Check that the separator does not collide with the formula alphabet
    pub fn validate(&self) -> FormulaResult<()> {
        let sep = self.decimal_separator;
        if sep.is_ascii_alphanumeric()
            || sep.is_whitespace()
            || sep.is_control()
            || "_+-*/%^;()".contains(sep)
        {
            return Err(FormulaError::InvalidConfig(format!(
                "'{sep}' cannot be used as decimal separator"
            )));
        }
        if self.max_atoms == Some(0) {
            return Err(FormulaError::InvalidConfig(
                "max_atoms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
