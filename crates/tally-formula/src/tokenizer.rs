//! Formula tokenizer
//!
//! Turns a raw formula string into the infix atom sequence. Constants and
//! variables are resolved here, so a variable holds the value bound at the time
//! the formula is tokenized.

use crate::atom::{Atom, AtomKind, AtomSequence};
use crate::config::ParserConfig;
use crate::error::{FormulaError, FormulaResult};
use crate::variables::VariableTable;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Neutral,
    Number,
    Identifier,
}

/// Tokenizer over one configuration and variable table
pub struct Tokenizer<'a> {
    config: &'a ParserConfig,
    variables: &'a VariableTable,
}

impl<'a> Tokenizer<'a> {
    pub fn new(config: &'a ParserConfig, variables: &'a VariableTable) -> Self {
        Self { config, variables }
    }

    /// Tokenize `formula`, appending infix atoms to `output`
    pub fn tokenize(&self, formula: &str, output: &mut AtomSequence) -> FormulaResult<()> {
        let source = self.preprocess(formula);
        self.validate(&source)?;

        let sep = self.config.decimal_separator;
        let mut state = ScanState::Neutral;
        let mut buffer = String::new();

        for c in source.chars() {
            match state {
                ScanState::Number => {
                    if c.is_ascii_digit() {
                        buffer.push(c);
                        continue;
                    }
                    if c == sep {
                        // At most one separator per number
                        if buffer.contains(sep) {
                            return Err(FormulaError::Syntax);
                        }
                        buffer.push(c);
                        continue;
                    }
                    if c.is_ascii_alphabetic() || c == '_' {
                        return Err(FormulaError::Syntax);
                    }
                    output.push(self.close_number(&buffer)?);
                    buffer.clear();
                }
                ScanState::Identifier => {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        buffer.push(c);
                        continue;
                    }
                    output.push(self.close_identifier(&buffer, Some(c)));
                    buffer.clear();
                }
                ScanState::Neutral => {}
            }

            state = self.scan_neutral(c, &mut buffer, output);
        }

        match state {
            ScanState::Number => {
                output.push(self.close_number(&buffer)?);
            }
            ScanState::Identifier => {
                output.push(self.close_identifier(&buffer, None));
            }
            ScanState::Neutral => {}
        }

        log::trace!("tokenized {:?} into {} infix atoms", source, output.len());
        Ok(())
    }

    /// Strip spaces, uppercase and normalize decimal points
    fn preprocess(&self, formula: &str) -> String {
        let sep = self.config.decimal_separator;
        formula
            .chars()
            .filter(|&c| c != ' ')
            .flat_map(char::to_uppercase)
            .map(|c| if c == '.' || c == ',' { sep } else { c })
            .collect()
    }

    fn validate(&self, source: &str) -> FormulaResult<()> {
        let sep = self.config.decimal_separator;
        let valid = source.chars().all(|c| {
            c.is_ascii_digit()
                || c.is_ascii_uppercase()
                || c == sep
                || "_+-*/%^;()".contains(c)
        });
        if valid {
            Ok(())
        } else {
            Err(FormulaError::InvalidCharacter)
        }
    }

    /// Handle `c` in the neutral state and return the next state
    fn scan_neutral(&self, c: char, buffer: &mut String, output: &mut AtomSequence) -> ScanState {
        if c.is_ascii_digit() || (c == '-' && Self::expects_operand(output)) {
            buffer.push(c);
            return ScanState::Number;
        }
        if c.is_ascii_alphabetic() || c == '_' {
            buffer.push(c);
            return ScanState::Identifier;
        }

        let atom = match c {
            '(' | ')' => Atom::bracket(c),
            ';' => Atom::comma(),
            _ => Atom::operator(c),
        };
        output.push(atom);
        ScanState::Neutral
    }

    /// A `-` is unary at the start, or after an operator, `(` or `;`
    fn expects_operand(output: &AtomSequence) -> bool {
        match output.as_slice().last() {
            None => true,
            Some(prev) => {
                prev.kind == AtomKind::Operator
                    || prev.kind == AtomKind::Comma
                    || prev.is_open_bracket()
            }
        }
    }

    fn close_number(&self, buffer: &str) -> FormulaResult<Atom> {
        let sep = self.config.decimal_separator;
        let mut text = buffer.to_string();
        if text.ends_with(sep) {
            text.push('0');
        }
        let value: f64 = text
            .replace(sep, ".")
            .parse()
            .map_err(|_| FormulaError::Syntax)?;
        Ok(Atom::value(text, value))
    }

    fn close_identifier(&self, name: &str, closing: Option<char>) -> Atom {
        if closing == Some('(') {
            return Atom::function(name);
        }
        if let Some(value) = self.config.constants.get(name) {
            return Atom::value(name, value);
        }
        Atom::variable(name, self.variables.get(name))
    }
}
