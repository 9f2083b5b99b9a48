//! Formula parser facade
//!
//! Ties the tokenizer, the shunting-yard transformer and the evaluator together
//! and keeps the sticky error state of the last call.

use crate::atom::{render_number, Atom, AtomKind, AtomSequence};
use crate::config::ParserConfig;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Evaluator;
use crate::functions::{builtin_registry, FunctionRegistry};
use crate::random::{RandomSource, ThreadRandom};
use crate::shunting::to_postfix;
use crate::tokenizer::Tokenizer;
use crate::variables::VariableTable;

/// Stateful formula evaluator
///
/// Each call to [`result`](Self::result) rebuilds the infix and postfix
/// sequences and resets the error state. An instance must not be used from
/// several threads at once; give each thread its own parser.
///
/// A formula with more atoms than [`ParserConfig::max_atoms`] is reported as
/// a syntax error; [`infix`](Self::infix) then reports `overflowed()`.
///
/// # Example
/// ```rust
/// use tally_formula::FormulaParser;
///
/// let mut parser = FormulaParser::new();
/// parser.variables_mut().set("X", 10.0);
/// assert_eq!(parser.result("X*2"), 20.0);
/// assert!(!parser.error());
///
/// assert_eq!(parser.result("5/0"), 0.0);
/// assert_eq!(parser.error_message(), "Divide by zero");
/// ```
pub struct FormulaParser {
    config: ParserConfig,
    variables: VariableTable,
    functions: &'static FunctionRegistry,
    random: Box<dyn RandomSource + Send>,
    infix: AtomSequence,
    postfix: AtomSequence,
    last_error: Option<FormulaError>,
    error_message: String,
    last_result: Option<Atom>,
}

impl FormulaParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::build(ParserConfig::default())
    }

    /// Create a parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> FormulaResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ParserConfig) -> Self {
        Self {
            infix: AtomSequence::bounded(config.max_atoms),
            postfix: AtomSequence::bounded(config.max_atoms),
            config,
            variables: VariableTable::new(),
            functions: builtin_registry(),
            random: Box::new(ThreadRandom),
            last_error: None,
            error_message: String::new(),
            last_result: None,
        }
    }

    /// Replace the random source used by `RND`
    pub fn with_random(mut self, random: impl RandomSource + Send + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableTable {
        &mut self.variables
    }

    /// Evaluate `formula`, returning `0.0` on error
    ///
    /// Check [`error`](Self::error) afterwards: a legitimate result of `0.0`
    /// looks the same as a failure.
    pub fn result(&mut self, formula: &str) -> f64 {
        self.try_result(formula).unwrap_or(0.0)
    }

    /// Evaluate `formula`, also returning the error as a `Result`
    ///
    /// The sticky error state is updated exactly as by [`result`](Self::result).
    pub fn try_result(&mut self, formula: &str) -> FormulaResult<f64> {
        self.reset();

        match self.run(formula) {
            Ok(atom) => {
                log::debug!("{:?} = {}", formula, atom.value);
                let value = atom.value;
                self.last_result = Some(atom);
                Ok(value)
            }
            Err(e) => {
                log::debug!("{:?} failed: {}", formula, e);
                self.error_message = e.to_string();
                self.last_result = Some(Atom::error(e.to_string()));
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.infix.clear();
        self.postfix.clear();
        self.last_error = None;
        self.error_message.clear();
        self.last_result = None;
    }

    fn run(&mut self, formula: &str) -> FormulaResult<Atom> {
        Tokenizer::new(&self.config, &self.variables).tokenize(formula, &mut self.infix)?;
        // A truncated formula is never evaluated
        if self.infix.overflowed() {
            log::debug!(
                "{:?} exceeds the capacity guard of {:?} atoms",
                formula,
                self.config.max_atoms
            );
            return Err(FormulaError::Syntax);
        }
        to_postfix(&self.infix, &mut self.postfix);
        log::debug!(
            "{:?}: {} infix atoms, {} postfix atoms",
            formula,
            self.infix.len(),
            self.postfix.len()
        );
        Evaluator::new(self.functions, self.random.as_mut()).evaluate_atom(&self.postfix)
    }

    /// Whether the last call failed
    pub fn error(&self) -> bool {
        self.last_error.is_some()
    }

    /// Message of the last failure, empty after a successful call
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn last_error(&self) -> Option<&FormulaError> {
        self.last_error.as_ref()
    }

    /// Infix atoms of the last call
    pub fn infix(&self) -> &AtomSequence {
        &self.infix
    }

    /// Postfix atoms of the last call
    pub fn postfix(&self) -> &AtomSequence {
        &self.postfix
    }

    /// Final atom of the last call: a Result atom, or an Error atom holding
    /// the message
    pub fn last_atom(&self) -> Option<&Atom> {
        self.last_result.as_ref()
    }

    /// Rendered expression of the last successful call, e.g. `((2+3)*4)`
    pub fn trace(&self) -> Option<&str> {
        self.last_result
            .as_ref()
            .filter(|atom| atom.kind == AtomKind::Result)
            .map(|atom| atom.name.as_str())
    }

    /// Render a number with the configured decimal separator
    pub fn format_value(&self, value: f64) -> String {
        render_number(value, self.config.decimal_separator)
    }

    /// Evaluate with a throwaway default parser, returning `0.0` on error
    pub fn parse(formula: &str) -> f64 {
        Self::new().result(formula)
    }

    /// Evaluate with a throwaway default parser
    pub fn try_parse(formula: &str) -> FormulaResult<f64> {
        Self::new().try_result(formula)
    }
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self::new()
    }
}
