//! Atom types flowing through every stage of the pipeline

/// Classification of an [`Atom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AtomKind {
    /// Numeric literal or resolved constant
    Value,
    /// Variable resolved from the variable table
    Variable,
    /// Single-character operator (`+ - * / % ^`)
    Operator,
    /// Function name, resolved at evaluation time
    Function,
    /// Value computed by the evaluator
    Result,
    /// `(` or `)`
    Bracket,
    /// Argument separator `;`
    Comma,
    /// Failure carried as an atom; the name holds the message
    Error,
    /// Placeholder
    #[default]
    None,
}

/// A classified token or intermediate computed value
///
/// `value` is only meaningful for [`AtomKind::Value`], [`AtomKind::Variable`] and
/// [`AtomKind::Result`]; for every other kind the name carries the information.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    pub name: String,
    pub value: f64,
    pub kind: AtomKind,
}

impl Atom {
    pub fn new(name: impl Into<String>, value: f64, kind: AtomKind) -> Self {
        Self {
            name: name.into(),
            value,
            kind,
        }
    }

    pub fn value(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, value, AtomKind::Value)
    }

    pub fn variable(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, value, AtomKind::Variable)
    }

    pub fn result(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, value, AtomKind::Result)
    }

    pub fn operator(op: char) -> Self {
        Self::new(op.to_string(), 0.0, AtomKind::Operator)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, AtomKind::Function)
    }

    pub fn bracket(c: char) -> Self {
        Self::new(c.to_string(), 0.0, AtomKind::Bracket)
    }

    pub fn comma() -> Self {
        Self::new(";", 0.0, AtomKind::Comma)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, 0.0, AtomKind::Error)
    }

    /// True for atoms carrying a number (values, variables and results)
    pub fn is_operand(&self) -> bool {
        matches!(
            self.kind,
            AtomKind::Value | AtomKind::Variable | AtomKind::Result
        )
    }

    pub fn is_open_bracket(&self) -> bool {
        self.kind == AtomKind::Bracket && self.name == "("
    }

    pub fn is_close_bracket(&self) -> bool {
        self.kind == AtomKind::Bracket && self.name == ")"
    }
}

/// Ordered, append-only sequence of atoms with an optional capacity guard
///
/// Once the guard is reached further pushes are dropped (and logged) rather than
/// failing; the evaluation of a truncated sequence then ends in a syntax error.
#[derive(Debug, Clone, Default)]
pub struct AtomSequence {
    atoms: Vec<Atom>,
    capacity: Option<usize>,
    overflowed: bool,
}

impl AtomSequence {
    /// Create an unbounded sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence that stops accepting atoms after `capacity`
    pub fn bounded(capacity: Option<usize>) -> Self {
        Self {
            atoms: Vec::new(),
            capacity,
            overflowed: false,
        }
    }

    /// Append an atom; returns `false` if the capacity guard dropped it
    pub fn push(&mut self, atom: Atom) -> bool {
        if let Some(cap) = self.capacity {
            if self.atoms.len() >= cap {
                if !self.overflowed {
                    log::warn!("atom sequence reached its capacity of {cap}, dropping further atoms");
                    self.overflowed = true;
                }
                return false;
            }
        }
        self.atoms.push(atom);
        true
    }

    /// Remove all atoms, keeping the capacity guard
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.overflowed = false;
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Whether any atom has been dropped since the last clear
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn as_slice(&self) -> &[Atom] {
        &self.atoms
    }

    pub(crate) fn atoms_mut(&mut self) -> &mut Vec<Atom> {
        &mut self.atoms
    }
}

impl<'a> IntoIterator for &'a AtomSequence {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

/// Render a number for a debug-trace name using the given decimal separator
pub fn render_number(value: f64, decimal_separator: char) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value).replace('.', &decimal_separator.to_string())
    }
}
