//! Variable table consulted by the tokenizer

use crate::atom::{Atom, AtomSequence};

/// Name → value store owned by a [`FormulaParser`](crate::FormulaParser)
///
/// Names are stored uppercase since formulas are uppercased before tokenizing,
/// so `set("x", 1.0)` binds the identifier `X`. Lookups of unbound names yield
/// `0.0`, which is not an error.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    atoms: AtomSequence,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound value of `name`, or `0.0` when absent
    pub fn get(&self, name: &str) -> f64 {
        self.find(name).map(|atom| atom.value).unwrap_or(0.0)
    }

    /// Update the first binding of `name` or append a new one
    pub fn set(&mut self, name: &str, value: f64) {
        let name = name.to_uppercase();
        match self
            .atoms
            .atoms_mut()
            .iter_mut()
            .find(|atom| atom.name == name)
        {
            Some(atom) => atom.value = value,
            None => {
                self.atoms.push(Atom::variable(name, value));
            }
        }
    }

    /// Remove a binding, returning its value
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        let name = name.to_uppercase();
        let atoms = self.atoms.atoms_mut();
        let idx = atoms.iter().position(|atom| atom.name == name)?;
        Some(atoms.remove(idx).value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn clear(&mut self) {
        self.atoms.clear();
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterate over `(name, value)` bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.atoms.iter().map(|atom| (atom.name.as_str(), atom.value))
    }

    fn find(&self, name: &str) -> Option<&Atom> {
        let name = name.to_uppercase();
        self.atoms.iter().find(|atom| atom.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unbound_is_zero() {
        let vars = VariableTable::new();
        assert_eq!(vars.get("X"), 0.0);
        assert!(!vars.contains("X"));
    }

    #[test]
    fn test_set_updates_existing() {
        let mut vars = VariableTable::new();
        vars.set("X", 10.0);
        vars.set("Y", 2.0);
        vars.set("X", 11.0);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("X"), 11.0);
        assert_eq!(vars.get("Y"), 2.0);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let mut vars = VariableTable::new();
        vars.set("rate", 0.5);
        assert_eq!(vars.get("RATE"), 0.5);
        assert_eq!(vars.iter().next(), Some(("RATE", 0.5)));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut vars = VariableTable::new();
        vars.set("A", 1.0);
        vars.set("B", 2.0);

        assert_eq!(vars.remove("a"), Some(1.0));
        assert_eq!(vars.remove("a"), None);
        assert_eq!(vars.len(), 1);

        vars.clear();
        assert!(vars.is_empty());
    }
}
