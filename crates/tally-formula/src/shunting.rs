//! Infix to postfix transformation (shunting-yard)
//!
//! Uses an explicit operator stack. No arity or bracket matching is checked
//! here; malformed input surfaces as a stack underflow in the evaluator.

use crate::atom::{Atom, AtomKind, AtomSequence};

/// Operator precedence; `-1` for atoms that never sit on the operator stack
pub fn precedence(atom: &Atom) -> i8 {
    match atom.kind {
        AtomKind::Bracket => 5,
        AtomKind::Function => 4,
        AtomKind::Comma => 0,
        AtomKind::Operator => match atom.name.as_str() {
            "^" => 3,
            "*" | "/" | "%" => 2,
            "+" | "-" => 1,
            _ => -1,
        },
        _ => -1,
    }
}

fn is_stack_operator(atom: &Atom) -> bool {
    matches!(
        atom.kind,
        AtomKind::Operator | AtomKind::Function | AtomKind::Comma
    )
}

/// Convert the infix sequence into postfix order, appending to `output`
///
/// Popping uses `>=`, which makes every operator left-associative, `^`
/// included: `2^3^2` is `(2^3)^2`.
pub fn to_postfix(infix: &AtomSequence, output: &mut AtomSequence) {
    let mut stack: Vec<Atom> = Vec::new();

    for atom in infix {
        match atom.kind {
            AtomKind::Value | AtomKind::Variable => {
                output.push(atom.clone());
            }
            AtomKind::Bracket if atom.is_open_bracket() => {
                stack.push(atom.clone());
            }
            AtomKind::Bracket => {
                while let Some(top) = stack.pop() {
                    if top.is_open_bracket() {
                        break;
                    }
                    output.push(top);
                }
            }
            AtomKind::Operator | AtomKind::Function | AtomKind::Comma => {
                let current = precedence(atom);
                while let Some(top) = stack.last() {
                    if !is_stack_operator(top) || precedence(top) < current {
                        break;
                    }
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(atom.clone());
            }
            _ => {
                output.push(atom.clone());
            }
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    log::trace!("postfix: {}", render(output));
}

/// Space-separated atom names, for trace output
pub fn render(sequence: &AtomSequence) -> String {
    sequence
        .iter()
        .map(|atom| atom.name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
