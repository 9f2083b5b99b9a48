//! Postfix evaluator
//!
//! Runs the postfix atom sequence on a value stack, dispatching function atoms
//! into the [`FunctionRegistry`].

use crate::atom::{Atom, AtomKind, AtomSequence};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::{CallContext, FunctionRegistry};
use crate::random::RandomSource;

/// Stack machine over one function registry and random source
pub struct Evaluator<'a> {
    functions: &'a FunctionRegistry,
    random: &'a mut dyn RandomSource,
}

impl<'a> Evaluator<'a> {
    pub fn new(functions: &'a FunctionRegistry, random: &'a mut dyn RandomSource) -> Self {
        Self { functions, random }
    }

    /// Evaluate `postfix` to a single number
    pub fn evaluate(&mut self, postfix: &AtomSequence) -> FormulaResult<f64> {
        self.evaluate_atom(postfix).map(|atom| atom.value)
    }

    /// Evaluate `postfix`, returning the final atom with its rendered name
    ///
    /// The sequence is well formed only if exactly one operand is left on the
    /// stack once every atom has been consumed.
    pub fn evaluate_atom(&mut self, postfix: &AtomSequence) -> FormulaResult<Atom> {
        let mut stack: Vec<Atom> = Vec::with_capacity(postfix.len());

        for atom in postfix {
            match atom.kind {
                AtomKind::Value | AtomKind::Variable | AtomKind::Result | AtomKind::Comma => {
                    stack.push(atom.clone());
                }
                AtomKind::Operator => {
                    let right = pop_operand(&mut stack)?;
                    let left = pop_operand(&mut stack)?;
                    let value = apply_operator(&atom.name, left.value, right.value)?;
                    stack.push(Atom::result(
                        format!("({}{}{})", left.name, atom.name, right.name),
                        value,
                    ));
                }
                AtomKind::Function => {
                    let args = pop_arguments(&mut stack)?;
                    let values: Vec<f64> = args.iter().map(|arg| arg.value).collect();
                    let mut ctx = CallContext {
                        random: &mut *self.random,
                    };
                    let value = self.functions.call(&atom.name, &values, &mut ctx)?;
                    let rendered: Vec<&str> = args.iter().map(|arg| arg.name.as_str()).collect();
                    stack.push(Atom::result(
                        format!("{}({})", atom.name, rendered.join(";")),
                        value,
                    ));
                }
                // Unmatched brackets and stray atoms
                _ => return Err(FormulaError::Syntax),
            }

            log::trace!("{} -> stack depth {}", atom.name, stack.len());
        }

        match stack.pop() {
            Some(result) if stack.is_empty() && result.is_operand() => {
                log::trace!("{} = {}", result.name, result.value);
                Ok(result)
            }
            _ => Err(FormulaError::Syntax),
        }
    }
}

/// Pop a numeric atom; underflow or a stray comma is a syntax error
fn pop_operand(stack: &mut Vec<Atom>) -> FormulaResult<Atom> {
    match stack.pop() {
        Some(atom) if atom.is_operand() => Ok(atom),
        _ => Err(FormulaError::Syntax),
    }
}

/// Pop the arguments of a function atom, in source order
///
/// With no comma on top a single argument is taken (none on an empty stack).
/// Otherwise each comma marker contributes the operand pushed after it, and the
/// operand below the last marker is the first argument. Pops yield the
/// arguments last-to-first, hence the reverse.
fn pop_arguments(stack: &mut Vec<Atom>) -> FormulaResult<Vec<Atom>> {
    let top = match stack.pop() {
        None => return Ok(Vec::new()),
        Some(top) => top,
    };

    if top.kind != AtomKind::Comma {
        if !top.is_operand() {
            return Err(FormulaError::Syntax);
        }
        return Ok(vec![top]);
    }

    let mut args = Vec::new();
    loop {
        args.push(pop_operand(stack)?);
        match stack.last() {
            Some(next) if next.kind == AtomKind::Comma => {
                stack.pop();
            }
            _ => {
                args.push(pop_operand(stack)?);
                break;
            }
        }
    }

    args.reverse();
    Ok(args)
}

/// Compute `left op right`
fn apply_operator(op: &str, left: f64, right: f64) -> FormulaResult<f64> {
    match op {
        "^" => Ok(left.powf(right)),
        "/" => {
            if right == 0.0 {
                Err(FormulaError::DivideByZero)
            } else {
                Ok(left / right)
            }
        }
        "*" => Ok(left * right),
        "%" => Ok(left % right),
        "+" => Ok(left + right),
        "-" => Ok(left - right),
        _ => Err(FormulaError::UnknownOperator(op.to_string())),
    }
}
