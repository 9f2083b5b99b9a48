//! # tally-formula
//!
//! Small, synchronous evaluator for numeric formulas.
//!
//! This crate provides:
//! - Tokenizing (text → infix atoms, with variables and constants resolved)
//! - Shunting-yard transformation (infix → postfix atoms)
//! - Postfix evaluation on a value stack
//! - Built-in numeric functions (~40)
//!
//! Function arguments are separated by `;`; both `.` and `,` are read as the
//! configured decimal separator.
//!
//! ## Example
//!
//! ```rust
//! use tally_formula::FormulaParser;
//!
//! let mut parser = FormulaParser::new();
//! assert_eq!(parser.result("2+3*4"), 14.0);
//! assert_eq!(parser.result("MAX(3;7)"), 7.0);
//! assert_eq!(parser.result("2^3^2"), 64.0);
//! ```

pub mod atom;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod random;
pub mod shunting;
pub mod tokenizer;
pub mod variables;

pub use atom::{render_number, Atom, AtomKind, AtomSequence};
pub use config::{Constants, ParserConfig, DEFAULT_MAX_ATOMS};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::Evaluator;
pub use functions::{builtin_registry, FunctionDef, FunctionRegistry};
pub use parser::FormulaParser;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use variables::VariableTable;
