//! Built-in functions
//!
//! Every builtin maps a slice of numeric arguments to a number. Arity is
//! checked here, before dispatch, so implementations may index their arguments
//! directly.

pub mod convert;
pub mod math;

use crate::error::{FormulaError, FormulaResult};
use crate::random::RandomSource;
use ahash::AHashMap;
use std::sync::OnceLock;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Shared registry of all builtins
pub fn builtin_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Per-call state handed to function implementations
pub struct CallContext<'a> {
    pub random: &'a mut dyn RandomSource,
}

/// Function implementation signature
pub type FunctionImpl = fn(&[f64], &mut CallContext<'_>) -> FormulaResult<f64>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
    /// Result may differ between calls with the same arguments
    pub volatile: bool,
}

impl FunctionDef {
    /// Non-volatile function taking exactly `arity` arguments
    fn fixed(name: &'static str, arity: usize, implementation: FunctionImpl) -> Self {
        Self {
            name,
            min_args: arity,
            max_args: Some(arity),
            implementation,
            volatile: false,
        }
    }

    /// Whether `count` arguments are accepted
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.map_or(true, |max| count <= max)
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: AHashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register_elementary_functions();
        registry.register_trig_functions();
        registry.register_binary_functions();
        registry.register_conversion_functions();
        registry.register_sign_functions();

        registry
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.values().map(|def| def.name).collect();
        names.sort_unstable();
        names
    }

    /// Check arity and dispatch `name` with `args`
    pub fn call(&self, name: &str, args: &[f64], ctx: &mut CallContext<'_>) -> FormulaResult<f64> {
        let def = self
            .get(name)
            .ok_or_else(|| FormulaError::UndefinedFunction(name.to_string()))?;

        if !def.accepts(args.len()) {
            return Err(FormulaError::ArityMismatch(name.to_string()));
        }

        (def.implementation)(args, ctx)
    }

    fn register_elementary_functions(&mut self) {
        let unary: [(&'static str, FunctionImpl); 14] = [
            ("ABS", math::fn_abs),
            ("SGN", math::fn_sign),
            ("SIGN", math::fn_sign),
            ("INT", math::fn_floor),
            ("TRUNC", math::fn_floor),
            ("FLOOR", math::fn_floor),
            ("CEIL", math::fn_ceil),
            ("ROUND", math::fn_round),
            ("FRAC", math::fn_frac),
            ("SQRT", math::fn_sqrt),
            ("LN", math::fn_ln),
            ("EXP", math::fn_exp),
            ("VALPO", convert::fn_valpo),
            ("VALNE", convert::fn_valne),
        ];
        for (name, implementation) in unary {
            self.register(FunctionDef::fixed(name, 1, implementation));
        }

        // LOG(x) is base 10, LOG(x; base) uses the given base
        self.register(FunctionDef {
            name: "LOG",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_log,
            volatile: false,
        });

        // RND (volatile)
        self.register(FunctionDef {
            name: "RND",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_rnd,
            volatile: true,
        });
    }

    fn register_trig_functions(&mut self) {
        let trig: [(&'static str, FunctionImpl); 9] = [
            ("SIN", math::fn_sin),
            ("COS", math::fn_cos),
            ("TAN", math::fn_tan),
            ("ASIN", math::fn_asin),
            ("ACOS", math::fn_acos),
            ("ATAN", math::fn_atan),
            ("SINH", math::fn_sinh),
            ("COSH", math::fn_cosh),
            ("TANH", math::fn_tanh),
        ];
        for (name, implementation) in trig {
            self.register(FunctionDef::fixed(name, 1, implementation));
        }
    }

    fn register_binary_functions(&mut self) {
        let binary: [(&'static str, FunctionImpl); 6] = [
            ("MAX", math::fn_max),
            ("MIN", math::fn_min),
            ("LIMINF", math::fn_max),
            ("LIMSUP", math::fn_min),
            ("POWER", math::fn_power),
            ("POW", math::fn_power),
        ];
        for (name, implementation) in binary {
            self.register(FunctionDef::fixed(name, 2, implementation));
        }
    }

    fn register_conversion_functions(&mut self) {
        let conversions: [(&'static str, FunctionImpl); 6] = [
            ("DAYS2MINS", convert::fn_days2mins),
            ("DAYS2HOURS", convert::fn_days2hours),
            ("HOURS2MINS", convert::fn_hours2mins),
            ("HOURS2DAYS", convert::fn_hours2days),
            ("MINS2HOURS", convert::fn_mins2hours),
            ("MINS2DAYS", convert::fn_mins2days),
        ];
        for (name, implementation) in conversions {
            self.register(FunctionDef::fixed(name, 1, implementation));
        }
    }

    fn register_sign_functions(&mut self) {
        let tests: [(&'static str, FunctionImpl); 4] = [
            ("IFPO", convert::fn_ifpo),
            ("IFNE", convert::fn_ifne),
            ("IFZE", convert::fn_ifze),
            ("IFNZ", convert::fn_ifnz),
        ];
        for (name, implementation) in tests {
            self.register(FunctionDef::fixed(name, 1, implementation));
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    fn call(name: &str, args: &[f64]) -> FormulaResult<f64> {
        let mut random = SeededRandom::new(7);
        let mut ctx = CallContext {
            random: &mut random,
        };
        builtin_registry().call(name, args, &mut ctx)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(builtin_registry().get("abs").is_some());
        assert!(builtin_registry().get("Days2Mins").is_some());
        assert!(builtin_registry().get("NOPE").is_none());
    }

    #[test]
    fn test_undefined_function() {
        let err = call("NOPE", &[1.0]).unwrap_err();
        assert_eq!(err, FormulaError::UndefinedFunction("NOPE".into()));
        assert_eq!(err.to_string(), "Undefined function: NOPE");
    }

    #[test]
    fn test_arity_mismatch_uses_called_name() {
        let err = call("SIGN", &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.to_string(), "Wrong parameters number in: SIGN");

        assert!(call("MAX", &[1.0]).is_err());
        assert!(call("ABS", &[]).is_err());
        assert!(call("LOG", &[1.0, 2.0, 3.0]).is_err());
        assert!(call("LOG", &[100.0]).is_ok());
        assert!(call("LOG", &[8.0, 2.0]).is_ok());
    }

    #[test]
    fn test_only_rnd_is_volatile() {
        let registry = builtin_registry();
        for name in registry.names() {
            let def = registry.get(name).unwrap();
            assert_eq!(def.volatile, name == "RND", "{name}");
        }
    }

    #[test]
    fn test_names_cover_builtins() {
        let names = builtin_registry().names();
        assert_eq!(names.len(), 41);
        for name in ["ABS", "LIMINF", "LIMSUP", "MINS2DAYS", "IFNZ", "RND", "TANH"] {
            assert!(names.contains(&name), "{name}");
        }
    }
}
