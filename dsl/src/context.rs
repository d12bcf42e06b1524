//! The symbol context that expressions are compiled against.
//!
//! A context maps names to variable slots in the caller's data record,
//! to constant values, or to native functions. Contexts are cheap to
//! clone and copy-on-write: an expression compiled against a context
//! never observes later changes made through another handle.

use std::collections::HashMap;
use std::sync::Arc;

use mathjit_problems::Problem;

use crate::builtins;
use crate::diagnostic::{Diagnostic, Label};

/// A native function callable from compiled code.
///
/// The arity is the variant; overloading a name by arity is not
/// supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeFn {
    F1(fn(f64) -> f64),
    F2(fn(f64, f64) -> f64),
    F3(fn(f64, f64, f64) -> f64),
}

impl NativeFn {
    pub fn arity(&self) -> usize {
        match self {
            NativeFn::F1(_) => 1,
            NativeFn::F2(_) => 2,
            NativeFn::F3(_) => 3,
        }
    }

    /// Calls the function. `args` must have exactly `arity()` values.
    pub fn invoke(&self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity());
        match self {
            NativeFn::F1(f) => f(args[0]),
            NativeFn::F2(f) => f(args[0], args[1]),
            NativeFn::F3(f) => f(args[0], args[1], args[2]),
        }
    }
}

/// One binding in the context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Symbol {
    /// A variable stored in the caller's data record. `slot` is the byte
    /// offset divided by 8.
    Variable { slot: u16 },
    /// A value fixed at registration time.
    Constant { value: f64 },
    /// A native function.
    Function { func: NativeFn },
}

#[derive(Clone, Debug, Default)]
struct ContextData {
    symbols: HashMap<String, Symbol>,
}

/// The symbol environment supplied by the embedder.
///
/// Clones share storage until one of them is mutated.
#[derive(Clone, Debug, Default)]
pub struct Context {
    data: Arc<ContextData>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a symbol by name.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.data.symbols.get(name).copied()
    }

    /// Registers a variable binding at a byte offset into the caller's
    /// data record. The offset must be a non-negative multiple of 8.
    pub fn add_variable(&mut self, name: &str, offset: usize) -> Result<(), Diagnostic> {
        validate_name(name)?;
        if offset % 8 != 0 {
            return Err(invalid_argument(format!(
                "variable '{name}' offset {offset} is not a multiple of 8"
            )));
        }
        let slot = offset / 8;
        if slot > u16::MAX as usize {
            return Err(invalid_argument(format!(
                "variable '{name}' offset {offset} is out of range"
            )));
        }
        self.insert(name, Symbol::Variable { slot: slot as u16 })
    }

    /// Registers a constant binding.
    pub fn add_constant(&mut self, name: &str, value: f64) -> Result<(), Diagnostic> {
        validate_name(name)?;
        self.insert(name, Symbol::Constant { value })
    }

    /// Registers a native function binding. The arity is carried by the
    /// `NativeFn` variant.
    pub fn add_function(&mut self, name: &str, func: NativeFn) -> Result<(), Diagnostic> {
        validate_name(name)?;
        self.insert(name, Symbol::Function { func })
    }

    /// Registers the built-in constants and math functions, overwriting
    /// any bindings that share their names.
    pub fn add_builtins(&mut self) {
        let data = Arc::make_mut(&mut self.data);
        for (name, value) in builtins::CONSTANTS.entries() {
            data.symbols
                .insert((*name).to_string(), Symbol::Constant { value: *value });
        }
        for (name, func) in builtins::FUNCTIONS.entries() {
            data.symbols
                .insert((*name).to_string(), Symbol::Function { func: *func });
        }
    }

    fn insert(&mut self, name: &str, symbol: Symbol) -> Result<(), Diagnostic> {
        let data = Arc::make_mut(&mut self.data);
        if data.symbols.contains_key(name) {
            return Err(Diagnostic::problem(
                Problem::AlreadyExists,
                Label::context_free(format!("'{name}' is already defined")),
            ));
        }
        data.symbols.insert(name.to_string(), symbol);
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), Diagnostic> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(invalid_argument(format!("'{name}' is not an identifier")))
    }
}

fn invalid_argument(message: String) -> Diagnostic {
    Diagnostic::problem(Problem::InvalidArgument, Label::context_free(message))
}
