// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

//! Runtime compiler for a small math expression language.
//!
//! An embedder registers variables, constants and native functions in a
//! [`Context`], compiles a formula once into an [`Expression`] and then
//! evaluates it many times against data records of `f64` values:
//!
//! ```
//! use mathjit::{Context, Expression, Options};
//!
//! let mut ctx = Context::new();
//! ctx.add_builtins();
//! ctx.add_variable("x", 0).unwrap();
//! ctx.add_variable("y", 8).unwrap();
//!
//! let mut exp = Expression::new();
//! exp.compile(&ctx, "sqrt(x*x + y*y)", Options::NONE, None).unwrap();
//!
//! let mut data = [3.0, 4.0];
//! assert_eq!(exp.evaluate(&mut data), 5.0);
//! ```

mod expression;
mod options;
mod output;

pub use expression::Expression;
pub use mathjit_dsl::context::{Context, NativeFn, Symbol};
pub use mathjit_dsl::diagnostic::{Diagnostic, Label};
pub use mathjit_problems::Problem;
pub use options::Options;
pub use output::{MessageKind, OutputLog};
