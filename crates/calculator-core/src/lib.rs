//! # Calculator Core
//!
//! Operand parsing and arithmetic for the calculator service.
//!
//! - **Parser**: turns a text token into an integer or a float, chosen by
//!   whether the token contains a decimal point
//! - **Calculator**: add, subtract, multiply, divide and power over parsed
//!   numbers, with a type check for dynamically typed operands
//! - **Errors**: a single error kind whose message is safe to show clients
//!
//! ## Example
//!
//! ```rust
//! use calculator_core::{parse, Calculator};
//!
//! let calc = Calculator::new();
//! let sum = calc.add(&parse("2.5").unwrap(), &parse("1.5").unwrap()).unwrap();
//! assert_eq!(sum.to_string(), "4.0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calculator;
pub mod error;
pub mod number;

pub use calculator::{check_types, Calculator, Operation};
pub use error::{CalcError, CalcResult};
pub use number::{parse, Number};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::{Calculator, Operation};
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::number::{parse, Number};
}
