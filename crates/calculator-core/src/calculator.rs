//! The calculator service.
//!
//! [`Calculator`] holds no state. Integer operands stay exact at any size;
//! any float operand promotes the result to a float.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde_json::Value;

use crate::error::{CalcError, CalcResult};
use crate::number::Number;

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `x + y`
    Add,
    /// `x - y`
    Subtract,
    /// `x * y`
    Multiply,
    /// `x / y`, always a float.
    Divide,
    /// `x ** y`
    Power,
}

impl Operation {
    /// All supported operations.
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Canonical name, as used in routes.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "substract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    /// Accepts the canonical names plus `subtract`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "substract" | "subtract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide" => Ok(Self::Divide),
            "power" => Ok(Self::Power),
            other => Err(CalcError::invalid_operand(format!(
                "Unsupported operation: {other}"
            ))),
        }
    }
}

/// Largest integer power result, in bits, that [`Calculator::power`] will
/// compute exactly.
pub const MAX_POWER_BITS: u64 = 1 << 17;

/// Stateless arithmetic service.
///
/// Construct once and hand copies to whoever needs it.
///
/// # Example
///
/// ```rust
/// use calculator_core::{Calculator, Number};
///
/// let calc = Calculator::new();
/// let two = Number::from(2_i64);
/// assert_eq!(calc.add(&two, &two).unwrap(), Number::from(4_i64));
/// assert!(calc.divide(&two, &Number::Float(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    /// Creates a calculator.
    pub const fn new() -> Self {
        Self
    }

    /// Adds two numbers.
    pub fn add(&self, x: &Number, y: &Number) -> CalcResult<Number> {
        combine(x, y, |a, b| a + b, |a, b| a + b)
    }

    /// Subtracts `y` from `x`.
    pub fn subtract(&self, x: &Number, y: &Number) -> CalcResult<Number> {
        combine(x, y, |a, b| a - b, |a, b| a - b)
    }

    /// Multiplies two numbers.
    pub fn multiply(&self, x: &Number, y: &Number) -> CalcResult<Number> {
        combine(x, y, |a, b| a * b, |a, b| a * b)
    }

    /// Divides `x` by `y`. The result is always a float.
    pub fn divide(&self, x: &Number, y: &Number) -> CalcResult<Number> {
        if y.is_zero() {
            return Err(CalcError::division_by_zero());
        }
        Ok(Number::Float(x.to_f64()? / y.to_f64()?))
    }

    /// Raises `x` to the power `y`.
    ///
    /// Integer powers with a non-negative integer exponent stay exact, up to
    /// [`MAX_POWER_BITS`].
    pub fn power(&self, x: &Number, y: &Number) -> CalcResult<Number> {
        if x.is_zero() && is_negative(y) {
            return Err(CalcError::division_by_zero());
        }

        if let (Number::Int(base), Number::Int(exp)) = (x, y) {
            if !exp.is_negative() {
                return int_pow(base, exp)
                    .map(Number::Int)
                    .ok_or_else(CalcError::out_of_range);
            }
        }

        let (base, exp) = (x.to_f64()?, y.to_f64()?);
        let result = base.powf(exp);
        if result.is_nan() && !base.is_nan() && !exp.is_nan() {
            return Err(CalcError::not_real());
        }
        if result.is_infinite() && base.is_finite() && exp.is_finite() {
            return Err(CalcError::out_of_range());
        }
        Ok(Number::Float(result))
    }

    /// Dispatches `op` on two numbers.
    pub fn apply(&self, op: Operation, x: &Number, y: &Number) -> CalcResult<Number> {
        match op {
            Operation::Add => self.add(x, y),
            Operation::Subtract => self.subtract(x, y),
            Operation::Multiply => self.multiply(x, y),
            Operation::Divide => self.divide(x, y),
            Operation::Power => self.power(x, y),
        }
    }

    /// Type-checks two dynamically typed operands, then applies `op`.
    pub fn evaluate_json(&self, op: Operation, x: &Value, y: &Value) -> CalcResult<Number> {
        let (x, y) = check_types(x, y)?;
        self.apply(op, &x, &y)
    }
}

/// Fails unless both operands are numeric.
pub fn check_types(x: &Value, y: &Value) -> CalcResult<(Number, Number)> {
    Ok((Number::try_from(x)?, Number::try_from(y)?))
}

fn combine(
    x: &Number,
    y: &Number,
    int_op: fn(&BigInt, &BigInt) -> BigInt,
    float_op: fn(f64, f64) -> f64,
) -> CalcResult<Number> {
    match (x, y) {
        (Number::Int(a), Number::Int(b)) => Ok(Number::Int(int_op(a, b))),
        _ => Ok(Number::Float(float_op(x.to_f64()?, y.to_f64()?))),
    }
}

fn is_negative(n: &Number) -> bool {
    match n {
        Number::Int(i) => i.is_negative(),
        Number::Float(x) => *x < 0.0,
    }
}

/// `base ** exp` for `exp >= 0`, or `None` when the result would exceed
/// [`MAX_POWER_BITS`].
fn int_pow(base: &BigInt, exp: &BigInt) -> Option<BigInt> {
    // Bases whose powers never grow.
    if base.is_zero() {
        return Some(if exp.is_zero() { BigInt::one() } else { BigInt::zero() });
    }
    if base.is_one() {
        return Some(BigInt::one());
    }
    if *base == -BigInt::one() {
        let even = (exp % BigInt::from(2)).is_zero();
        return Some(if even { BigInt::one() } else { -BigInt::one() });
    }

    let exp = exp.to_u32()?;
    if base.bits().saturating_mul(u64::from(exp)) > MAX_POWER_BITS {
        return None;
    }
    Some(base.pow(exp))
}
