//! Numeric values and the operand parser.
//!
//! A [`Number`] is either an exact integer of any size or a float. Which
//! one a token becomes depends on its spelling, not its value: `"2"` is an
//! integer, `"2.0"` is a float.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde_json::Value;

use crate::error::{CalcError, CalcResult};

/// A parsed numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact integer, unbounded.
    Int(BigInt),
    /// Double precision float.
    Float(f64),
}

impl Number {
    /// Returns the value as a float, widening integers.
    ///
    /// Fails for integers too large to be represented as a finite float.
    pub fn to_f64(&self) -> CalcResult<f64> {
        match self {
            Self::Int(i) => i
                .to_f64()
                .filter(|x| x.is_finite())
                .ok_or_else(CalcError::out_of_range),
            Self::Float(x) => Ok(*x),
        }
    }

    /// Returns true for `0` and `0.0` (and `-0.0`).
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(i) => i.is_zero(),
            Self::Float(x) => *x == 0.0,
        }
    }

    /// Returns true if this is a float.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }
}

/// Parses an operand token into a [`Number`].
///
/// Tokens containing a `.` are parsed as floats, everything else as an
/// integer. Surrounding whitespace is ignored and single `_` separators
/// between digits are allowed. Empty tokens and anything that is not a
/// complete numeric literal are rejected.
///
/// # Example
///
/// ```rust
/// use calculator_core::{parse, Number};
///
/// assert_eq!(parse("10").unwrap(), Number::from(10_i64));
/// assert_eq!(parse("1_000").unwrap(), Number::from(1000_i64));
/// assert_eq!(parse("1.0").unwrap(), Number::Float(1.0));
/// assert!(parse("1.2.3").is_err());
/// ```
pub fn parse(token: &str) -> CalcResult<Number> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CalcError::not_a_number());
    }
    let token = strip_digit_separators(token).ok_or_else(CalcError::not_a_number)?;

    let parsed = if token.contains('.') {
        token.parse::<f64>().map(Number::Float).ok()
    } else {
        parse_integer(&token).map(Number::Int)
    };

    parsed.ok_or_else(CalcError::not_a_number)
}

/// Removes `_` separators. Each one must sit between two digits.
fn strip_digit_separators(token: &str) -> Option<Cow<'_, str>> {
    if !token.contains('_') {
        return Some(Cow::Borrowed(token));
    }

    let bytes = token.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'_' {
            continue;
        }
        let after_digit = i > 0 && bytes[i - 1].is_ascii_digit();
        let before_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        if !(after_digit && before_digit) {
            return None;
        }
    }

    Some(Cow::Owned(token.replace('_', "")))
}

/// Optional sign followed by decimal digits only.
fn parse_integer(token: &str) -> Option<BigInt> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    Some(if negative { -magnitude } else { magnitude })
}

impl FromStr for Number {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(BigInt::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Accepts JSON numbers only. Strings, booleans, null, arrays and objects
/// are not numeric, even when a string holds a numeric literal.
impl TryFrom<&Value> for Number {
    type Error = CalcError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Value::Number(n) = value else {
            return Err(CalcError::not_numeric());
        };

        if let Some(i) = n.as_i64() {
            Ok(Self::from(i))
        } else if let Some(u) = n.as_u64() {
            Ok(Self::Int(BigInt::from(u)))
        } else {
            n.as_f64().map(Self::Float).ok_or_else(CalcError::not_numeric)
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write_float(f, *x),
        }
    }
}

/// Writes a float with the shortest round-trip digits, always marked as a
/// float: positional with a `.0` for decimal exponents in `-4..16`,
/// otherwise scientific with a signed two-digit exponent (`1e+16`).
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }

    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return write!(f, "{value:?}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return write!(f, "{value:?}");
    };

    if value.is_sign_negative() {
        f.write_str("-")?;
    }

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        write!(f, "0.{zeros}{digits}")
    } else {
        let split = exponent.unsigned_abs() as usize + 1;
        if digits.len() > split {
            write!(f, "{}.{}", &digits[..split], &digits[split..])
        } else {
            write!(f, "{digits}{}.0", "0".repeat(split - digits.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use serde_json::json;

    use crate::error::{NOT_A_NUMBER, NOT_NUMERIC, OUT_OF_RANGE};

    fn int(i: i64) -> Number {
        Number::from(i)
    }

    fn float(x: f64) -> Number {
        Number::from(x)
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse("10").unwrap(), int(10));
        assert_eq!(parse("-7").unwrap(), int(-7));
        assert_eq!(parse("+3").unwrap(), int(3));
        assert_eq!(parse("0").unwrap(), int(0));
        assert_eq!(parse("007").unwrap(), int(7));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse("1.0").unwrap(), float(1.0));
        assert_eq!(parse("2.5").unwrap(), float(2.5));
        assert_eq!(parse("-.5").unwrap(), float(-0.5));
        assert_eq!(parse("3.").unwrap(), float(3.0));
        assert_relative_eq!(parse("1.5e3").unwrap().to_f64().unwrap(), 1500.0);
    }

    #[test]
    fn test_decimal_point_selects_float() {
        assert!(parse("4.0").unwrap().is_float());
        assert!(!parse("4").unwrap().is_float());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse(" 5 ").unwrap(), int(5));
        assert_eq!(parse("\t1.5\n").unwrap(), float(1.5));
    }

    #[test]
    fn test_parse_digit_separators() {
        assert_eq!(parse("1_000").unwrap(), int(1000));
        assert_eq!(parse("-1_000_000").unwrap(), int(-1_000_000));
        assert_eq!(parse("1_000.2_5").unwrap(), float(1000.25));

        for token in ["_1", "1_", "1__0", "1_.5", "1._5", "+_1", "_"] {
            assert!(parse(token).is_err(), "token {token:?}");
        }
    }

    #[test]
    fn test_parse_rejects_invalid_tokens() {
        for token in ["", "   ", "abc", "1.2.3", ".", "1e5", "inf", "nan", "12abc", "1,5", "+", "-", "--1", "+-1"] {
            let err = parse(token).unwrap_err();
            assert_eq!(err.message(), NOT_A_NUMBER, "token {token:?}");
        }
    }

    #[test]
    fn test_parse_large_integers_exactly() {
        let n = parse("99999999999999999999").unwrap();
        assert_eq!(n.to_string(), "99999999999999999999");
        assert!(!n.is_float());

        let n = parse("-123456789012345678901234567890").unwrap();
        assert_eq!(n.to_string(), "-123456789012345678901234567890");
    }

    #[test]
    fn test_to_f64() {
        assert_relative_eq!(int(3).to_f64().unwrap(), 3.0);
        assert_relative_eq!(float(0.25).to_f64().unwrap(), 0.25);

        let huge = parse(&format!("1{}", "0".repeat(400))).unwrap();
        assert_eq!(huge.to_f64().unwrap_err().message(), OUT_OF_RANGE);
    }

    #[test]
    fn test_from_str() {
        let n: Number = "42".parse().unwrap();
        assert_eq!(n, int(42));
        assert_eq!(Number::from(BigInt::from(42)), n);
    }

    #[test]
    fn test_is_zero() {
        assert!(int(0).is_zero());
        assert!(float(0.0).is_zero());
        assert!(float(-0.0).is_zero());
        assert!(!float(1e-300).is_zero());
    }

    #[test]
    fn test_try_from_json() {
        assert_eq!(Number::try_from(&json!(2)).unwrap(), int(2));
        assert_eq!(Number::try_from(&json!(u64::MAX)).unwrap().to_string(), u64::MAX.to_string());
        assert_eq!(Number::try_from(&json!(2.0)).unwrap(), float(2.0));
        assert_eq!(Number::try_from(&json!(-1.25)).unwrap(), float(-1.25));

        for value in [json!("2"), json!(null), json!(true), json!([1]), json!({"x": 1})] {
            let err = Number::try_from(&value).unwrap_err();
            assert_eq!(err.message(), NOT_NUMERIC);
        }
    }

    #[test]
    fn test_display_int() {
        assert_eq!(int(4).to_string(), "4");
        assert_eq!(int(-2).to_string(), "-2");
    }

    #[test]
    fn test_display_float_positional() {
        assert_eq!(float(4.0).to_string(), "4.0");
        assert_eq!(float(0.5).to_string(), "0.5");
        assert_eq!(float(-2.5).to_string(), "-2.5");
        assert_eq!(float(123.456).to_string(), "123.456");
        assert_eq!(float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(float(0.0001).to_string(), "0.0001");
        assert_eq!(float(1e15).to_string(), "1000000000000000.0");
        assert_eq!(float(0.0).to_string(), "0.0");
        assert_eq!(float(-0.0).to_string(), "-0.0");
    }

    #[test]
    fn test_display_float_scientific() {
        assert_eq!(float(1e16).to_string(), "1e+16");
        assert_eq!(float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(float(-2.5e100).to_string(), "-2.5e+100");
        assert_eq!(float(1e-300).to_string(), "1e-300");
    }

    #[test]
    fn test_display_float_non_finite() {
        assert_eq!(float(f64::INFINITY).to_string(), "inf");
        assert_eq!(float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(float(f64::NAN).to_string(), "nan");
    }

    proptest! {
        #[test]
        fn prop_parse_integer_literal(i in any::<i64>()) {
            prop_assert_eq!(parse(&i.to_string()).unwrap(), int(i));
        }

        #[test]
        fn prop_parse_long_integer_literal(digits in "-?[1-9][0-9]{0,80}") {
            prop_assert_eq!(parse(&digits).unwrap().to_string(), digits);
        }

        #[test]
        fn prop_parse_float_literal(x in -1e15f64..1e15f64) {
            let token = format!("{x:?}");
            prop_assume!(token.contains('.'));
            prop_assert_eq!(parse(&token).unwrap(), float(x));
        }

        #[test]
        fn prop_rendered_float_parses_back(x in -1e15f64..1e15f64) {
            let rendered = float(x).to_string();
            prop_assume!(rendered.contains('.'));
            prop_assert_eq!(parse(&rendered).unwrap(), float(x));
        }
    }
}
