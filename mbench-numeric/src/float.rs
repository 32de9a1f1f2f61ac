//! Float - Precision-Configured Binary Floating Point
//!
//! Every operation writes its destination in place, rounds to the
//! destination precision with the requested mode and reports a `Status`.
//! NaN and signed infinities are tracked beside the backend representation,
//! which only models finite values.

use crate::rounding::with_rounding;
use crate::{MAX_PRECISION, MIN_PRECISION, NumericError, RoundingMode};
use dashu_base::{Approximation, Sign};
use dashu_float::round::mode::HalfEven;
use dashu_float::round::{Round, Rounded, Rounding};
use dashu_float::{Context, DBig, FBig, Repr};
use std::fmt;
use std::str::FromStr;

/// Working type for multi-step evaluations (rounded once at the end)
pub(crate) type Work = FBig<HalfEven, 2>;

/// Outcome of a rounding operation
///
/// Mirrors the MPFR ternary value: whether the stored result is exact,
/// above or below the mathematical result, or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The stored value is the exact result
    Exact,
    /// The stored value is greater than the exact result
    Above,
    /// The stored value is smaller than the exact result
    Below,
    /// The operation produced NaN
    Invalid,
}

impl Status {
    /// MPFR-style ternary integer: positive, negative or zero
    pub fn code(self) -> i32 {
        match self {
            Status::Above => 1,
            Status::Below => -1,
            Status::Exact | Status::Invalid => 0,
        }
    }

    /// Whether the result was stored without rounding error
    pub fn is_exact(self) -> bool {
        self == Status::Exact
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Nan,
    Infinite(Sign),
    Finite(Repr<2>),
}

/// Binary floating point number with a fixed precision in bits
#[derive(Debug, Clone)]
pub struct Float {
    precision: usize,
    value: Value,
}

fn check_precision(precision: usize) -> Result<usize, NumericError> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(precision)
    } else {
        Err(NumericError::InvalidPrecision(precision))
    }
}

/// Split a rounded backend result into its representation and status
fn settle<R: Round>(rounded: Rounded<FBig<R, 2>>) -> (Repr<2>, Status) {
    match rounded {
        Approximation::Exact(value) => (value.into_repr(), Status::Exact),
        Approximation::Inexact(value, adjust) => {
            let status = match adjust {
                Rounding::AddOne => Status::Above,
                Rounding::SubOne => Status::Below,
                // truncation moves the value toward zero
                Rounding::NoOp if value.sign() == Sign::Negative => Status::Above,
                Rounding::NoOp => Status::Below,
            };
            (value.into_repr(), status)
        }
    }
}

impl Float {
    /// Create a NaN-valued float with the given precision
    pub fn new(precision: usize) -> Result<Self, NumericError> {
        Ok(Self {
            precision: check_precision(precision)?,
            value: Value::Nan,
        })
    }

    /// Create a float parsed from a decimal string, rounded to nearest
    pub fn with_str(precision: usize, input: &str) -> Result<Self, NumericError> {
        let mut float = Self::new(precision)?;
        float.set_str(input, RoundingMode::Nearest)?;
        Ok(float)
    }

    /// Precision in bits
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Whether the value is NaN
    pub fn is_nan(&self) -> bool {
        matches!(self.value, Value::Nan)
    }

    /// Whether the value is an infinity of either sign
    pub fn is_infinite(&self) -> bool {
        matches!(self.value, Value::Infinite(_))
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        matches!(&self.value, Value::Finite(repr) if repr.is_zero())
    }

    /// Whether precision and stored representation are identical.
    ///
    /// Unlike numeric comparison, two NaNs are identical.
    pub fn identical(&self, other: &Float) -> bool {
        self.precision == other.precision && self.value == other.value
    }

    /// Nearest `f64`
    pub fn to_f64(&self) -> f64 {
        match &self.value {
            Value::Nan => f64::NAN,
            Value::Infinite(Sign::Positive) => f64::INFINITY,
            Value::Infinite(Sign::Negative) => f64::NEG_INFINITY,
            Value::Finite(_) => self.work(0).map_or(f64::NAN, |w| w.to_f64().value()),
        }
    }

    pub(crate) fn value(&self) -> &Value {
        &self.value
    }

    /// Finite value lifted to at least `precision` bits
    pub(crate) fn work(&self, precision: usize) -> Option<Work> {
        match &self.value {
            Value::Finite(repr) => {
                let limit = precision.max(self.precision).max(repr.digits());
                Some(Work::from_repr(repr.clone(), Context::new(limit)))
            }
            _ => None,
        }
    }

    pub(crate) fn invalid(&mut self) -> Status {
        self.value = Value::Nan;
        Status::Invalid
    }

    pub(crate) fn infinite(&mut self, sign: Sign) -> Status {
        self.value = Value::Infinite(sign);
        Status::Exact
    }

    pub(crate) fn zero(&mut self) -> Status {
        self.value = Value::Finite(Repr::zero());
        Status::Exact
    }

    pub(crate) fn store_rounded<R: Round>(&mut self, rounded: Rounded<FBig<R, 2>>) -> Status {
        let (repr, status) = settle(rounded);
        self.value = Value::Finite(repr);
        status
    }

    /// Round a working value into this float
    pub(crate) fn store(&mut self, value: Work, rnd: RoundingMode) -> Status {
        let precision = self.precision;
        with_rounding!(rnd, R => {
            self.store_rounded(value.with_rounding::<R>().with_precision(precision))
        })
    }

    /// Parse a decimal string (`nan` and `[+-]inf` accepted)
    pub fn set_str(&mut self, input: &str, rnd: RoundingMode) -> Result<Status, NumericError> {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "nan" | "+nan" | "-nan" => {
                self.value = Value::Nan;
                return Ok(Status::Exact);
            }
            "inf" | "+inf" | "infinity" | "+infinity" => return Ok(self.infinite(Sign::Positive)),
            "-inf" | "-infinity" => return Ok(self.infinite(Sign::Negative)),
            _ => {}
        }

        let decimal = DBig::from_str(trimmed).map_err(|_| NumericError::Parse {
            input: input.to_string(),
        })?;
        let precision = self.precision;
        Ok(with_rounding!(rnd, R => {
            self.store_rounded(
                decimal
                    .with_rounding::<R>()
                    .with_base_and_precision::<2>(precision),
            )
        }))
    }

    /// Copy `src`, rounding to this precision
    pub fn set(&mut self, src: &Float, rnd: RoundingMode) -> Status {
        match &src.value {
            Value::Nan => {
                self.value = Value::Nan;
                Status::Exact
            }
            Value::Infinite(sign) => self.infinite(*sign),
            Value::Finite(repr) if repr.digits() <= self.precision => {
                self.value = Value::Finite(repr.clone());
                Status::Exact
            }
            Value::Finite(repr) => {
                let precision = self.precision;
                let context_bits = src.precision.max(repr.digits());
                with_rounding!(rnd, R => {
                    let wide = FBig::<R, 2>::from_repr(repr.clone(), Context::new(context_bits));
                    self.store_rounded(wide.with_precision(precision))
                })
            }
        }
    }

    /// `self = a + b`
    pub fn set_add(&mut self, a: &Float, b: &Float, rnd: RoundingMode) -> Status {
        match (&a.value, &b.value) {
            (Value::Nan, _) | (_, Value::Nan) => self.invalid(),
            (Value::Infinite(x), Value::Infinite(y)) if x != y => self.invalid(),
            (Value::Infinite(sign), _) | (_, Value::Infinite(sign)) => self.infinite(*sign),
            (Value::Finite(x), Value::Finite(y)) => {
                let precision = self.precision;
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).add(x, y))
                })
            }
        }
    }

    /// `self = a - b`
    pub fn set_sub(&mut self, a: &Float, b: &Float, rnd: RoundingMode) -> Status {
        match (&a.value, &b.value) {
            (Value::Nan, _) | (_, Value::Nan) => self.invalid(),
            (Value::Infinite(x), Value::Infinite(y)) if x == y => self.invalid(),
            (Value::Infinite(sign), _) => self.infinite(*sign),
            (_, Value::Infinite(sign)) => self.infinite(-*sign),
            (Value::Finite(x), Value::Finite(y)) => {
                let precision = self.precision;
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).sub(x, y))
                })
            }
        }
    }

    /// `self = a * b`
    pub fn set_mul(&mut self, a: &Float, b: &Float, rnd: RoundingMode) -> Status {
        match (&a.value, &b.value) {
            (Value::Nan, _) | (_, Value::Nan) => self.invalid(),
            (Value::Infinite(_), Value::Finite(z)) | (Value::Finite(z), Value::Infinite(_))
                if z.is_zero() =>
            {
                self.invalid()
            }
            (Value::Infinite(x), Value::Infinite(y)) => self.infinite(*x * *y),
            (Value::Infinite(x), Value::Finite(y)) | (Value::Finite(y), Value::Infinite(x)) => {
                self.infinite(*x * y.sign())
            }
            (Value::Finite(x), Value::Finite(y)) => {
                let precision = self.precision;
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).mul(x, y))
                })
            }
        }
    }

    /// `self = a / b`
    pub fn set_div(&mut self, a: &Float, b: &Float, rnd: RoundingMode) -> Status {
        match (&a.value, &b.value) {
            (Value::Nan, _) | (_, Value::Nan) => self.invalid(),
            (Value::Infinite(_), Value::Infinite(_)) => self.invalid(),
            (Value::Infinite(x), Value::Finite(y)) => self.infinite(*x * y.sign()),
            (Value::Finite(_), Value::Infinite(_)) => self.zero(),
            (Value::Finite(x), Value::Finite(y)) if y.is_zero() => {
                if x.is_zero() {
                    self.invalid()
                } else {
                    self.infinite(x.sign())
                }
            }
            (Value::Finite(x), Value::Finite(y)) => {
                let precision = self.precision;
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).div(x, y))
                })
            }
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Nan => f.write_str("nan"),
            Value::Infinite(Sign::Positive) => f.write_str("inf"),
            Value::Infinite(Sign::Negative) => f.write_str("-inf"),
            Value::Finite(_) => match self.work(0) {
                Some(w) => write!(f, "{}", w.to_decimal().value()),
                None => f.write_str("nan"),
            },
        }
    }
}
