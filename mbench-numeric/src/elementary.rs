//! Square root, exponential, logarithm and the hyperbolic family.
//!
//! `sqrt`, `exp` and `ln` go straight to the backend context and are
//! correctly rounded. The hyperbolic functions are built from those at a
//! wider working precision and rounded once.

use crate::float::{Float, Status, Value};
use crate::rounding::with_rounding;
use crate::trig::{lift, magnitude, near_one};
use crate::{GUARD_BITS, RoundingMode};
use dashu_base::{Abs, Sign, SquareRoot};
use dashu_float::Context;

/// Beyond `2^EXP_LIMIT_BITS` the exponential over- or underflows any precision
const EXP_LIMIT_BITS: isize = 40;

/// Working precision for results near zero, where `|x| < 1` costs bits
fn widened(precision: usize, mag: isize) -> usize {
    precision + GUARD_BITS + mag.min(0).unsigned_abs()
}

impl Float {
    /// `self = sqrt(x)`
    pub fn set_sqrt(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(Sign::Negative) => self.invalid(),
            Value::Infinite(Sign::Positive) => self.infinite(Sign::Positive),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) if r.sign() == Sign::Negative => self.invalid(),
            Value::Finite(r) => {
                let precision = self.precision();
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).sqrt(r))
                })
            }
        }
    }

    /// `self = e^x`
    pub fn set_exp(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(Sign::Positive) => self.infinite(Sign::Positive),
            Value::Infinite(Sign::Negative) => self.zero(),
            Value::Finite(r) if magnitude(r) > EXP_LIMIT_BITS => {
                if r.sign() == Sign::Positive {
                    self.infinite(Sign::Positive);
                    Status::Above
                } else {
                    self.zero();
                    Status::Below
                }
            }
            Value::Finite(r) => {
                let precision = self.precision();
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).exp(r))
                })
            }
        }
    }

    /// `self = ln(x)`
    pub fn set_ln(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(Sign::Negative) => self.invalid(),
            Value::Infinite(Sign::Positive) => self.infinite(Sign::Positive),
            Value::Finite(r) if r.is_zero() => self.infinite(Sign::Negative),
            Value::Finite(r) if r.sign() == Sign::Negative => self.invalid(),
            Value::Finite(r) => {
                let precision = self.precision();
                with_rounding!(rnd, R => {
                    self.store_rounded(Context::<R>::new(precision).ln(r))
                })
            }
        }
    }

    /// `self = sinh(x)`
    pub fn set_sinh(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(sign) => self.infinite(*sign),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) if magnitude(r) > EXP_LIMIT_BITS => {
                let sign = r.sign();
                self.infinite(sign);
                overflow_status(sign)
            }
            Value::Finite(r) => {
                let wp = widened(self.precision(), magnitude(r));
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let e = xw.exp();
                let inv = lift(1, wp) / &e;
                self.store((e - inv) >> 1, rnd)
            }
        }
    }

    /// `self = cosh(x)`
    pub fn set_cosh(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(_) => self.infinite(Sign::Positive),
            Value::Finite(r) if r.is_zero() => self.store(lift(1, self.precision()), rnd),
            Value::Finite(r) if magnitude(r) > EXP_LIMIT_BITS => {
                self.infinite(Sign::Positive);
                Status::Above
            }
            Value::Finite(_) => {
                let wp = self.precision() + GUARD_BITS;
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let e = xw.exp();
                let inv = lift(1, wp) / &e;
                self.store((e + inv) >> 1, rnd)
            }
        }
    }

    /// `self = tanh(x)`
    pub fn set_tanh(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(sign) => {
                let one = lift(1, self.precision());
                self.store(*sign * one, rnd)
            }
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) => {
                let wp = widened(self.precision(), magnitude(r));
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                // 1 - |tanh x| < 2e^(-2|x|) falls below every guard bit
                let limit = (wp as f64) * std::f64::consts::LN_2 / 2.0 + 1.0;
                if xw.to_f64().value().abs() > limit {
                    return self.store(near_one(r.sign(), wp), rnd);
                }
                let t = (xw << 1).exp();
                let one = lift(1, wp);
                self.store((&t - &one) / (&t + &one), rnd)
            }
        }
    }

    /// `self = asinh(x)`
    pub fn set_asinh(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(sign) => self.infinite(*sign),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) => {
                let sign = r.sign();
                let wp = widened(self.precision(), magnitude(r));
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let ax = xw.abs();
                let root = (&ax * &ax + lift(1, wp)).sqrt();
                self.store(sign * (ax + root).ln(), rnd)
            }
        }
    }

    /// `self = acosh(x)`, defined for `x >= 1`
    pub fn set_acosh(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(Sign::Negative) => self.invalid(),
            Value::Infinite(Sign::Positive) => self.infinite(Sign::Positive),
            Value::Finite(_) => {
                let precision = self.precision();
                let Some(probe) = x.work(precision) else {
                    return self.invalid();
                };
                let one = lift(1, precision);
                if probe < one {
                    return self.invalid();
                }
                if probe == one {
                    return self.zero();
                }
                let below = &probe - &one;
                let wp = widened(precision, magnitude(below.repr()));
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let one = lift(1, wp);
                let root = ((&xw - &one) * (&xw + &one)).sqrt();
                self.store((xw + root).ln(), rnd)
            }
        }
    }

    /// `self = atanh(x)`, defined for `|x| <= 1`
    pub fn set_atanh(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(_) => self.invalid(),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) => {
                let sign = r.sign();
                let wp = widened(self.precision(), magnitude(r));
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let one = lift(1, wp);
                let ax = xw.clone().abs();
                if ax > one {
                    return self.invalid();
                }
                if ax == one {
                    return self.infinite(sign);
                }
                let ratio = (&one + &xw) / (&one - &xw);
                self.store(ratio.ln() >> 1, rnd)
            }
        }
    }
}

fn overflow_status(sign: Sign) -> Status {
    match sign {
        Sign::Positive => Status::Above,
        Sign::Negative => Status::Below,
    }
}
