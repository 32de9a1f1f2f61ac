//! Trigonometric functions and erf.
//!
//! Each function reduces its argument, sums a Taylor series at working
//! precision `p + GUARD_BITS` (plus whatever the reduction costs) and stores
//! the sum with a single rounding.

use crate::float::{Float, Status, Value, Work};
use crate::{GUARD_BITS, RoundingMode};
use dashu_base::{Abs, Sign, SquareRoot};
use dashu_float::Repr;
use dashu_int::IBig;
use std::cell::RefCell;
use std::collections::HashMap;

/// Arguments below `2^-ATAN_REDUCED_BITS` go straight into the atan series
const ATAN_REDUCED_BITS: isize = 8;

/// Binary magnitude: `|x|` lies in `[2^(m-1), 2^m)`
pub(crate) fn magnitude(repr: &Repr<2>) -> isize {
    if repr.is_zero() {
        isize::MIN / 2
    } else {
        repr.digits() as isize + repr.exponent()
    }
}

/// Integer constant carried at `wp` bits
pub(crate) fn lift(n: u64, wp: usize) -> Work {
    Work::from(n).with_precision(wp).value()
}

/// `±(1 - 2^-(wp+1))`: rounds like any value strictly between `1 - 2^-wp` and 1
pub(crate) fn near_one(sign: Sign, wp: usize) -> Work {
    let one = lift(1, wp + 2);
    let eps = one.clone() >> (wp as isize + 1);
    sign * (one - eps)
}

fn converged(term: &Work, sum: &Work, wp: usize) -> bool {
    term.repr().is_zero() || magnitude(term.repr()) < magnitude(sum.repr()) - wp as isize
}

/// `atan(1/n)` by its alternating series
fn atan_inverse(n: u64, wp: usize) -> Work {
    let n2 = lift(n * n, wp);
    let mut power = lift(1, wp) / lift(n, wp);
    let mut sum = power.clone();
    let mut k = 1u64;
    loop {
        power = &power / &n2;
        let term = &power / lift(2 * k + 1, wp);
        if converged(&term, &sum, wp) {
            return sum;
        }
        if k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        k += 1;
    }
}

thread_local! {
    /// π per working precision, computed once per thread
    static PI_CACHE: RefCell<HashMap<usize, Work>> = RefCell::new(HashMap::new());
}

/// π by Machin's formula
fn machin_pi(wp: usize) -> Work {
    let w = wp + 16;
    let pi = lift(16, w) * atan_inverse(5, w) - lift(4, w) * atan_inverse(239, w);
    pi.with_precision(wp).value()
}

/// π at `wp` bits, from the per-thread cache
pub(crate) fn pi(wp: usize) -> Work {
    PI_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .entry(wp)
            .or_insert_with(|| machin_pi(wp))
            .clone()
    })
}

/// `(sin x, cos x)` for a finite `x`, each accurate to about `wp` bits
fn sin_cos(x: &Float, wp: usize) -> Option<(Work, Work)> {
    let mut extra = 0usize;
    let (r, quadrant) = loop {
        let xw = x.work(wp)?;
        let w = wp + magnitude(xw.repr()).max(0).unsigned_abs() + extra;
        let xw = x.work(w)?;
        let half_pi = pi(w) >> 1;
        let k: IBig = (&xw / &half_pi).round().to_int().value();
        let r = &xw - Work::from(k.clone()).with_precision(w).value() * &half_pi;

        // cancellation near a multiple of π/2 leaves fewer significant bits
        let lost = magnitude(r.repr()).min(0).unsigned_abs();
        if lost <= extra || r.repr().is_zero() {
            let quadrant = i64::try_from(k % IBig::from(4u8)).unwrap_or(0).rem_euclid(4);
            break (r.with_precision(wp + extra).value(), quadrant);
        }
        extra = lost + GUARD_BITS;
    };

    let wp = wp + extra;
    let r2 = &r * &r;
    let mut sin = r.clone();
    let mut cos = lift(1, wp);
    let mut sin_term = r;
    let mut cos_term = lift(1, wp);
    let mut n = 1u64;
    loop {
        cos_term = -(&cos_term * &r2) / lift((2 * n - 1) * (2 * n), wp);
        sin_term = -(&sin_term * &r2) / lift((2 * n) * (2 * n + 1), wp);
        let done = converged(&cos_term, &cos, wp) && converged(&sin_term, &sin, wp);
        cos += &cos_term;
        sin += &sin_term;
        if done {
            break;
        }
        n += 1;
    }

    Some(match quadrant {
        0 => (sin, cos),
        1 => (cos, -sin),
        2 => (-sin, -cos),
        _ => (-cos, sin),
    })
}

/// `atan x` for a finite `x`
fn atan(x: Work, wp: usize) -> Work {
    let one = lift(1, wp);
    if x.clone().abs() > one {
        let sign = x.sign();
        let half_pi = pi(wp) >> 1;
        return sign * half_pi - atan(&one / &x, wp);
    }

    // atan x = 2 atan(x / (1 + sqrt(1 + x²)))
    let mut x = x;
    let mut halvings = 0isize;
    while !x.repr().is_zero() && magnitude(x.repr()) > -ATAN_REDUCED_BITS {
        let root = (&x * &x + &one).sqrt();
        x = &x / (root + &one);
        halvings += 1;
    }

    let x2 = &x * &x;
    let mut power = x.clone();
    let mut sum = x;
    let mut k = 1u64;
    loop {
        power = -(&power * &x2);
        let term = &power / lift(2 * k + 1, wp);
        if converged(&term, &sum, wp) {
            break;
        }
        sum += term;
        k += 1;
    }
    sum << halvings
}

impl Float {
    /// `self = sin(x)`
    pub fn set_sin(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(_) => self.invalid(),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(_) => match sin_cos(x, self.precision() + GUARD_BITS) {
                Some((sin, _)) => self.store(sin, rnd),
                None => self.invalid(),
            },
        }
    }

    /// `self = cos(x)`
    pub fn set_cos(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(_) => self.invalid(),
            Value::Finite(r) if r.is_zero() => self.store(lift(1, self.precision()), rnd),
            Value::Finite(_) => match sin_cos(x, self.precision() + GUARD_BITS) {
                Some((_, cos)) => self.store(cos, rnd),
                None => self.invalid(),
            },
        }
    }

    /// `self = tan(x)`
    pub fn set_tan(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        match x.value() {
            Value::Nan | Value::Infinite(_) => self.invalid(),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(_) => match sin_cos(x, self.precision() + GUARD_BITS) {
                Some((sin, cos)) => self.store(sin / cos, rnd),
                None => self.invalid(),
            },
        }
    }

    /// `self = atan(x)`
    pub fn set_atan(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        let wp = self.precision() + GUARD_BITS;
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(sign) => self.store(*sign * (pi(wp) >> 1), rnd),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(_) => match x.work(wp) {
                Some(xw) => self.store(atan(xw, wp), rnd),
                None => self.invalid(),
            },
        }
    }

    /// `self = asin(x)`, defined for `|x| <= 1`
    pub fn set_asin(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        let wp = self.precision() + GUARD_BITS;
        match x.value() {
            Value::Nan | Value::Infinite(_) => self.invalid(),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) => {
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let one = lift(1, wp);
                let ax = xw.clone().abs();
                if ax > one {
                    return self.invalid();
                }
                if ax == one {
                    return self.store(r.sign() * (pi(wp) >> 1), rnd);
                }
                let root = ((&one - &xw) * (&one + &xw)).sqrt();
                self.store(atan(xw / root, wp), rnd)
            }
        }
    }

    /// `self = acos(x)`, defined for `|x| <= 1`
    pub fn set_acos(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        let wp = self.precision() + GUARD_BITS;
        match x.value() {
            Value::Nan | Value::Infinite(_) => self.invalid(),
            Value::Finite(r) if r.is_zero() => self.store(pi(wp) >> 1, rnd),
            Value::Finite(_) => {
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let one = lift(1, wp);
                if xw.clone().abs() > one {
                    return self.invalid();
                }
                if xw == one {
                    return self.zero();
                }
                if xw == -one.clone() {
                    return self.store(pi(wp), rnd);
                }
                // acos x = 2 atan(sqrt((1 - x) / (1 + x)))
                let ratio = ((&one - &xw) / (&one + &xw)).sqrt();
                self.store(atan(ratio, wp) << 1, rnd)
            }
        }
    }

    /// `self = erf(x)`
    pub fn set_erf(&mut self, x: &Float, rnd: RoundingMode) -> Status {
        let precision = self.precision();
        match x.value() {
            Value::Nan => self.invalid(),
            Value::Infinite(sign) => self.store(*sign * lift(1, precision), rnd),
            Value::Finite(r) if r.is_zero() => self.zero(),
            Value::Finite(r) => {
                let sign = r.sign();
                let x2_estimate = x.to_f64().powi(2);
                // erfc x < e^(-x²) drops below the guard bits
                let saturation = (precision + GUARD_BITS + 8) as f64 * std::f64::consts::LN_2;
                if x2_estimate > saturation {
                    return self.store(near_one(sign, precision + GUARD_BITS), rnd);
                }

                // the series terms peak near e^(x²) before cancelling
                let growth = (x2_estimate * std::f64::consts::LOG2_E).ceil() as usize;
                let wp = precision + GUARD_BITS + growth;
                let Some(xw) = x.work(wp) else {
                    return self.invalid();
                };
                let x2 = &xw * &xw;
                let mut power = xw.clone();
                let mut sum = xw;
                let mut n = 1u64;
                loop {
                    power = -(&power * &x2) / lift(n, wp);
                    let term = &power / lift(2 * n + 1, wp);
                    let decreasing = n as f64 > x2_estimate;
                    if decreasing && converged(&term, &sum, wp) {
                        break;
                    }
                    sum += term;
                    n += 1;
                }
                let scale = lift(2, wp) / pi(wp).sqrt();
                self.store(scale * sum, rnd)
            }
        }
    }
}
