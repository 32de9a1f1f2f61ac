//! Operation Adapters
//!
//! Every benchmarked primitive is reached through the same call shape,
//! `operate(dst, src1, src2, rounding)`, so a single measurement loop can
//! drive all of them. Unary adapters ignore `src2`.

use mbench_numeric::{Float, RoundingMode, Status};
use std::fmt;
use std::str::FromStr;

/// The numeric primitives that can be benchmarked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Primitive {
    Add,
    Sub,
    Mul,
    Div,
    Set,
    Sqrt,
    Exp,
    Log,
    Erf,
    Cos,
    Sin,
    Tan,
    Acos,
    Asin,
    Atan,
    Cosh,
    Sinh,
    Tanh,
    Acosh,
    Asinh,
    Atanh,
}

impl Primitive {
    /// All primitives, in standard registration order
    pub const ALL: [Primitive; 21] = [
        Primitive::Add,
        Primitive::Sub,
        Primitive::Mul,
        Primitive::Div,
        Primitive::Set,
        Primitive::Sqrt,
        Primitive::Exp,
        Primitive::Log,
        Primitive::Erf,
        Primitive::Cos,
        Primitive::Sin,
        Primitive::Tan,
        Primitive::Acos,
        Primitive::Asin,
        Primitive::Atan,
        Primitive::Cosh,
        Primitive::Sinh,
        Primitive::Tanh,
        Primitive::Acosh,
        Primitive::Asinh,
        Primitive::Atanh,
    ];

    /// Short lowercase name, as used in benchmark names
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Add => "add",
            Primitive::Sub => "sub",
            Primitive::Mul => "mul",
            Primitive::Div => "div",
            Primitive::Set => "set",
            Primitive::Sqrt => "sqrt",
            Primitive::Exp => "exp",
            Primitive::Log => "log",
            Primitive::Erf => "erf",
            Primitive::Cos => "cos",
            Primitive::Sin => "sin",
            Primitive::Tan => "tan",
            Primitive::Acos => "acos",
            Primitive::Asin => "asin",
            Primitive::Atan => "atan",
            Primitive::Cosh => "cosh",
            Primitive::Sinh => "sinh",
            Primitive::Tanh => "tanh",
            Primitive::Acosh => "acosh",
            Primitive::Asinh => "asinh",
            Primitive::Atanh => "atanh",
        }
    }

    /// Number of sources read (1 or 2)
    pub fn arity(self) -> usize {
        match self {
            Primitive::Add | Primitive::Sub | Primitive::Mul | Primitive::Div => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Primitive::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| format!("Unknown primitive: {}", s))
    }
}

/// Uniform invocation shape for a benchmarked primitive
pub trait Operation {
    /// The primitive this adapter binds
    fn primitive(&self) -> Primitive;

    /// Compute into `dst` from `src1` (and `src2` for binary primitives)
    fn operate(&self, dst: &mut Float, src1: &Float, src2: &Float, rnd: RoundingMode) -> Status;
}

impl<O: Operation + ?Sized> Operation for Box<O> {
    fn primitive(&self) -> Primitive {
        (**self).primitive()
    }

    #[inline(always)]
    fn operate(&self, dst: &mut Float, src1: &Float, src2: &Float, rnd: RoundingMode) -> Status {
        (**self).operate(dst, src1, src2, rnd)
    }
}

macro_rules! binary_adapter {
    ($($adapter:ident => $primitive:ident, $method:ident;)*) => {$(
        #[doc = concat!("Adapter for `Float::", stringify!($method), "`")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $adapter;

        impl Operation for $adapter {
            fn primitive(&self) -> Primitive {
                Primitive::$primitive
            }

            #[inline(always)]
            fn operate(&self, dst: &mut Float, src1: &Float, src2: &Float, rnd: RoundingMode) -> Status {
                dst.$method(src1, src2, rnd)
            }
        }
    )*};
}

macro_rules! unary_adapter {
    ($($adapter:ident => $primitive:ident, $method:ident;)*) => {$(
        #[doc = concat!("Adapter for `Float::", stringify!($method), "` (ignores `src2`)")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $adapter;

        impl Operation for $adapter {
            fn primitive(&self) -> Primitive {
                Primitive::$primitive
            }

            #[inline(always)]
            fn operate(&self, dst: &mut Float, src1: &Float, _src2: &Float, rnd: RoundingMode) -> Status {
                dst.$method(src1, rnd)
            }
        }
    )*};
}

binary_adapter! {
    AddOp => Add, set_add;
    SubOp => Sub, set_sub;
    MulOp => Mul, set_mul;
    DivOp => Div, set_div;
}

unary_adapter! {
    SetOp => Set, set;
    SqrtOp => Sqrt, set_sqrt;
    ExpOp => Exp, set_exp;
    LogOp => Log, set_ln;
    ErfOp => Erf, set_erf;
    CosOp => Cos, set_cos;
    SinOp => Sin, set_sin;
    TanOp => Tan, set_tan;
    AcosOp => Acos, set_acos;
    AsinOp => Asin, set_asin;
    AtanOp => Atan, set_atan;
    CoshOp => Cosh, set_cosh;
    SinhOp => Sinh, set_sinh;
    TanhOp => Tanh, set_tanh;
    AcoshOp => Acosh, set_acosh;
    AsinhOp => Asinh, set_asinh;
    AtanhOp => Atanh, set_atanh;
}

/// Adapter for a primitive chosen at runtime
pub fn adapter_for(primitive: Primitive) -> Box<dyn Operation> {
    match primitive {
        Primitive::Add => Box::new(AddOp),
        Primitive::Sub => Box::new(SubOp),
        Primitive::Mul => Box::new(MulOp),
        Primitive::Div => Box::new(DivOp),
        Primitive::Set => Box::new(SetOp),
        Primitive::Sqrt => Box::new(SqrtOp),
        Primitive::Exp => Box::new(ExpOp),
        Primitive::Log => Box::new(LogOp),
        Primitive::Erf => Box::new(ErfOp),
        Primitive::Cos => Box::new(CosOp),
        Primitive::Sin => Box::new(SinOp),
        Primitive::Tan => Box::new(TanOp),
        Primitive::Acos => Box::new(AcosOp),
        Primitive::Asin => Box::new(AsinOp),
        Primitive::Atan => Box::new(AtanOp),
        Primitive::Cosh => Box::new(CoshOp),
        Primitive::Sinh => Box::new(SinhOp),
        Primitive::Tanh => Box::new(TanhOp),
        Primitive::Acosh => Box::new(AcoshOp),
        Primitive::Asinh => Box::new(AsinhOp),
        Primitive::Atanh => Box::new(AtanhOp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(s: &str) -> Float {
        Float::with_str(53, s).unwrap()
    }

    #[test]
    fn test_names_parse_back() {
        for primitive in Primitive::ALL {
            assert_eq!(primitive.name().parse::<Primitive>().unwrap(), primitive);
        }
        assert!("frobnicate".parse::<Primitive>().is_err());
    }

    #[test]
    fn test_adapter_for_binds_requested_primitive() {
        for primitive in Primitive::ALL {
            assert_eq!(adapter_for(primitive).primitive(), primitive);
        }
    }

    #[test]
    fn test_binary_adapter_uses_both_sources() {
        let mut dst = Float::new(53).unwrap();
        SubOp.operate(&mut dst, &float("5"), &float("3"), RoundingMode::Nearest);
        assert_eq!(dst.to_f64(), 2.0);
    }

    #[test]
    fn test_unary_adapter_ignores_second_source() {
        let mut with_one = Float::new(53).unwrap();
        let mut with_other = Float::new(53).unwrap();
        SqrtOp.operate(&mut with_one, &float("9"), &float("1"), RoundingMode::Nearest);
        SqrtOp.operate(&mut with_other, &float("9"), &float("-7"), RoundingMode::Nearest);
        assert_eq!(with_one.to_f64(), 3.0);
        assert!(with_one.identical(&with_other));
    }

    #[test]
    fn test_failing_status_is_returned_not_raised() {
        let mut dst = Float::new(53).unwrap();
        let status = LogOp.operate(&mut dst, &float("-1"), &float("0"), RoundingMode::Nearest);
        assert_eq!(status, Status::Invalid);
    }

    #[test]
    fn test_boxed_adapter_forwards() {
        let boxed = adapter_for(Primitive::Mul);
        let mut dst = Float::new(53).unwrap();
        boxed.operate(&mut dst, &float("2.5"), &float("4"), RoundingMode::Nearest);
        assert_eq!(dst.to_f64(), 10.0);
        assert_eq!(Primitive::Mul.arity(), 2);
        assert_eq!(Primitive::Erf.arity(), 1);
    }
}
