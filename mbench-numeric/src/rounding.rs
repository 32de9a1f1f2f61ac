//! Rounding Modes
//!
//! The backend encodes the rounding mode in the type of its context, so the
//! runtime `RoundingMode` is turned into a concrete mode with `with_rounding!`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rounding applied when a result does not fit the destination precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round to nearest, ties to even
    #[default]
    Nearest,
    /// Round toward zero (truncate)
    TowardZero,
    /// Round toward positive infinity
    Up,
    /// Round toward negative infinity
    Down,
    /// Round away from zero
    AwayFromZero,
}

impl RoundingMode {
    /// All modes, in MPFR order
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::Nearest,
        RoundingMode::TowardZero,
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::AwayFromZero,
    ];

    /// Short single-letter name (`n`, `z`, `u`, `d`, `a`)
    pub fn short_name(self) -> &'static str {
        match self {
            RoundingMode::Nearest => "n",
            RoundingMode::TowardZero => "z",
            RoundingMode::Up => "u",
            RoundingMode::Down => "d",
            RoundingMode::AwayFromZero => "a",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Nearest => "nearest",
            RoundingMode::TowardZero => "toward-zero",
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::AwayFromZero => "away-from-zero",
        };
        f.write_str(name)
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "nearest" | "rndn" => Ok(RoundingMode::Nearest),
            "z" | "zero" | "toward-zero" | "rndz" => Ok(RoundingMode::TowardZero),
            "u" | "up" | "rndu" => Ok(RoundingMode::Up),
            "d" | "down" | "rndd" => Ok(RoundingMode::Down),
            "a" | "away" | "away-from-zero" | "rnda" => Ok(RoundingMode::AwayFromZero),
            other => Err(format!("Unknown rounding mode: {}", other)),
        }
    }
}

/// Evaluate `$body` with `$r` bound to the backend mode matching `$mode`.
macro_rules! with_rounding {
    ($mode:expr, $r:ident => $body:expr) => {
        match $mode {
            $crate::RoundingMode::Nearest => {
                type $r = dashu_float::round::mode::HalfEven;
                $body
            }
            $crate::RoundingMode::TowardZero => {
                type $r = dashu_float::round::mode::Zero;
                $body
            }
            $crate::RoundingMode::Up => {
                type $r = dashu_float::round::mode::Up;
                $body
            }
            $crate::RoundingMode::Down => {
                type $r = dashu_float::round::mode::Down;
                $body
            }
            $crate::RoundingMode::AwayFromZero => {
                type $r = dashu_float::round::mode::Away;
                $body
            }
        }
    };
}

pub(crate) use with_rounding;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_names() {
        assert_eq!("n".parse::<RoundingMode>().unwrap(), RoundingMode::Nearest);
        assert_eq!("Z".parse::<RoundingMode>().unwrap(), RoundingMode::TowardZero);
        assert_eq!("up".parse::<RoundingMode>().unwrap(), RoundingMode::Up);
        assert_eq!("RNDD".parse::<RoundingMode>().unwrap(), RoundingMode::Down);
        assert_eq!(
            "away-from-zero".parse::<RoundingMode>().unwrap(),
            RoundingMode::AwayFromZero
        );
        assert!("sideways".parse::<RoundingMode>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for mode in RoundingMode::ALL {
            assert_eq!(mode.to_string().parse::<RoundingMode>().unwrap(), mode);
            assert_eq!(mode.short_name().parse::<RoundingMode>().unwrap(), mode);
        }
    }
}
