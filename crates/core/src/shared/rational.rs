use std::fmt;

use serde::{Deserialize, Serialize};

/// An exact fraction, used for frame rates and time bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    pub const ZERO: Rational = Rational { num: 0, den: 1 };

    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Floating-point value of the fraction.
    ///
    /// A zero denominator yields 0.0 instead of NaN or infinity, so an
    /// unknown native rate (commonly `0/0`) behaves as "no rate".
    pub fn to_f64(self) -> f64 {
        if self.den == 0 {
            return 0.0;
        }
        self.num as f64 / self.den as f64
    }

    /// Swaps numerator and denominator: a frame rate of `n/d` frames per
    /// second becomes a time base of `d/n` seconds per tick.
    pub const fn invert(self) -> Self {
        Self {
            num: self.den,
            den: self.num,
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
