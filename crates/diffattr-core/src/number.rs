use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A floating-point value held by [`crate::Value::Float`].
///
/// Equality follows IEEE-754, so `NaN` never equals itself and `0.0`
/// equals `-0.0`.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    /// Wraps a raw `f64`.
    ///
    /// ```
    /// # use diffattr_core::Number;
    /// let num = Number::new(1.5);
    /// assert_eq!(num.get(), 1.5);
    /// ```
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Total order used to lay out sets deterministically.
    ///
    /// Agrees with `==`, so `0.0` and `-0.0` order as equal.
    pub(crate) fn total_cmp(self, other: Self) -> Ordering {
        if self.0 == other.0 {
            Ordering::Equal
        } else {
            self.0.total_cmp(&other.0)
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self(f64::from(value))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep a fractional part so floats never print like integers.
        if self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < 1e16 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
