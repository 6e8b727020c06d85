//! Strongly-typed numeric primitives for tape geometry.
//!
//! Physical measurements are carried as [`Length`] (inches). Raw `f64`
//! only appears at the projection boundary, where lengths become glam
//! vectors.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
    /// Text did not parse as a number
    Unparsable,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
            NumericError::Unparsable => write!(f, "value is not a number"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in inches (the tape standard's canonical unit)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length from inches (const-friendly, unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn inches(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let len = Self::try_new(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let len = Self::try_non_negative(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else {
            Ok(len)
        }
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Half of this length (diameter to radius)
    #[inline]
    pub fn half(self) -> Length {
        Length(self.0 / 2.0)
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
// No division: the only ratios (in `Projection::locate`) work on raw f64.

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}in", self.0)
    }
}

/// Parses a bare number of inches, as given on the command line.
impl FromStr for Length {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val: f64 = s.trim().parse().map_err(|_| NumericError::Unparsable)?;
        Length::try_non_negative(val)
    }
}
