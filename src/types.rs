//! Strongly-typed numeric primitives for plotpath (zero-cost newtypes).
//!
//! Design goals:
//! - No raw `f64` for coordinates in domain logic
//! - Source-space and device-space points cannot be mixed
//! - Conversions between the two spaces only via `device::Mapper`

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Coordinate in SVG user units (top-left origin, y grows downward)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct SourceUnit(pub f64);

impl SourceUnit {
    pub const ZERO: SourceUnit = SourceUnit(0.0);

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for SourceUnit {
    type Output = SourceUnit;
    fn add(self, rhs: SourceUnit) -> SourceUnit {
        SourceUnit(self.0 + rhs.0)
    }
}
impl Sub for SourceUnit {
    type Output = SourceUnit;
    fn sub(self, rhs: SourceUnit) -> SourceUnit {
        SourceUnit(self.0 - rhs.0)
    }
}
impl Mul<f64> for SourceUnit {
    type Output = SourceUnit;
    fn mul(self, rhs: f64) -> SourceUnit {
        SourceUnit(self.0 * rhs)
    }
}
impl Div<f64> for SourceUnit {
    type Output = SourceUnit;
    fn div(self, rhs: f64) -> SourceUnit {
        SourceUnit(self.0 / rhs)
    }
}
impl Neg for SourceUnit {
    type Output = SourceUnit;
    fn neg(self) -> SourceUnit {
        SourceUnit(-self.0)
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coordinate in device millimetres (bottom-left origin, y grows upward)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Mm(pub f64);

impl Mm {
    pub const ZERO: Mm = Mm(0.0);

    /// Create an Mm value with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Mm, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Mm(val))
        }
    }

    /// Create a strictly-positive Mm value (bed dimensions)
    #[inline]
    pub fn try_positive(val: f64) -> Result<Mm, NumericError> {
        let v = Mm::try_new(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(v)
        }
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn min(self, other: Mm) -> Mm {
        Mm(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Mm) -> Mm {
        Mm(self.0.max(other.0))
    }

    /// Clamp into `[lo, hi]`
    #[inline]
    pub fn clamp(self, lo: Mm, hi: Mm) -> Mm {
        Mm(self.0.clamp(lo.0, hi.0))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Mm {
    type Output = Mm;
    fn add(self, rhs: Mm) -> Mm {
        Mm(self.0 + rhs.0)
    }
}
impl Sub for Mm {
    type Output = Mm;
    fn sub(self, rhs: Mm) -> Mm {
        Mm(self.0 - rhs.0)
    }
}
impl Mul<f64> for Mm {
    type Output = Mm;
    fn mul(self, rhs: f64) -> Mm {
        Mm(self.0 * rhs)
    }
}
impl Neg for Mm {
    type Output = Mm;
    fn neg(self) -> Mm {
        Mm(-self.0)
    }
}
impl AddAssign for Mm {
    fn add_assign(&mut self, rhs: Mm) {
        self.0 += rhs.0;
    }
}
impl SubAssign for Mm {
    fn sub_assign(&mut self, rhs: Mm) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Mm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flatness tolerance in source units. Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Default flatness tolerance: 0.2 source units.
    pub const DEFAULT: Tolerance = Tolerance(0.2);

    /// Create a validated tolerance (rejects NaN, infinite, zero, negative)
    pub fn try_new(val: f64) -> Result<Tolerance, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Tolerance(val))
        }
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point, tagged by coordinate unit
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl Point<SourceUnit> {
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Point<Mm> {
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl BBox<Mm> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Mm(f64::MAX), y: Mm(f64::MAX) },
            max: Point { x: Mm(f64::MIN), y: Mm(f64::MIN) },
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point<Mm>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Get the width as a typed Mm
    pub fn width(&self) -> Mm {
        self.max.x - self.min.x
    }

    /// Get the height as a typed Mm
    pub fn height(&self) -> Mm {
        self.max.y - self.min.y
    }

    /// Get the center point
    pub fn center(&self) -> Point<Mm> {
        Point {
            x: Mm((self.min.x.0 + self.max.x.0) / 2.0),
            y: Mm((self.min.y.0 + self.max.y.0) / 2.0),
        }
    }
}

impl Default for BBox<Mm> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient aliases
pub type PtSrc = Point<SourceUnit>;
pub type PtDev = Point<Mm>;
pub type BoxDev = BBox<Mm>;
