//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the roof model uses. These are
//! plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## SI Units
//!
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Volume: cubic meters (m³)
//! - Angle: degrees at the API boundary, radians inside the trigonometry
//!
//! ## Example
//!
//! ```rust
//! use roof_core::units::{Degrees, Radians};
//!
//! let pitch = Degrees(45.0);
//! let rad: Radians = pitch.into();
//! assert!((rad.0 - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length, Area, Volume
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Radians {
    /// Sine of the angle
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// Tangent of the angle
    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert_relative_eq!(rad.0, std::f64::consts::PI);

        let back: Degrees = rad.into();
        assert_relative_eq!(back.0, 180.0);
    }

    #[test]
    fn test_dimensional_products() {
        let area = Meters(0.15) * Meters(0.15);
        assert_relative_eq!(area.0, 0.0225);

        let volume = area * Meters(2.4);
        assert_relative_eq!(volume.0, 0.054);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(10.0);
        let b = Meters(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
        assert_eq!(Meters::new(2.5).value(), 2.5);
    }

    #[test]
    fn test_serialization() {
        let pitch = Degrees(25.0);
        let json = serde_json::to_string(&pitch).unwrap();
        assert_eq!(json, "25.0");

        let roundtrip: Degrees = serde_json::from_str(&json).unwrap();
        assert_eq!(pitch, roundtrip);
    }
}
