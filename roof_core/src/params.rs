//! # Input Parameters
//!
//! The five user-adjustable dimensions a roof is derived from. A model is
//! always built fresh from one `InputParams` value; nothing is patched in place.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "width": 3.0,
//!   "length": 4.0,
//!   "pitch": 25.0,
//!   "eaves_overhang": 0.5,
//!   "gable_overhang": 0.3
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{RoofError, RoofResult};
use crate::geometry::{BASE_PURLIN_SIZE, PILLAR_SIZE};
use crate::units::{Degrees, Radians};

/// Roof dimensions in meters, pitch in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputParams {
    /// Outer pillar-to-pillar extent across the span (Z)
    pub width: f64,

    /// Outer pillar-to-pillar extent along the ridge (X)
    pub length: f64,

    /// Roof pitch in degrees, exclusive range (0, 90)
    pub pitch: f64,

    /// Horizontal rafter projection past the base purlins
    pub eaves_overhang: f64,

    /// Purlin projection past the end pillars at each gable
    pub gable_overhang: f64,
}

impl Default for InputParams {
    fn default() -> Self {
        InputParams {
            width: 3.0,
            length: 4.0,
            pitch: 25.0,
            eaves_overhang: 0.5,
            gable_overhang: 0.3,
        }
    }
}

impl InputParams {
    /// Validate input parameters.
    ///
    /// Runs before any geometry is derived.
    pub fn validate(&self) -> RoofResult<()> {
        let fields = [
            ("width", self.width),
            ("length", self.length),
            ("pitch", self.pitch),
            ("eaves_overhang", self.eaves_overhang),
            ("gable_overhang", self.gable_overhang),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(RoofError::invalid_input(field, value.to_string(), "Value must be finite"));
            }
        }

        if self.width <= 0.0 {
            return Err(RoofError::invalid_input(
                "width",
                self.width.to_string(),
                "Width must be positive",
            ));
        }
        if self.width <= 2.0 * BASE_PURLIN_SIZE {
            return Err(RoofError::invalid_input(
                "width",
                self.width.to_string(),
                format!("Width must exceed both base purlins ({:.2} m)", 2.0 * BASE_PURLIN_SIZE),
            ));
        }
        if self.length <= 0.0 {
            return Err(RoofError::invalid_input(
                "length",
                self.length.to_string(),
                "Length must be positive",
            ));
        }
        if self.length <= 2.0 * PILLAR_SIZE {
            return Err(RoofError::invalid_input(
                "length",
                self.length.to_string(),
                format!("Length must exceed two pillars ({:.2} m)", 2.0 * PILLAR_SIZE),
            ));
        }
        if self.pitch <= 0.0 || self.pitch >= 90.0 {
            return Err(RoofError::invalid_input(
                "pitch",
                self.pitch.to_string(),
                "Pitch must be between 0 and 90 degrees (exclusive)",
            ));
        }
        if self.eaves_overhang < 0.0 {
            return Err(RoofError::invalid_input(
                "eaves_overhang",
                self.eaves_overhang.to_string(),
                "Eaves overhang cannot be negative",
            ));
        }
        if self.gable_overhang < 0.0 {
            return Err(RoofError::invalid_input(
                "gable_overhang",
                self.gable_overhang.to_string(),
                "Gable overhang cannot be negative",
            ));
        }
        Ok(())
    }

    /// Pitch as a typed angle
    pub fn pitch_degrees(&self) -> Degrees {
        Degrees(self.pitch)
    }

    /// Pitch converted for trigonometry
    pub fn pitch_radians(&self) -> Radians {
        self.pitch_degrees().into()
    }

    /// Longitudinal run of the purlins, gable overhang included on both ends
    pub fn purlin_run(&self) -> f64 {
        self.length + 2.0 * self.gable_overhang
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(InputParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_pitch() {
        let params = InputParams {
            pitch: 0.0,
            ..InputParams::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("pitch"));
    }

    #[test]
    fn test_rejects_vertical_pitch() {
        let params = InputParams {
            pitch: 90.0,
            ..InputParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        for (width, length) in [(0.0, 4.0), (-1.0, 4.0), (3.0, 0.0), (3.0, -2.0)] {
            let params = InputParams {
                width,
                length,
                ..InputParams::default()
            };
            assert!(params.validate().is_err(), "width={} length={}", width, length);
        }
    }

    #[test]
    fn test_rejects_width_without_room_for_ridge() {
        let params = InputParams {
            width: 0.3,
            ..InputParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_overhangs() {
        let eaves = InputParams {
            eaves_overhang: -0.1,
            ..InputParams::default()
        };
        let gable = InputParams {
            gable_overhang: -0.1,
            ..InputParams::default()
        };
        assert!(eaves.validate().is_err());
        assert!(gable.validate().is_err());
    }

    #[test]
    fn test_zero_overhangs_allowed() {
        let params = InputParams {
            eaves_overhang: 0.0,
            gable_overhang: 0.0,
            ..InputParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_nan() {
        let params = InputParams {
            length: f64::NAN,
            ..InputParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn test_purlin_run() {
        let params = InputParams::default();
        assert!((params.purlin_run() - 4.6).abs() < 1e-12);
    }
}
