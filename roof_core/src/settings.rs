//! # Roofing Settings
//!
//! Tunable dimensions of the secondary roofing layers. The structural member
//! sizes are fixed constants in [`crate::geometry`]; these are the values a
//! roofer actually varies between jobs (tile gauge, plank profile, flashing
//! stock).
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "batten_row_spacing": 0.35,
//!   "plank_width": 0.12,
//!   "counter_batten": { "width": 0.05, "height": 0.03 },
//!   "roof_batten": { "width": 0.05, "height": 0.03 },
//!   "flashing": {
//!     "piece_length": 2.0,
//!     "overlap": 0.1,
//!     "drip_edge_width": 0.25,
//!     "eaves_width": 0.33,
//!     "ridge_width": 0.5,
//!     "gable_width": 0.33
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{RoofError, RoofResult};

/// Rectangular batten section (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattenSection {
    pub width: f64,
    pub height: f64,
}

impl Default for BattenSection {
    fn default() -> Self {
        BattenSection {
            width: 0.05,
            height: 0.03,
        }
    }
}

/// Sheet-metal flashing stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashingSettings {
    /// Length of one stock piece
    pub piece_length: f64,

    /// Lap between consecutive pieces
    pub overlap: f64,

    /// Developed (unfolded) width per profile
    pub drip_edge_width: f64,
    pub eaves_width: f64,
    pub ridge_width: f64,
    pub gable_width: f64,
}

impl Default for FlashingSettings {
    fn default() -> Self {
        FlashingSettings {
            piece_length: 2.0,
            overlap: 0.1,
            drip_edge_width: 0.25,
            eaves_width: 0.33,
            ridge_width: 0.5,
            gable_width: 0.33,
        }
    }
}

impl FlashingSettings {
    /// Run covered by one piece once lapped
    pub fn effective_length(&self) -> f64 {
        self.piece_length - self.overlap
    }
}

/// Settings for [`crate::roofing::build_roofing_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofingSettings {
    /// Maximum distance between batten rows along the slope
    pub batten_row_spacing: f64,

    /// Cover width of one lamberia plank
    pub plank_width: f64,

    pub counter_batten: BattenSection,

    pub roof_batten: BattenSection,

    pub flashing: FlashingSettings,
}

impl Default for RoofingSettings {
    fn default() -> Self {
        RoofingSettings {
            batten_row_spacing: 0.35,
            plank_width: 0.12,
            counter_batten: BattenSection::default(),
            roof_batten: BattenSection::default(),
            flashing: FlashingSettings::default(),
        }
    }
}

fn require_positive(field: &str, value: f64) -> RoofResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RoofError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

impl RoofingSettings {
    /// Validate settings before any layer is laid out.
    pub fn validate(&self) -> RoofResult<()> {
        require_positive("batten_row_spacing", self.batten_row_spacing)?;
        require_positive("plank_width", self.plank_width)?;
        require_positive("counter_batten.width", self.counter_batten.width)?;
        require_positive("counter_batten.height", self.counter_batten.height)?;
        require_positive("roof_batten.width", self.roof_batten.width)?;
        require_positive("roof_batten.height", self.roof_batten.height)?;

        let f = &self.flashing;
        require_positive("flashing.piece_length", f.piece_length)?;
        require_positive("flashing.drip_edge_width", f.drip_edge_width)?;
        require_positive("flashing.eaves_width", f.eaves_width)?;
        require_positive("flashing.ridge_width", f.ridge_width)?;
        require_positive("flashing.gable_width", f.gable_width)?;
        if !f.overlap.is_finite() || f.overlap < 0.0 || f.overlap >= f.piece_length {
            return Err(RoofError::invalid_input(
                "flashing.overlap",
                f.overlap.to_string(),
                "Overlap must be non-negative and shorter than the piece length",
            ));
        }
        Ok(())
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> RoofResult<Self> {
        let settings: RoofingSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(RoofingSettings::default().validate().is_ok());
        assert!((FlashingSettings::default().effective_length() - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_overlap_longer_than_piece() {
        let mut settings = RoofingSettings::default();
        settings.flashing.overlap = 2.0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("flashing.overlap"));
    }

    #[test]
    fn test_rejects_zero_spacing() {
        let settings = RoofingSettings {
            batten_row_spacing: 0.0,
            ..RoofingSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = RoofingSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(RoofingSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = RoofingSettings::from_json("{\"batten_row_spacing\": 1}").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
