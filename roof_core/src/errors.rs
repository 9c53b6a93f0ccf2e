//! # Error Types
//!
//! Structured error types for roof_core. A failed build never hands back a
//! partial model: either a complete, consistent model is returned or one of
//! these errors is.
//!
//! ## Example
//!
//! ```rust
//! use roof_core::errors::{RoofError, RoofResult};
//!
//! fn validate_width(width: f64) -> RoofResult<()> {
//!     if width <= 0.0 {
//!         return Err(RoofError::InvalidInput {
//!             field: "width".to_string(),
//!             value: width.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for roof_core operations
pub type RoofResult<T> = Result<T, RoofError>;

/// Structured error type for roof model operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum RoofError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A derived quantity came out non-finite or collapsed to zero
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// No unit price supplied for a material the estimate needs
    #[error("Price not found for material: {material_id}")]
    PriceNotFound { material_id: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl RoofError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        RoofError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate(reason: impl Into<String>) -> Self {
        RoofError::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create a PriceNotFound error
    pub fn price_not_found(material_id: impl Into<String>) -> Self {
        RoofError::PriceNotFound {
            material_id: material_id.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RoofError::InvalidInput { .. } => "INVALID_INPUT",
            RoofError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            RoofError::PriceNotFound { .. } => "PRICE_NOT_FOUND",
            RoofError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for RoofError {
    fn from(err: serde_json::Error) -> Self {
        RoofError::Serialization {
            reason: err.to_string(),
        }
    }
}
