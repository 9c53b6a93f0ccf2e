//! # roof_core - Garden Roof Geometry Engine
//!
//! `roof_core` derives the complete timber frame of a Hungarian gable garden
//! roof from five parameters (width, length, pitch, eaves overhang, gable
//! overhang): pillars, purlins, tie beams, rafters with birdmouth joinery,
//! ridge ties and corner knee braces, plus the secondary roofing layers.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return a fresh model
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Invalid input fails before any geometry is derived
//!
//! ## Quick Start
//!
//! ```rust
//! use roof_core::{build_structure, compute_metrics, InputParams};
//!
//! let params = InputParams {
//!     width: 3.0,
//!     length: 4.0,
//!     pitch: 25.0,
//!     eaves_overhang: 0.5,
//!     gable_overhang: 0.3,
//! };
//!
//! let model = build_structure(&params).unwrap();
//! let metrics = compute_metrics(&model);
//!
//! let json = serde_json::to_string_pretty(&model).unwrap();
//! assert!(metrics.roof_surface > 0.0 && !json.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Input parameters and validation
//! - [`geometry`] - Trigonometric primitives, member sizes, layout counts
//! - [`structure`] - The structural model and its assembler
//! - [`metrics`] - Timber volume/surface and roof surface totals
//! - [`roofing`] - Counter battens, roof battens, flashings, lamberia
//! - [`settings`] - Tunable roofing dimensions
//! - [`pricing`] - Cost estimate over a resolved price table
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod errors;
pub mod geometry;
pub mod metrics;
pub mod params;
pub mod pricing;
pub mod roofing;
pub mod settings;
pub mod structure;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{RoofError, RoofResult};
pub use metrics::{compute_metrics, Metrics};
pub use params::InputParams;
pub use roofing::{build_roofing, RoofingModel, RoofingOptions};
pub use structure::{build_structure, StructureModel};
