//! # Derived Metrics
//!
//! Volume and surface totals over a [`StructureModel`], used for costing.
//! Surfaces count the long faces of each member only (end grain ignored).
//!
//! ## Example
//!
//! ```rust
//! use roof_core::metrics::compute_metrics;
//! use roof_core::params::InputParams;
//! use roof_core::structure::build_structure;
//!
//! let model = build_structure(&InputParams::default()).unwrap();
//! let metrics = compute_metrics(&model);
//! assert!(metrics.timber_volume > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::structure::StructureModel;
use crate::units::{CubicMeters, Meters, SquareMeters};

/// Totals for one class of member.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberTotals {
    pub count: usize,
    /// Summed member length (m)
    pub length: f64,
    /// Timber volume (m³)
    pub volume: f64,
    /// Side surface, end grain excluded (m²)
    pub surface: f64,
}

impl MemberTotals {
    fn add_prism(&mut self, width: f64, height: f64, length: f64) {
        let area: SquareMeters = Meters(width) * Meters(height);
        let volume: CubicMeters = area * Meters(length);
        let perimeter = (Meters(width) + Meters(height)) * 2.0;
        let side_surface: SquareMeters = perimeter * Meters::new(length);
        self.count += 1;
        self.length += length;
        self.volume += volume.0;
        self.surface += side_surface.0;
    }
}

/// Per-class breakdown of the timber frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberBreakdown {
    pub pillars: MemberTotals,
    pub purlins: MemberTotals,
    pub tie_beams: MemberTotals,
    pub rafters: MemberTotals,
    pub ridge_ties: MemberTotals,
    pub knee_braces: MemberTotals,
}

impl MemberBreakdown {
    fn classes(&self) -> [&MemberTotals; 6] {
        [
            &self.pillars,
            &self.purlins,
            &self.tie_beams,
            &self.rafters,
            &self.ridge_ties,
            &self.knee_braces,
        ]
    }
}

/// Aggregates for costing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Total timber volume (m³)
    pub timber_volume: f64,
    /// Total timber side surface (m²), for stain/paint quantities
    pub timber_surface: f64,
    /// Roof surface of both slopes (m²)
    pub roof_surface: f64,
    pub members: MemberBreakdown,
}

/// Sum every member class of the model.
///
/// Recomputed in full on each call.
pub fn compute_metrics(model: &StructureModel) -> Metrics {
    let mut members = MemberBreakdown::default();

    for pillar in &model.pillars {
        members.pillars.add_prism(pillar.size(), pillar.size(), pillar.height);
    }

    for purlin in model.base_purlins.iter().chain(std::iter::once(&model.ridge_purlin)) {
        members.purlins.add_prism(purlin.width, purlin.height, purlin.length());
    }

    for tie in &model.tie_beams {
        members.tie_beams.add_prism(tie.width, tie.height, tie.length());
    }

    for rafter in &model.rafters {
        members.rafters.add_prism(rafter.width, rafter.depth, rafter.length);
    }

    for tie in &model.ridge_ties {
        let t = &mut members.ridge_ties;
        let top_width = 2.0 * tie.z_half_top;
        let bottom_width = 2.0 * tie.z_half_bottom;
        t.count += 1;
        t.length += bottom_width;
        t.volume += tie.face_area() * tie.thickness;
        t.surface += 2.0 * tie.face_area()
            + tie.thickness * (top_width + bottom_width + 2.0 * tie.side_length());
    }

    for brace in &model.knee_braces {
        members.knee_braces.add_prism(brace.size, brace.size, brace.length());
    }

    let timber_volume = members.classes().iter().map(|m| m.volume).sum();
    let timber_surface = members.classes().iter().map(|m| m.surface).sum();
    let roof_surface = 2.0 * model.rafter_length() * model.purlin_run();

    Metrics {
        timber_volume,
        timber_surface,
        roof_surface,
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PILLAR_HEIGHT, RAFTER_DEPTH, RAFTER_WIDTH};
    use crate::params::InputParams;
    use crate::structure::build_structure;
    use approx::assert_relative_eq;

    fn scenario_metrics() -> (StructureModel, Metrics) {
        let model = build_structure(&InputParams::default()).unwrap();
        let metrics = compute_metrics(&model);
        (model, metrics)
    }

    #[test]
    fn test_roof_surface() {
        let (model, metrics) = scenario_metrics();
        let rafter = 2.0 / 25f64.to_radians().cos();
        assert_relative_eq!(metrics.roof_surface, 2.0 * rafter * 4.6, epsilon = 1e-9);
        assert_relative_eq!(model.purlin_run(), 4.6, epsilon = 1e-12);
    }

    #[test]
    fn test_pillar_volume() {
        let (_, metrics) = scenario_metrics();
        assert_eq!(metrics.members.pillars.count, 6);
        assert_relative_eq!(metrics.members.pillars.volume, 6.0 * 0.15 * 0.15 * PILLAR_HEIGHT, epsilon = 1e-12);
    }

    #[test]
    fn test_ridge_pillars_use_own_height() {
        let params = InputParams {
            width: 4.0,
            ..InputParams::default()
        };
        let model = build_structure(&params).unwrap();
        let metrics = compute_metrics(&model);
        let expected: f64 = model.pillars.iter().map(|p| 0.0225 * p.height).sum();
        assert_relative_eq!(metrics.members.pillars.volume, expected, epsilon = 1e-12);
        assert!(expected > model.pillars.len() as f64 * 0.0225 * PILLAR_HEIGHT);
    }

    #[test]
    fn test_rafter_totals() {
        let (model, metrics) = scenario_metrics();
        let n = model.rafters.len() as f64;
        let len = model.rafter_length();
        assert_relative_eq!(metrics.members.rafters.length, n * len, epsilon = 1e-9);
        assert_relative_eq!(
            metrics.members.rafters.volume,
            n * RAFTER_WIDTH * RAFTER_DEPTH * len,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            metrics.members.rafters.surface,
            n * 2.0 * (RAFTER_WIDTH + RAFTER_DEPTH) * len,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_totals_sum_classes() {
        let (_, metrics) = scenario_metrics();
        let volume: f64 = metrics.members.classes().iter().map(|m| m.volume).sum();
        assert_eq!(metrics.timber_volume, volume);
        assert!(metrics.timber_surface > metrics.timber_volume);
        assert_eq!(metrics.members.knee_braces.count, 12);
    }

    #[test]
    fn test_metrics_are_pure() {
        let (model, metrics) = scenario_metrics();
        assert_eq!(compute_metrics(&model), metrics);
    }
}
