//! # Structure Assembler
//!
//! Derives every timber member of the roof frame from [`InputParams`]:
//! pillars, base and ridge purlins, tie beams, rafter pairs with their
//! birdmouths, ridge ties and corner knee braces.
//!
//! ## Vertical Levels
//!
//! ```text
//!   ridge purlin top ─┐  = base purlin top + ridge_height(width - ridge purlin, pitch)
//!   base purlin top  ─┤  = pillar top + base purlin
//!   pillar top       ─┘  = 2.4 m
//! ```
//!
//! The ridge purlin is seated below the rafter tops. Its height is chosen so
//! the bird line (through the inner corners of both birdmouth seats) runs
//! parallel to the slope.
//!
//! ## Example
//!
//! ```rust
//! use roof_core::params::InputParams;
//! use roof_core::structure::build_structure;
//!
//! let model = build_structure(&InputParams::default()).unwrap();
//! assert_eq!(model.pillars.len(), 6);
//! assert!(model.rafters.iter().all(|r| r.ridge_end.z == 0.0));
//! ```

pub mod bracing;
pub mod members;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{RoofError, RoofResult};
use crate::geometry::{
    bird_mouth_at_base_purlin, bird_mouth_at_ridge_purlin, needs_center_pillar, pillar_row_count,
    rafter_bay_count, rafter_length, rafter_y_offset, ridge_height, BASE_PURLIN_SIZE, PILLAR_HEIGHT,
    PILLAR_SIZE, RAFTER_DEPTH, RAFTER_WIDTH, RIDGE_PURLIN_SIZE, RIDGE_TIE_DEPTH, RIDGE_TIE_NOTCH,
    RIDGE_TIE_THICKNESS, TIE_BEAM_HEIGHT, TIE_BEAM_WIDTH,
};
use crate::params::InputParams;

pub use members::{
    BraceKind, KneeBrace, Pillar, Point3D, Purlin, Rafter, RidgeTie, Slope, TieBeam,
};

/// Heights shared by every member, derived bottom-up from the pillar top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub pillar_top: f64,
    pub base_purlin_center: f64,
    pub base_purlin_top: f64,
    pub ridge_purlin_top: f64,
    pub ridge_purlin_center: f64,
    /// Vertical distance from a bearing surface to the rafter centerline at the plumb cut
    pub rafter_y_offset: f64,
    /// Rafter centerline height at the eave tip
    pub rafter_eave: f64,
    /// Rafter centerline height at the ridge (Z = 0)
    pub rafter_ridge: f64,
}

impl Levels {
    fn derive(params: &InputParams, tan_pitch: f64) -> Self {
        let pillar_top = PILLAR_HEIGHT;
        let base_purlin_center = pillar_top + BASE_PURLIN_SIZE / 2.0;
        let base_purlin_top = pillar_top + BASE_PURLIN_SIZE;

        // Bird line: span narrowed by the ridge purlin's own footprint
        let ridge_purlin_top =
            base_purlin_top + ridge_height(params.width - RIDGE_PURLIN_SIZE, params.pitch);
        let ridge_purlin_center = ridge_purlin_top - RIDGE_PURLIN_SIZE / 2.0;

        let offset = rafter_y_offset(params.pitch);
        let base_bearing = base_purlin_top + offset;

        Levels {
            pillar_top,
            base_purlin_center,
            base_purlin_top,
            ridge_purlin_top,
            ridge_purlin_center,
            rafter_y_offset: offset,
            rafter_eave: base_bearing - params.eaves_overhang * tan_pitch,
            rafter_ridge: base_bearing + (params.width / 2.0) * tan_pitch,
        }
    }

    /// Y of the ridge purlin underside
    pub fn ridge_purlin_bottom(&self) -> f64 {
        self.ridge_purlin_top - RIDGE_PURLIN_SIZE
    }
}

/// The complete timber frame for one parameter set.
///
/// Built wholesale by [`build_structure`]; a parameter change produces a new
/// model rather than editing this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureModel {
    pub params: InputParams,

    /// Rise of the ridge purlin top above the base purlin top
    pub ridge_height: f64,

    /// Height of the standard (non-ridge) pillars
    pub pillar_height: f64,

    pub levels: Levels,

    pub pillars: Vec<Pillar>,

    /// Left (negative Z) then right
    pub base_purlins: [Purlin; 2],

    pub ridge_purlin: Purlin,

    /// One per pillar row, ordered by X
    pub tie_beams: Vec<TieBeam>,

    pub ridge_ties: Vec<RidgeTie>,

    /// Left/right pairs ordered by X
    pub rafters: Vec<Rafter>,

    /// Center-to-center distance between neighboring rafter pairs
    pub rafter_spacing: f64,

    pub knee_braces: Vec<KneeBrace>,
}

impl StructureModel {
    /// Number of rafter positions along the ridge (pairs)
    pub fn rafter_pair_count(&self) -> usize {
        self.rafters.len() / 2
    }

    /// Slope length shared by every rafter
    pub fn rafter_length(&self) -> f64 {
        self.rafters.first().map_or(0.0, |r| r.length)
    }

    /// Longitudinal run of the purlins including gable overhangs
    pub fn purlin_run(&self) -> f64 {
        self.ridge_purlin.length()
    }

    /// Distinct pillar row X positions, ordered
    pub fn pillar_row_positions(&self) -> Vec<f64> {
        self.tie_beams.iter().map(|t| t.start.x).collect()
    }

    /// Whether the corner rows carry a center pillar under the ridge purlin
    pub fn has_center_pillars(&self) -> bool {
        self.pillars.iter().any(Pillar::is_ridge_pillar)
    }

    fn ensure_finite(&self) -> RoofResult<()> {
        let scalars = [
            ("ridge_height", self.ridge_height),
            ("ridge_purlin_top", self.levels.ridge_purlin_top),
            ("rafter_y_offset", self.levels.rafter_y_offset),
            ("rafter_eave", self.levels.rafter_eave),
            ("rafter_ridge", self.levels.rafter_ridge),
            ("rafter_spacing", self.rafter_spacing),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(RoofError::degenerate(format!("{} is not finite ({})", name, value)));
            }
        }
        for rafter in &self.rafters {
            if !rafter.length.is_finite()
                || !rafter.eave_end.is_finite()
                || !rafter.ridge_end.is_finite()
                || !rafter.bird_mouth_base.seat_depth.is_finite()
            {
                return Err(RoofError::degenerate("rafter geometry is not finite"));
            }
        }
        let eave_z = self.params.width / 2.0 + self.params.eaves_overhang;
        for tie in &self.ridge_ties {
            if !(tie.z_half_top.is_finite() && tie.z_half_bottom.is_finite()) || tie.z_half_top <= 0.0 {
                return Err(RoofError::degenerate("ridge tie does not meet the rafter top surface"));
            }
            if tie.z_half_bottom > eave_z || tie.y_bottom <= self.levels.base_purlin_top {
                return Err(RoofError::degenerate("ridge tie reaches past the base purlins"));
            }
        }
        Ok(())
    }
}

/// Evenly spaced pillar row positions, outer faces flush with the length.
pub fn pillar_row_positions(length: f64) -> Vec<f64> {
    let rows = pillar_row_count(length);
    let first = -(length / 2.0 - PILLAR_SIZE / 2.0);
    let step = (length - PILLAR_SIZE) / (rows - 1) as f64;
    (0..rows).map(|i| first + step * i as f64).collect()
}

/// Rafter pair X positions: gable rafters flush with the purlin ends, equal
/// bays in between.
pub fn rafter_positions(purlin_run: f64) -> (Vec<f64>, f64) {
    let run = purlin_run - RAFTER_WIDTH;
    let bays = rafter_bay_count(run);
    let spacing = run / bays as f64;
    let first = -purlin_run / 2.0 + RAFTER_WIDTH / 2.0;
    let xs = (0..=bays).map(|i| first + spacing * i as f64).collect();
    (xs, spacing)
}

/// Build the full timber frame.
///
/// # Returns
///
/// * `Ok(StructureModel)` - Complete, internally consistent model
/// * `Err(RoofError)` - Inputs failed validation or the geometry degenerated
pub fn build_structure(params: &InputParams) -> RoofResult<StructureModel> {
    params.validate()?;

    let pitch = params.pitch_radians();
    let cos_pitch = pitch.cos();
    let tan_pitch = pitch.tan();

    let levels = Levels::derive(params, tan_pitch);
    debug!(
        "levels: base purlin top {:.4}, ridge purlin top {:.4}, rafter offset {:.4}",
        levels.base_purlin_top, levels.ridge_purlin_top, levels.rafter_y_offset
    );

    let purlin_run = params.purlin_run();
    let half_run = purlin_run / 2.0;
    let side_z = params.width / 2.0 - BASE_PURLIN_SIZE / 2.0;

    // Purlins
    let base_purlin = |sign: f64| Purlin {
        start: Point3D::new(-half_run, levels.base_purlin_center, sign * side_z),
        end: Point3D::new(half_run, levels.base_purlin_center, sign * side_z),
        width: BASE_PURLIN_SIZE,
        height: BASE_PURLIN_SIZE,
    };
    let base_purlins = [base_purlin(-1.0), base_purlin(1.0)];
    let ridge_purlin = Purlin {
        start: Point3D::new(-half_run, levels.ridge_purlin_center, 0.0),
        end: Point3D::new(half_run, levels.ridge_purlin_center, 0.0),
        width: RIDGE_PURLIN_SIZE,
        height: RIDGE_PURLIN_SIZE,
    };

    // Pillars and tie beams
    let row_xs = pillar_row_positions(params.length);
    let center_pillars = needs_center_pillar(params.width);
    let pillar_z = params.width / 2.0 - PILLAR_SIZE / 2.0;
    let last_row = row_xs.len() - 1;

    let mut pillars = Vec::with_capacity(row_xs.len() * 2 + 2);
    let mut tie_beams = Vec::with_capacity(row_xs.len());
    for (i, &x) in row_xs.iter().enumerate() {
        for sign in [-1.0, 1.0] {
            pillars.push(Pillar {
                base: Point3D::new(x, 0.0, sign * pillar_z),
                height: PILLAR_HEIGHT,
            });
        }
        if center_pillars && (i == 0 || i == last_row) {
            pillars.push(Pillar {
                base: Point3D::new(x, 0.0, 0.0),
                height: levels.ridge_purlin_bottom(),
            });
        }
        tie_beams.push(TieBeam {
            start: Point3D::new(x, levels.base_purlin_center, -side_z),
            end: Point3D::new(x, levels.base_purlin_center, side_z),
            width: TIE_BEAM_WIDTH,
            height: TIE_BEAM_HEIGHT,
        });
    }
    debug!(
        "{} pillar rows, {} pillars, center pillars: {}",
        row_xs.len(),
        pillars.len(),
        center_pillars
    );

    // Rafters
    let (rafter_xs, rafter_spacing) = rafter_positions(purlin_run);
    let length = rafter_length(params.width, params.pitch, params.eaves_overhang);
    let eave_z = params.width / 2.0 + params.eaves_overhang;
    let bird_mouth_base =
        bird_mouth_at_base_purlin(params.pitch).at_distance(params.eaves_overhang / cos_pitch);
    let bird_mouth_ridge = bird_mouth_at_ridge_purlin(params.pitch)
        .at_distance((params.eaves_overhang + params.width / 2.0) / cos_pitch);

    let mut rafters = Vec::with_capacity(rafter_xs.len() * 2);
    for &x in &rafter_xs {
        for slope in Slope::BOTH {
            rafters.push(Rafter {
                slope,
                eave_end: Point3D::new(x, levels.rafter_eave, slope.sign() * eave_z),
                ridge_end: Point3D::new(x, levels.rafter_ridge, 0.0),
                bird_mouth_base,
                bird_mouth_ridge,
                length,
                width: RAFTER_WIDTH,
                depth: RAFTER_DEPTH,
            });
        }
    }
    debug!(
        "{} rafter pairs at {:.4} m spacing, rafter length {:.4}",
        rafter_xs.len(),
        rafter_spacing,
        length
    );

    let ridge_ties = place_ridge_ties(&rafter_xs, params, &levels, cos_pitch, tan_pitch)?;
    let knee_braces = bracing::corner_braces(&row_xs, side_z, &levels, center_pillars);

    let model = StructureModel {
        params: *params,
        ridge_height: levels.ridge_purlin_top - levels.base_purlin_top,
        pillar_height: PILLAR_HEIGHT,
        levels,
        pillars,
        base_purlins,
        ridge_purlin,
        tie_beams,
        ridge_ties,
        rafters,
        rafter_spacing,
        knee_braces,
    };
    model.ensure_finite()?;
    Ok(model)
}

/// Ridge ties beside each rafter position.
///
/// The two horizontal cuts are intersected with the rafter top plane, so the
/// half-width at height `y` is `(top_at_ridge - y) / tan`. At low pitch the
/// bottom cut is raised until the tie ends at the inner faces of the base
/// purlins. A tie that then no longer reaches below the ridge purlin top is
/// degenerate.
fn place_ridge_ties(
    rafter_xs: &[f64],
    params: &InputParams,
    levels: &Levels,
    cos_pitch: f64,
    tan_pitch: f64,
) -> RoofResult<Vec<RidgeTie>> {
    let top_at_ridge = levels.rafter_ridge + RAFTER_DEPTH / (2.0 * cos_pitch);
    let y_top = levels.ridge_purlin_top + RIDGE_TIE_NOTCH;
    let z_limit = params.width / 2.0 - BASE_PURLIN_SIZE;
    let y_bottom = (y_top - RIDGE_TIE_DEPTH).max(top_at_ridge - z_limit * tan_pitch);
    if y_bottom >= levels.ridge_purlin_top {
        return Err(RoofError::degenerate(format!(
            "ridge tie does not fit between the base purlins ({} m wide at {} degrees)",
            params.width, params.pitch
        )));
    }
    if y_bottom > y_top - RIDGE_TIE_DEPTH {
        debug!("ridge tie depth reduced to {:.4} m", y_top - y_bottom);
    }
    let tie = |x: f64| RidgeTie {
        x,
        y_top,
        y_bottom,
        z_half_top: (top_at_ridge - y_top) / tan_pitch,
        z_half_bottom: (top_at_ridge - y_bottom) / tan_pitch,
        thickness: RIDGE_TIE_THICKNESS,
    };

    let offset = RAFTER_WIDTH / 2.0 + RIDGE_TIE_THICKNESS / 2.0;
    let last = rafter_xs.len() - 1;
    let mut ties = Vec::with_capacity(rafter_xs.len() * 2);
    for (i, &x) in rafter_xs.iter().enumerate() {
        if i == 0 {
            ties.push(tie(x + offset));
        } else if i == last {
            ties.push(tie(x - offset));
        } else {
            ties.push(tie(x - offset));
            ties.push(tie(x + offset));
        }
    }
    Ok(ties)
}
