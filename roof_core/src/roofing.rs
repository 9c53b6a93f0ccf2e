//! # Roofing Layers
//!
//! Secondary layers laid over a finished [`StructureModel`]:
//!
//! - **Counter battens** - one per rafter, over the membrane
//! - **Roof battens** - horizontal rows along each slope, fascia to ridge
//! - **Flashings** - drip edge, eaves, ridge and gable sheet metal
//! - **Lamberia** - tapered cladding planks
//!
//! Each layer is toggled by [`RoofingOptions`] and derived on its own, so
//! switching a layer never requires rebuilding the frame.
//!
//! ## Example
//!
//! ```rust
//! use roof_core::params::InputParams;
//! use roof_core::roofing::{build_roofing, counter_batten_total_length, RoofingOptions};
//! use roof_core::structure::build_structure;
//!
//! let frame = build_structure(&InputParams::default()).unwrap();
//! let roofing = build_roofing(&frame, &RoofingOptions::default()).unwrap();
//!
//! let rafters: f64 = frame.rafters.iter().map(|r| r.length).sum();
//! assert!((counter_batten_total_length(&roofing) - rafters).abs() < 1e-9);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::RoofResult;
use crate::settings::{FlashingSettings, RoofingSettings};
use crate::structure::{Point3D, Rafter, Slope, StructureModel};

/// Which optional layers to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoofingOptions {
    /// Membrane with counter battens
    pub membrane: bool,
    /// Roof battens plus flashings
    pub roofing: bool,
    /// Lamberia cladding
    pub lamberia: bool,
}

impl Default for RoofingOptions {
    fn default() -> Self {
        RoofingOptions {
            membrane: true,
            roofing: true,
            lamberia: false,
        }
    }
}

/// Batten running eave to ridge on top of a rafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterBatten {
    pub start: Point3D,
    pub end: Point3D,
    pub length: f64,
}

/// Horizontal batten row across one slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofBatten {
    pub slope: Slope,
    /// 0 is the fascia row, the last row sits at the ridge
    pub row: usize,
    pub start: Point3D,
    pub end: Point3D,
    pub length: f64,
}

/// Flashing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashingKind {
    DripEdge,
    Eaves,
    Ridge,
    Gable,
}

impl FlashingKind {
    pub const ALL: [FlashingKind; 4] = [
        FlashingKind::DripEdge,
        FlashingKind::Eaves,
        FlashingKind::Ridge,
        FlashingKind::Gable,
    ];

    /// Price table key
    pub fn material_id(&self) -> &'static str {
        match self {
            FlashingKind::DripEdge => "flashing_drip_edge",
            FlashingKind::Eaves => "flashing_eaves",
            FlashingKind::Ridge => "flashing_ridge",
            FlashingKind::Gable => "flashing_gable",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FlashingKind::DripEdge => "Drip edge",
            FlashingKind::Eaves => "Eaves flashing",
            FlashingKind::Ridge => "Ridge flashing",
            FlashingKind::Gable => "Gable flashing",
        }
    }

    fn developed_width(&self, settings: &FlashingSettings) -> f64 {
        match self {
            FlashingKind::DripEdge => settings.drip_edge_width,
            FlashingKind::Eaves => settings.eaves_width,
            FlashingKind::Ridge => settings.ridge_width,
            FlashingKind::Gable => settings.gable_width,
        }
    }

    /// Run this profile covers
    fn run(&self, purlin_run: f64, rafter_length: f64) -> f64 {
        match self {
            FlashingKind::DripEdge | FlashingKind::Eaves => 2.0 * purlin_run,
            FlashingKind::Ridge => purlin_run,
            FlashingKind::Gable => 4.0 * rafter_length,
        }
    }
}

/// Pieces and sheet area for one flashing profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlashingGroup {
    pub count: usize,
    pub piece_length: f64,
    pub developed_width: f64,
    /// count x piece length x developed width (m²)
    pub surface: f64,
}

/// All four flashing profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flashings {
    pub drip_edge: FlashingGroup,
    pub eaves: FlashingGroup,
    pub ridge: FlashingGroup,
    pub gable: FlashingGroup,
    pub total_surface: f64,
}

impl Flashings {
    pub fn group(&self, kind: FlashingKind) -> &FlashingGroup {
        match kind {
            FlashingKind::DripEdge => &self.drip_edge,
            FlashingKind::Eaves => &self.eaves,
            FlashingKind::Ridge => &self.ridge,
            FlashingKind::Gable => &self.gable,
        }
    }
}

/// Cladding plank layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lamberia {
    pub planks_per_slope: usize,
    pub plank_length: f64,
    pub plank_width: f64,
    pub total_planks: usize,
    /// Plank cover area, both slopes (m²)
    pub surface: f64,
}

/// Secondary layers for one frame. Disabled layers are empty or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofingModel {
    pub counter_battens: Vec<CounterBatten>,
    pub roof_battens: Vec<RoofBatten>,
    pub flashings: Option<Flashings>,
    pub lamberia: Option<Lamberia>,
}

/// Build the roofing layers with default settings.
pub fn build_roofing(structure: &StructureModel, options: &RoofingOptions) -> RoofResult<RoofingModel> {
    build_roofing_with(structure, options, &RoofingSettings::default())
}

/// Build the roofing layers with explicit settings.
pub fn build_roofing_with(
    structure: &StructureModel,
    options: &RoofingOptions,
    settings: &RoofingSettings,
) -> RoofResult<RoofingModel> {
    settings.validate()?;

    let counter_battens = if options.membrane {
        lay_counter_battens(structure, settings)
    } else {
        Vec::new()
    };

    let (roof_battens, flashings) = if options.roofing {
        (
            lay_roof_battens(structure, options, settings),
            Some(size_flashings(structure, &settings.flashing)),
        )
    } else {
        (Vec::new(), None)
    };

    let lamberia = options.lamberia.then(|| lay_lamberia(structure, settings));

    debug!(
        "roofing: {} counter battens, {} batten rows, flashings: {}, lamberia: {}",
        counter_battens.len(),
        roof_battens.len(),
        flashings.is_some(),
        lamberia.is_some()
    );

    Ok(RoofingModel {
        counter_battens,
        roof_battens,
        flashings,
        lamberia,
    })
}

/// Positions on a rafter's top face, measured along the slope from the eave.
struct SlopeFrame {
    /// Rafter top line at the eave tip
    origin: Point3D,
    /// Unit vector up the slope
    up_slope: (f64, f64),
    /// Unit normal out of the roof plane
    normal: (f64, f64),
}

impl SlopeFrame {
    fn new(structure: &StructureModel, slope: Slope, x: f64) -> Self {
        let pitch = structure.params.pitch_radians();
        let (sin, cos) = (pitch.sin(), pitch.cos());
        let s = slope.sign();
        let eave_z = s * (structure.params.width / 2.0 + structure.params.eaves_overhang);
        let half_depth = structure
            .rafters
            .first()
            .map_or(0.0, |r: &Rafter| r.depth / 2.0);

        let normal = (cos, s * sin);
        SlopeFrame {
            origin: Point3D::new(
                x,
                structure.levels.rafter_eave + normal.0 * half_depth,
                eave_z + normal.1 * half_depth,
            ),
            up_slope: (sin, -s * cos),
            normal,
        }
    }

    fn at(&self, along: f64, offset: f64, x: f64) -> Point3D {
        Point3D::new(
            x,
            self.origin.y + self.up_slope.0 * along + self.normal.0 * offset,
            self.origin.z + self.up_slope.1 * along + self.normal.1 * offset,
        )
    }
}

fn lay_counter_battens(structure: &StructureModel, settings: &RoofingSettings) -> Vec<CounterBatten> {
    let offset = settings.counter_batten.height / 2.0;
    structure
        .rafters
        .iter()
        .map(|rafter| {
            let frame = SlopeFrame::new(structure, rafter.slope, rafter.eave_end.x);
            CounterBatten {
                start: frame.at(0.0, offset, rafter.eave_end.x),
                end: frame.at(rafter.length, offset, rafter.eave_end.x),
                length: rafter.length,
            }
        })
        .collect()
}

/// Rows per slope: the regular rows plus a fascia row and a ridge row.
pub fn batten_rows_per_slope(rafter_length: f64, row_spacing: f64) -> usize {
    (rafter_length / row_spacing).ceil() as usize + 2
}

fn lay_roof_battens(structure: &StructureModel, options: &RoofingOptions, settings: &RoofingSettings) -> Vec<RoofBatten> {
    let rafter_length = structure.rafter_length();
    let rows = batten_rows_per_slope(rafter_length, settings.batten_row_spacing);
    let row_gap = rafter_length / (rows - 1) as f64;

    let bed = if options.membrane {
        settings.counter_batten.height
    } else {
        0.0
    };
    let offset = bed + settings.roof_batten.height / 2.0;

    let half_run = structure.purlin_run() / 2.0;
    let mut battens = Vec::with_capacity(rows * 2);
    for slope in Slope::BOTH {
        let frame = SlopeFrame::new(structure, slope, 0.0);
        for row in 0..rows {
            let along = row_gap * row as f64;
            battens.push(RoofBatten {
                slope,
                row,
                start: frame.at(along, offset, -half_run),
                end: frame.at(along, offset, half_run),
                length: 2.0 * half_run,
            });
        }
    }
    battens
}

fn flashing_group(kind: FlashingKind, run: f64, settings: &FlashingSettings) -> FlashingGroup {
    let count = (run / settings.effective_length()).ceil() as usize;
    let developed_width = kind.developed_width(settings);
    FlashingGroup {
        count,
        piece_length: settings.piece_length,
        developed_width,
        surface: count as f64 * settings.piece_length * developed_width,
    }
}

fn size_flashings(structure: &StructureModel, settings: &FlashingSettings) -> Flashings {
    let purlin_run = structure.purlin_run();
    let rafter_length = structure.rafter_length();
    let group = |kind: FlashingKind| flashing_group(kind, kind.run(purlin_run, rafter_length), settings);

    let drip_edge = group(FlashingKind::DripEdge);
    let eaves = group(FlashingKind::Eaves);
    let ridge = group(FlashingKind::Ridge);
    let gable = group(FlashingKind::Gable);
    Flashings {
        total_surface: drip_edge.surface + eaves.surface + ridge.surface + gable.surface,
        drip_edge,
        eaves,
        ridge,
        gable,
    }
}

fn lay_lamberia(structure: &StructureModel, settings: &RoofingSettings) -> Lamberia {
    let planks_per_slope = (structure.rafter_length() / settings.plank_width).ceil() as usize;
    let plank_length = structure.purlin_run();
    let total_planks = planks_per_slope * 2;
    Lamberia {
        planks_per_slope,
        plank_length,
        plank_width: settings.plank_width,
        total_planks,
        surface: total_planks as f64 * plank_length * settings.plank_width,
    }
}

/// Summed length of all counter battens (zero when the membrane is off)
pub fn counter_batten_total_length(model: &RoofingModel) -> f64 {
    model.counter_battens.iter().map(|b| b.length).sum()
}

/// Summed length of all roof batten rows
pub fn roof_batten_total_length(model: &RoofingModel) -> f64 {
    model.roof_battens.iter().map(|b| b.length).sum()
}

/// Sheet area of all flashings (zero when roofing is off)
pub fn flashing_total_surface(model: &RoofingModel) -> f64 {
    model.flashings.map_or(0.0, |f| f.total_surface)
}
