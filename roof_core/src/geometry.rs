//! # Geometry Primitives
//!
//! Stateless formulas the structure assembler is built from: ridge rise,
//! rafter length, birdmouth notches and the span-driven layout counts.
//!
//! Angles enter as degrees and are converted once per call. Lengths are meters.
//!
//! ## Member Sizes
//!
//! | Member          | Section (m)   |
//! |-----------------|---------------|
//! | Pillar          | 0.15 x 0.15   |
//! | Base purlin     | 0.15 x 0.15   |
//! | Ridge purlin    | 0.10 x 0.10   |
//! | Tie beam        | 0.10 x 0.15   |
//! | Rafter          | 0.075 x 0.15  |
//! | Ridge tie       | 0.05 thick    |
//! | Knee brace      | 0.10 x 0.10   |
//!
//! ## Example
//!
//! ```rust
//! use roof_core::geometry::{rafter_length, ridge_height};
//!
//! let rise = ridge_height(3.0, 45.0);
//! assert!((rise - 1.5).abs() < 1e-9);
//!
//! let rafter = rafter_length(3.0, 25.0, 0.5);
//! assert!((rafter - 2.2068).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Degrees, Radians};

// ============================================================================
// Member Sizes
// ============================================================================

/// Pillar cross-section side
pub const PILLAR_SIZE: f64 = 0.15;

/// Standard pillar height, ground to base purlin underside
pub const PILLAR_HEIGHT: f64 = 2.4;

/// Base purlin cross-section side
pub const BASE_PURLIN_SIZE: f64 = 0.15;

/// Ridge purlin cross-section side
pub const RIDGE_PURLIN_SIZE: f64 = 0.10;

/// Tie beam width (along X)
pub const TIE_BEAM_WIDTH: f64 = 0.10;

/// Tie beam height
pub const TIE_BEAM_HEIGHT: f64 = 0.15;

/// Rafter width (along X)
pub const RAFTER_WIDTH: f64 = 0.075;

/// Rafter depth, measured square to the slope
pub const RAFTER_DEPTH: f64 = 0.15;

/// Ridge tie board thickness (along X)
pub const RIDGE_TIE_THICKNESS: f64 = 0.05;

/// Height of the ridge tie top cut above the ridge purlin top
pub const RIDGE_TIE_NOTCH: f64 = 0.02;

/// Vertical distance between the ridge tie top and bottom cuts
pub const RIDGE_TIE_DEPTH: f64 = 0.15;

/// Knee brace cross-section side
pub const KNEE_BRACE_SIZE: f64 = 0.10;

/// Knee brace length along its axis
pub const KNEE_BRACE_LENGTH: f64 = 1.0;

// ============================================================================
// Layout Limits
// ============================================================================

/// Longest clear span a purlin or tie beam may bridge without a pillar
pub const MAX_UNSUPPORTED_SPAN: f64 = 3.0;

/// Largest allowed center-to-center rafter spacing
pub const MAX_RAFTER_SPACING: f64 = 0.9;

/// Plumb cut height of both birdmouths, constant for every pitch.
///
/// Keeps 80% of the rafter depth intact at the bearing.
pub const BIRD_MOUTH_PLUMB_HEIGHT: f64 = 0.03;

/// Seat depth of the ridge birdmouth: half the ridge purlin width
pub const RIDGE_BIRD_MOUTH_SEAT: f64 = RIDGE_PURLIN_SIZE / 2.0;

/// Knee brace leg length (horizontal and vertical run at 45 degrees)
pub fn knee_brace_leg() -> f64 {
    KNEE_BRACE_LENGTH * std::f64::consts::FRAC_1_SQRT_2
}

// ============================================================================
// Slope Formulas
// ============================================================================

/// Rise from eave bearing to ridge for a symmetric gable.
///
/// `span` is the full horizontal distance between the two bearings; the
/// structure assembler passes the width narrowed by the ridge purlin to keep
/// the bird line parallel to the slope.
pub fn ridge_height(span: f64, pitch_deg: f64) -> f64 {
    let pitch: Radians = Degrees(pitch_deg).into();
    (span / 2.0) * pitch.tan()
}

/// Slope length of a rafter from eave tip to ridge.
pub fn rafter_length(width: f64, pitch_deg: f64, eaves_overhang: f64) -> f64 {
    let pitch: Radians = Degrees(pitch_deg).into();
    (width / 2.0 + eaves_overhang) / pitch.cos()
}

/// Vertical distance from a bearing surface up to the rafter centerline,
/// measured at the birdmouth plumb cut.
///
/// The centerline sits `depth / (2 cos)` above the soffit and the soffit sits
/// one plumb height below the bearing at the plumb cut.
pub fn rafter_y_offset(pitch_deg: f64) -> f64 {
    let pitch: Radians = Degrees(pitch_deg).into();
    RAFTER_DEPTH / (2.0 * pitch.cos()) - BIRD_MOUTH_PLUMB_HEIGHT
}

// ============================================================================
// Birdmouths
// ============================================================================

/// Seat-and-plumb notch cut into a rafter where it bears on a purlin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdMouth {
    /// Horizontal length of the seat cut
    pub seat_depth: f64,

    /// Vertical length of the plumb cut
    pub plumb_height: f64,

    /// Slope distance from the rafter's eave end to the notch
    pub distance_from_eave: f64,
}

impl BirdMouth {
    /// Same notch positioned along the rafter
    pub fn at_distance(self, distance_from_eave: f64) -> Self {
        BirdMouth {
            distance_from_eave,
            ..self
        }
    }
}

/// Notch at the base purlin: fixed plumb height, seat shrinking as pitch steepens.
///
/// Pitch must be positive; at zero the seat is unbounded.
pub fn bird_mouth_at_base_purlin(pitch_deg: f64) -> BirdMouth {
    let pitch: Radians = Degrees(pitch_deg).into();
    BirdMouth {
        seat_depth: BIRD_MOUTH_PLUMB_HEIGHT / pitch.tan(),
        plumb_height: BIRD_MOUTH_PLUMB_HEIGHT,
        distance_from_eave: 0.0,
    }
}

/// Notch at the ridge purlin: seat spans half the ridge purlin, plumb height
/// matches the base notch. Independent of pitch.
pub fn bird_mouth_at_ridge_purlin(_pitch_deg: f64) -> BirdMouth {
    BirdMouth {
        seat_depth: RIDGE_BIRD_MOUTH_SEAT,
        plumb_height: BIRD_MOUTH_PLUMB_HEIGHT,
        distance_from_eave: 0.0,
    }
}

// ============================================================================
// Layout Counts
// ============================================================================

/// Number of pillar rows along `span` so no clear bay exceeds
/// [`MAX_UNSUPPORTED_SPAN`]. Always at least two (the corner rows).
pub fn pillar_row_count(span: f64) -> usize {
    let inner_span = span - 2.0 * PILLAR_SIZE;
    let bays = (inner_span / MAX_UNSUPPORTED_SPAN).ceil().max(1.0) as usize;
    bays + 1
}

/// Whether the clear span between the two pillar lines needs a center pillar.
pub fn needs_center_pillar(width: f64) -> bool {
    width - 2.0 * PILLAR_SIZE > MAX_UNSUPPORTED_SPAN
}

/// Minimum number of equal bays covering `run` at [`MAX_RAFTER_SPACING`].
pub fn rafter_bay_count(run: f64) -> usize {
    (run / MAX_RAFTER_SPACING).ceil().max(1.0) as usize
}

/// Uniform center-to-center rafter spacing over `run`.
///
/// Rafter count is `rafter_bay_count(run) + 1`, gable rafters included.
pub fn rafter_bay_spacing(run: f64) -> f64 {
    run / rafter_bay_count(run) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const PITCHES: [f64; 4] = [15.0, 25.0, 35.0, 45.0];
    const SPANS: [f64; 8] = [2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 15.0, 20.0];

    #[test]
    fn test_ridge_height_formula() {
        for width in [2.0, 3.0, 4.5] {
            for pitch in PITCHES {
                let expected = (width / 2.0) * pitch.to_radians().tan();
                assert_relative_eq!(ridge_height(width, pitch), expected, epsilon = 1e-12);
            }
        }
        assert_eq!(ridge_height(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_ridge_height_at_45() {
        assert_abs_diff_eq!(ridge_height(4.0, 45.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rafter_length_scenario() {
        // (3/2 + 0.5) / cos(25°)
        let expected = 2.0 / 25f64.to_radians().cos();
        assert_relative_eq!(rafter_length(3.0, 25.0, 0.5), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(rafter_length(3.0, 25.0, 0.5), 2.2068, epsilon = 1e-3);
    }

    #[test]
    fn test_rafter_length_increases_with_overhang() {
        for pitch in PITCHES {
            let mut previous = rafter_length(3.0, pitch, 0.0);
            for step in 1..=10 {
                let current = rafter_length(3.0, pitch, step as f64 * 0.1);
                assert!(current > previous);
                previous = current;
            }
        }
    }

    #[test]
    fn test_base_bird_mouth_plumb_is_fixed() {
        for pitch in PITCHES {
            let bm = bird_mouth_at_base_purlin(pitch);
            assert_eq!(bm.plumb_height, 0.03);
            assert_relative_eq!(bm.seat_depth, 0.03 / pitch.to_radians().tan(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_base_seat_shrinks_with_pitch() {
        let seats: Vec<f64> = PITCHES
            .iter()
            .map(|&p| bird_mouth_at_base_purlin(p).seat_depth)
            .collect();
        assert!(seats.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_ridge_bird_mouth_seat_is_fixed() {
        for pitch in PITCHES {
            let bm = bird_mouth_at_ridge_purlin(pitch);
            assert_eq!(bm.seat_depth, 0.05);
            assert_eq!(bm.plumb_height, BIRD_MOUTH_PLUMB_HEIGHT);
        }
    }

    #[test]
    fn test_rafter_y_offset() {
        // 0.15 / (2 * cos 45°) - 0.03
        let expected = 0.15 / (2.0 * std::f64::consts::FRAC_1_SQRT_2) - 0.03;
        assert_relative_eq!(rafter_y_offset(45.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pillar_bays_never_exceed_limit() {
        for span in SPANS {
            let rows = pillar_row_count(span);
            assert!(rows >= 2);
            let bays = (rows - 1) as f64;

            let inner_span = span - 2.0 * PILLAR_SIZE;
            assert!(inner_span / bays <= MAX_UNSUPPORTED_SPAN + 1e-9, "span {}", span);

            // Clear distance between neighboring pillar faces
            let clear = (span - PILLAR_SIZE) / bays - PILLAR_SIZE;
            assert!(clear <= MAX_UNSUPPORTED_SPAN + 1e-9, "span {}", span);
        }
    }

    #[test]
    fn test_pillar_rows_monotonic() {
        let counts: Vec<usize> = SPANS.iter().map(|&s| pillar_row_count(s)).collect();
        assert!(counts.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_pillar_rows_scenario() {
        // 4 m building: 3.7 m inner span -> two bays -> three rows
        assert_eq!(pillar_row_count(4.0), 3);
        assert_eq!(pillar_row_count(2.0), 2);
    }

    #[test]
    fn test_center_pillar_threshold() {
        assert!(!needs_center_pillar(3.0));
        assert!(!needs_center_pillar(3.3));
        assert!(needs_center_pillar(3.5));
    }

    #[test]
    fn test_rafter_spacing_within_limit() {
        for span in SPANS {
            let run = span + 0.6 - RAFTER_WIDTH;
            let spacing = rafter_bay_spacing(run);
            assert!(spacing <= MAX_RAFTER_SPACING + 1e-12, "run {}", run);
            let bays = rafter_bay_count(run);
            assert_relative_eq!(spacing * bays as f64, run, epsilon = 1e-9);
            // Minimal: one bay fewer would exceed the limit
            if bays > 1 {
                assert!(run / (bays - 1) as f64 > MAX_RAFTER_SPACING);
            }
        }
    }

    #[test]
    fn test_rafter_bays_scenario() {
        // ceil((4 + 0.6 - 0.075) / 0.9) = ceil(5.03) = 6
        assert_eq!(rafter_bay_count(4.0 + 0.6 - 0.075), 6);
    }

    #[test]
    fn test_knee_brace_leg() {
        let leg = knee_brace_leg();
        assert_relative_eq!((2.0 * leg * leg).sqrt(), KNEE_BRACE_LENGTH, epsilon = 1e-12);
    }
}
