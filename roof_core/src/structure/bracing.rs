//! Corner knee braces.
//!
//! Only the first and last pillar rows are braced. Each brace is a 1 m
//! diagonal at 45 degrees (shorter on small footprints) whose free end points
//! toward the building interior.
//!
//! ```text
//!   purlin ════╤══════        tie beam ══╤══
//!             /│                         │\
//!            / │ pillar                  │ \
//! ```

use crate::geometry::{knee_brace_leg, KNEE_BRACE_SIZE, TIE_BEAM_HEIGHT};

use super::members::{BraceKind, KneeBrace, Point3D};
use super::Levels;

fn brace(kind: BraceKind, start: Point3D, end: Point3D) -> KneeBrace {
    KneeBrace {
        kind,
        start,
        end,
        size: KNEE_BRACE_SIZE,
    }
}

/// Braces for the two corner rows.
///
/// `side_z` is the unsigned Z of the pillar/purlin lines. With center pillars,
/// each corner row also gets two braces from the center pillar to the tie
/// beam and, when the pillar stands tall enough above the tie beam, one up to
/// the ridge purlin.
///
/// On small footprints the leg is shortened so no brace reaches past the
/// building's center line in X or Z; the braces stay at 45 degrees.
pub fn corner_braces(row_xs: &[f64], side_z: f64, levels: &Levels, center_pillars: bool) -> Vec<KneeBrace> {
    let full_leg = knee_brace_leg();
    let y = levels.base_purlin_center;

    let corner_rows: Vec<f64> = match row_xs {
        [] => Vec::new(),
        [only] => vec![*only],
        [first, .., last] => vec![*first, *last],
    };

    let mut braces = Vec::with_capacity(corner_rows.len() * 9);
    for x in corner_rows {
        let leg = full_leg.min(side_z).min(x.abs());
        let inward_x = x - x.signum() * leg;

        for sign in [-1.0, 1.0] {
            let z = sign * side_z;
            let inward_z = z - sign * leg;
            let on_pillar = Point3D::new(x, y - leg, z);
            let on_purlin = Point3D::new(inward_x, y, z);
            let on_tie_beam = Point3D::new(x, y, inward_z);

            braces.push(brace(BraceKind::PillarToTieBeam, on_pillar, on_tie_beam));
            braces.push(brace(BraceKind::PillarToPurlin, on_pillar, on_purlin));
            braces.push(brace(BraceKind::PurlinToTieBeam, on_purlin, on_tie_beam));
        }

        if center_pillars {
            for sign in [-1.0, 1.0] {
                braces.push(brace(
                    BraceKind::PillarToTieBeam,
                    Point3D::new(x, y - leg, 0.0),
                    Point3D::new(x, y, sign * leg),
                ));
            }

            let clear_above_tie = levels.ridge_purlin_bottom() - (y + TIE_BEAM_HEIGHT / 2.0);
            if clear_above_tie >= leg {
                let ridge_y = levels.ridge_purlin_center;
                braces.push(brace(
                    BraceKind::PillarToRidgePurlin,
                    Point3D::new(x, ridge_y - leg, 0.0),
                    Point3D::new(inward_x, ridge_y, 0.0),
                ));
            }
        }
    }
    braces
}
