//! Timber member types.
//!
//! Coordinate frame: X runs along the ridge, Y is up, Z runs across the span.
//! The origin is the footprint center at ground level.

use serde::{Deserialize, Serialize};

use crate::geometry::{BirdMouth, PILLAR_SIZE};

/// A point in model space (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Vertical square post standing on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Bottom center
    pub base: Point3D,
    pub height: f64,
}

impl Pillar {
    /// Cross-section side (fixed for every pillar)
    pub fn size(&self) -> f64 {
        PILLAR_SIZE
    }

    /// Top center
    pub fn top(&self) -> Point3D {
        Point3D::new(self.base.x, self.base.y + self.height, self.base.z)
    }

    /// Pillars on the ridge line carry the ridge purlin directly
    pub fn is_ridge_pillar(&self) -> bool {
        self.base.z == 0.0
    }
}

/// Horizontal beam running along X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Purlin {
    /// Centerline start (negative X end)
    pub start: Point3D,
    /// Centerline end (positive X end)
    pub end: Point3D,
    pub width: f64,
    pub height: f64,
}

impl Purlin {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Y of the top face
    pub fn top(&self) -> f64 {
        self.start.y + self.height / 2.0
    }

    /// Y of the bottom face
    pub fn bottom(&self) -> f64 {
        self.start.y - self.height / 2.0
    }
}

/// Horizontal cross member joining the two base purlins at a pillar row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieBeam {
    pub start: Point3D,
    pub end: Point3D,
    pub width: f64,
    pub height: f64,
}

impl TieBeam {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Which side of the ridge a rafter falls toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slope {
    /// Eave at negative Z
    Left,
    /// Eave at positive Z
    Right,
}

impl Slope {
    pub const BOTH: [Slope; 2] = [Slope::Left, Slope::Right];

    /// Sign of the eave's Z coordinate
    pub fn sign(self) -> f64 {
        match self {
            Slope::Left => -1.0,
            Slope::Right => 1.0,
        }
    }
}

/// Sloped member from eave to ridge, notched over both purlins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rafter {
    pub slope: Slope,
    /// Centerline at the eave tip
    pub eave_end: Point3D,
    /// Centerline at the ridge (Z = 0)
    pub ridge_end: Point3D,
    pub bird_mouth_base: BirdMouth,
    pub bird_mouth_ridge: BirdMouth,
    /// Slope distance between the two ends
    pub length: f64,
    pub width: f64,
    pub depth: f64,
}

impl Rafter {
    /// Centerline height above a given Z on this rafter's side.
    ///
    /// Linear between the eave and ridge ends; callers pass the unsigned
    /// distance from the ridge.
    pub fn centerline_height_at(&self, distance_from_ridge: f64) -> f64 {
        let run = self.eave_end.z.abs();
        let drop = self.ridge_end.y - self.eave_end.y;
        self.ridge_end.y - drop * (distance_from_ridge / run)
    }
}

/// Trapezoidal block beside a rafter, straddling the ridge purlin.
///
/// Its sloped ends lie in the rafter's top surface plane, so the section
/// widens from `z_half_top` at `y_top` to `z_half_bottom` at `y_bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RidgeTie {
    /// Center of the board along the ridge
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub z_half_top: f64,
    pub z_half_bottom: f64,
    /// Board thickness along X
    pub thickness: f64,
}

impl RidgeTie {
    /// Area of the trapezoidal face
    pub fn face_area(&self) -> f64 {
        (self.z_half_top + self.z_half_bottom) * (self.y_top - self.y_bottom)
    }

    /// Slope length of one sloped end
    pub fn side_length(&self) -> f64 {
        let dz = self.z_half_bottom - self.z_half_top;
        let dy = self.y_top - self.y_bottom;
        (dz * dz + dy * dy).sqrt()
    }
}

/// Junction a knee brace stiffens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BraceKind {
    PillarToTieBeam,
    PillarToPurlin,
    PurlinToTieBeam,
    /// Center pillar up to the ridge purlin
    PillarToRidgePurlin,
}

/// Short 45 degree diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KneeBrace {
    pub kind: BraceKind,
    pub start: Point3D,
    pub end: Point3D,
    pub size: f64,
}

impl KneeBrace {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_pillar_top() {
        let pillar = Pillar {
            base: Point3D::new(1.0, 0.0, -1.0),
            height: 2.4,
        };
        assert_eq!(pillar.top(), Point3D::new(1.0, 2.4, -1.0));
        assert!(!pillar.is_ridge_pillar());
    }

    #[test]
    fn test_ridge_tie_face_area() {
        let tie = RidgeTie {
            x: 0.0,
            y_top: 1.0,
            y_bottom: 0.8,
            z_half_top: 0.1,
            z_half_bottom: 0.3,
            thickness: 0.05,
        };
        // Average width 0.4, height 0.2
        assert!((tie.face_area() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_slope_serialization() {
        let json = serde_json::to_string(&Slope::Left).unwrap();
        assert_eq!(json, "\"Left\"");
    }
}
