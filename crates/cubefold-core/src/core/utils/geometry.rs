use nalgebra::{Point3, Rotation3, Unit, Vector3};
use serde::Serialize;
use std::fmt;

/// Integer lattice coordinate of a placed unit cube.
pub type LatticeCell = [i32; 3];

/// Angle between neighbouring bend orientations, in degrees.
pub const QUARTER_TURN_DEGREES: f64 = 90.0;

pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_degrees.to_radians())
}

/// Local rotation applied at a corner: a fixed quarter turn about +Z followed
/// by `rotate` quarter turns about +X.
pub fn bend_rotation(rotate: u8) -> Rotation3<f64> {
    rotation_from_axis_angle(&Vector3::z(), QUARTER_TURN_DEGREES)
        * rotation_from_axis_angle(&Vector3::x(), QUARTER_TURN_DEGREES * f64::from(rotate))
}

/// Direction a segment with `orientation` advances the chain along.
#[inline]
pub fn forward(orientation: &Rotation3<f64>) -> Vector3<f64> {
    orientation * Vector3::y()
}

/// Snaps a position to the nearest lattice cell.
#[inline]
pub fn lattice_cell(position: &Point3<f64>) -> LatticeCell {
    [
        position.x.round() as i32,
        position.y.round() as i32,
        position.z.round() as i32,
    ]
}

/// Per-axis bounding-box size (`max - min`) of a set of lattice cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Extents {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Extents {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn cube(side: i32) -> Self {
        Self::new(side, side, side)
    }

    /// Largest of the three extents.
    pub fn spread(&self) -> i32 {
        self.x.max(self.y).max(self.z)
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Running per-axis minimum and maximum over lattice cells.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    min: LatticeCell,
    max: LatticeCell,
}

impl BoundingBox {
    pub fn new(first: LatticeCell) -> Self {
        Self {
            min: first,
            max: first,
        }
    }

    #[inline]
    pub fn include(&mut self, cell: LatticeCell) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(cell[axis]);
            self.max[axis] = self.max[axis].max(cell[axis]);
        }
    }

    pub fn extents(&self) -> Extents {
        Extents::new(
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_of(v: Vector3<f64>) -> LatticeCell {
        lattice_cell(&Point3::from(v))
    }

    #[test]
    fn identity_orientation_advances_along_y() {
        assert_eq!(cell_of(forward(&Rotation3::identity())), [0, 1, 0]);
    }

    #[test]
    fn bend_zero_is_a_quarter_turn_about_z() {
        assert_eq!(cell_of(forward(&bend_rotation(0))), [-1, 0, 0]);
    }

    #[test]
    fn bend_orientations_give_four_distinct_directions() {
        let mut directions: Vec<_> = (0..4).map(|r| cell_of(forward(&bend_rotation(r)))).collect();
        directions.sort();
        directions.dedup();
        assert_eq!(directions.len(), 4);
        assert!(directions.iter().all(|d| d[1] == 0));
    }

    #[test]
    fn bend_direction_is_perpendicular_to_incoming_axis() {
        for r in 0..4 {
            let d = forward(&bend_rotation(r));
            assert!(d.dot(&Vector3::y()).abs() < 1e-9);
            assert!((d.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn four_full_bends_return_to_identity() {
        let quarter = rotation_from_axis_angle(&Vector3::x(), QUARTER_TURN_DEGREES);
        let full = quarter * quarter * quarter * quarter;
        assert!((full.matrix() - Rotation3::<f64>::identity().matrix()).norm() < 1e-9);
    }

    #[test]
    fn lattice_cell_rounds_away_float_noise() {
        let p = Point3::new(0.999_999_9, -2.000_000_1, 1e-12);
        assert_eq!(lattice_cell(&p), [1, -2, 0]);
    }

    #[test]
    fn bounding_box_tracks_extents() {
        let mut bbox = BoundingBox::new([0, 0, 0]);
        bbox.include([2, -1, 0]);
        bbox.include([-1, 3, 0]);
        assert_eq!(bbox.extents(), Extents::new(3, 4, 0));
        assert_eq!(bbox.extents().spread(), 4);
    }

    #[test]
    fn extents_display() {
        assert_eq!(Extents::cube(3).to_string(), "(3, 3, 3)");
    }
}
