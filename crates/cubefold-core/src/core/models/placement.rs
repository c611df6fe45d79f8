use crate::core::utils::geometry::{LatticeCell, lattice_cell};
use nalgebra::{Point3, Rotation3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSegment {
    pub position: Point3<f64>,       // Centre of the unit cube
    pub orientation: Rotation3<f64>, // Accumulated orientation after this segment's bend
}

impl PlacedSegment {
    pub fn cell(&self) -> LatticeCell {
        lattice_cell(&self.position)
    }
}

/// Lattice positions and orientations of every segment of a chain, in chain order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placement {
    segments: Vec<PlacedSegment>,
}

impl Placement {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }

    pub(crate) fn push(&mut self, segment: PlacedSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[PlacedSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = LatticeCell> + '_ {
        self.segments.iter().map(PlacedSegment::cell)
    }
}

impl FromIterator<PlacedSegment> for Placement {
    fn from_iter<I: IntoIterator<Item = PlacedSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
