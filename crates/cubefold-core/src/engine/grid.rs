use crate::core::models::chain::Chain;
use crate::core::models::placement::Placement;
use crate::core::utils::geometry::{BoundingBox, Extents, LatticeCell};
use thiserror::Error;

/// Why a placement was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Segment {segment} re-enters occupied cell {cell:?}")]
    SelfIntersection { segment: usize, cell: LatticeCell },
    #[error("Segment {segment} lies outside the occupancy lattice at {cell:?}")]
    OutOfBounds { segment: usize, cell: LatticeCell },
}

impl Rejection {
    pub fn segment(&self) -> usize {
        match *self {
            Self::SelfIntersection { segment, .. } | Self::OutOfBounds { segment, .. } => segment,
        }
    }

    pub fn is_self_intersection(&self) -> bool {
        matches!(self, Self::SelfIntersection { .. })
    }
}

/// Cubic occupancy lattice centred on the chain origin.
///
/// Cells are stamped with a generation counter, so clearing between
/// candidates only bumps the counter.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    side: usize,
    offset: i32,
    stamps: Vec<u32>,
    generation: u32,
}

impl OccupancyGrid {
    /// A lattice large enough for any unit-step walk of `chain`.
    pub fn for_chain(chain: &Chain) -> Self {
        Self::with_reach(chain.len())
    }

    /// A lattice covering every cell within `reach` steps of the origin on each axis.
    pub fn with_reach(reach: usize) -> Self {
        let reach = reach.max(1);
        let side = 2 * reach;
        Self {
            side,
            offset: reach as i32,
            stamps: vec![0; side * side * side],
            generation: 1,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    #[inline]
    fn index_of(&self, cell: LatticeCell) -> Option<usize> {
        let mut index = 0usize;
        for coord in cell {
            let shifted = coord.checked_add(self.offset)?;
            if shifted < 0 || shifted as usize >= self.side {
                return None;
            }
            index = index * self.side + shifted as usize;
        }
        Some(index)
    }

    pub fn contains(&self, cell: LatticeCell) -> bool {
        self.index_of(cell).is_some()
    }

    pub fn is_marked(&self, cell: LatticeCell) -> bool {
        self.index_of(cell)
            .is_some_and(|index| self.stamps[index] == self.generation)
    }

    /// Marks `cell`, returning `Some(true)` if it was free, `Some(false)` if it
    /// was already marked, and `None` when it lies outside the lattice.
    #[inline]
    pub fn mark(&mut self, cell: LatticeCell) -> Option<bool> {
        let index = self.index_of(cell)?;
        let stamp = &mut self.stamps[index];
        if *stamp == self.generation {
            return Some(false);
        }
        *stamp = self.generation;
        Some(true)
    }

    pub fn marked_count(&self) -> usize {
        self.stamps
            .iter()
            .filter(|&&stamp| stamp == self.generation)
            .count()
    }

    #[cfg(test)]
    fn set_generation(&mut self, generation: u32) {
        self.generation = generation;
    }
}

/// Accepts or rejects placements, scoring accepted ones by their extents.
///
/// Each validator owns its grid; concurrent searches build one per worker.
#[derive(Debug, Clone)]
pub struct Validator {
    grid: OccupancyGrid,
}

impl Validator {
    pub fn for_chain(chain: &Chain) -> Self {
        Self {
            grid: OccupancyGrid::for_chain(chain),
        }
    }

    pub fn with_grid(grid: OccupancyGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Walks the placement in chain order and stops at the first segment
    /// that lands on an occupied cell.
    #[inline]
    pub fn validate(&mut self, placement: &Placement) -> Result<Extents, Rejection> {
        self.grid.clear();
        let mut cells = placement.cells().enumerate();
        let Some((_, first)) = cells.next() else {
            return Ok(Extents::default());
        };
        self.occupy(0, first)?;
        let mut bounds = BoundingBox::new(first);
        for (segment, cell) in cells {
            self.occupy(segment, cell)?;
            bounds.include(cell);
        }
        Ok(bounds.extents())
    }

    #[inline]
    fn occupy(&mut self, segment: usize, cell: LatticeCell) -> Result<(), Rejection> {
        match self.grid.mark(cell) {
            Some(true) => Ok(()),
            Some(false) => Err(Rejection::SelfIntersection { segment, cell }),
            None => Err(Rejection::OutOfBounds { segment, cell }),
        }
    }
}
