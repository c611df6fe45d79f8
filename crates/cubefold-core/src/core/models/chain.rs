use super::configuration::Configuration;
use super::segment::{Segment, SegmentKind, wrap_rotate};
use thiserror::Error;

/// Number of segments in the physical puzzle.
pub const CANONICAL_LENGTH: usize = 27;

/// Chain indices of the corner links in the physical puzzle.
pub const CANONICAL_CORNER_INDICES: [usize; 16] =
    [2, 3, 4, 6, 7, 9, 10, 11, 13, 15, 16, 17, 18, 20, 22, 24];

/// Upper bound on corners so that `4^corners` still fits in a `u64`.
pub const MAX_CORNERS: usize = 31;

/// Longest chain accepted; the validator's lattice grows with the cube of the length.
pub const MAX_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ChainError {
    #[error("A chain needs at least 2 segments, got {0}")]
    TooShort(usize),

    #[error("Segment {index} must be an endpoint, found {found}")]
    MissingEndpoint { index: usize, found: SegmentKind },

    #[error("Interior segment {0} cannot be an endpoint")]
    InteriorEndpoint(usize),

    #[error("Corner index {index} is outside the interior of a {length}-segment chain")]
    CornerOutOfRange { index: usize, length: usize },

    #[error("Chain has {length} segments; at most {max} are supported")]
    TooLong { length: usize, max: usize },

    #[error("Chain has {count} corners; at most {max} are supported")]
    TooManyCorners { count: usize, max: usize },

    #[error("Configuration covers {got} segments but the chain has {expected}")]
    ConfigurationLength { expected: usize, got: usize },
}

/// Declarative description of one segment, as read from a chain file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpec {
    pub kind: SegmentKind,
    pub blue: Option<bool>, // `None` keeps the alternating default
}

/// The fixed, ordered topology of a folding chain.
///
/// A chain is built once and never mutated; posing it for a configuration
/// produces a new chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    segments: Vec<Segment>,
    corner_count: usize,
}

impl Chain {
    /// The 27-segment puzzle in its resting pose.
    pub fn canonical() -> Self {
        let mut kinds = vec![SegmentKind::Straight; CANONICAL_LENGTH];
        kinds[0] = SegmentKind::Endpoint;
        kinds[CANONICAL_LENGTH - 1] = SegmentKind::Endpoint;
        for &index in CANONICAL_CORNER_INDICES.iter() {
            kinds[index] = SegmentKind::Corner;
        }
        Self::assemble(kinds.into_iter().map(|kind| (kind, None))).with_resting_pose()
    }

    /// Builds a chain of `length` segments whose interior corners sit at `corners`.
    pub fn with_corners(length: usize, corners: &[usize]) -> Result<Self, ChainError> {
        check_length_bounds(length)?;
        let mut kinds = vec![SegmentKind::Straight; length];
        kinds[0] = SegmentKind::Endpoint;
        kinds[length - 1] = SegmentKind::Endpoint;
        for &index in corners {
            if index == 0 || index >= length - 1 {
                return Err(ChainError::CornerOutOfRange { index, length });
            }
            kinds[index] = SegmentKind::Corner;
        }
        Self::from_kinds(&kinds)
    }

    /// Builds a chain from per-segment kinds with alternating colors.
    pub fn from_kinds(kinds: &[SegmentKind]) -> Result<Self, ChainError> {
        validate_kinds(kinds.iter().copied())?;
        Ok(Self::assemble(kinds.iter().map(|&kind| (kind, None))))
    }

    /// Builds a chain from full segment descriptions.
    pub fn from_specs(specs: &[SegmentSpec]) -> Result<Self, ChainError> {
        validate_kinds(specs.iter().map(|s| s.kind))?;
        Ok(Self::assemble(specs.iter().map(|s| (s.kind, s.blue))))
    }

    fn assemble(specs: impl Iterator<Item = (SegmentKind, Option<bool>)>) -> Self {
        let segments: Vec<Segment> = specs
            .enumerate()
            .map(|(index, (kind, blue))| Segment::new(index, kind, blue.unwrap_or(index % 2 == 0)))
            .collect();
        let corner_count = segments.iter().filter(|s| s.kind.bends()).count();
        Self {
            segments,
            corner_count,
        }
    }

    /// Assigns corners the orientations `1, 2, 3, 0, 1, ...` in corner order,
    /// each with a prior orientation one step behind.
    pub fn with_resting_pose(mut self) -> Self {
        let mut rotate = 1;
        for segment in self.segments.iter_mut().filter(|s| s.kind.bends()) {
            segment.rotate = wrap_rotate(rotate);
            segment.prior_rotate = wrap_rotate(rotate - 1);
            rotate += 1;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn corner_count(&self) -> usize {
        self.corner_count
    }

    pub fn corner_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments
            .iter()
            .filter(|s| s.kind.bends())
            .map(|s| s.index)
    }

    /// Size of the configuration space, `4^corner_count`.
    pub fn max_step(&self) -> u64 {
        1u64 << (2 * self.corner_count)
    }

    /// Current orientation of every segment.
    pub fn pose(&self) -> Vec<u8> {
        self.segments.iter().map(|s| s.rotate).collect()
    }

    /// A copy of this chain with each segment's orientation taken from `config`.
    pub fn posed(&self, config: &Configuration) -> Result<Self, ChainError> {
        self.check_length(config)?;
        let mut chain = self.clone();
        for segment in chain.segments.iter_mut() {
            segment.rotate = config.rotate(segment.index);
        }
        Ok(chain)
    }

    /// A copy posed at `to` whose prior orientations come from `from`,
    /// ready for a renderer to interpolate between the two shapes.
    pub fn transition(&self, from: &Configuration, to: &Configuration) -> Result<Self, ChainError> {
        self.check_length(from)?;
        let mut chain = self.posed(to)?;
        for segment in chain.segments.iter_mut() {
            segment.prior_rotate = from.rotate(segment.index);
        }
        Ok(chain)
    }

    fn check_length(&self, config: &Configuration) -> Result<(), ChainError> {
        if config.len() != self.len() {
            return Err(ChainError::ConfigurationLength {
                expected: self.len(),
                got: config.len(),
            });
        }
        Ok(())
    }
}

fn check_length_bounds(length: usize) -> Result<(), ChainError> {
    if length < 2 {
        return Err(ChainError::TooShort(length));
    }
    if length > MAX_LENGTH {
        return Err(ChainError::TooLong {
            length,
            max: MAX_LENGTH,
        });
    }
    Ok(())
}

fn validate_kinds(kinds: impl ExactSizeIterator<Item = SegmentKind>) -> Result<(), ChainError> {
    let length = kinds.len();
    check_length_bounds(length)?;
    let mut corners = 0;
    for (index, kind) in kinds.enumerate() {
        let is_end = index == 0 || index == length - 1;
        match (is_end, kind) {
            (true, SegmentKind::Endpoint) => {}
            (true, found) => return Err(ChainError::MissingEndpoint { index, found }),
            (false, SegmentKind::Endpoint) => return Err(ChainError::InteriorEndpoint(index)),
            (false, SegmentKind::Corner) => corners += 1,
            (false, SegmentKind::Straight) => {}
        }
    }
    if corners > MAX_CORNERS {
        return Err(ChainError::TooManyCorners {
            count: corners,
            max: MAX_CORNERS,
        });
    }
    Ok(())
}
