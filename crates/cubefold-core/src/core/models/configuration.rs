use super::segment::ROTATE_STATES;
use std::fmt;

/// One complete assignment of bend orientations, one per chain segment.
///
/// A `Configuration` is an immutable value; the enumerator hands out a fresh
/// one per step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    step: u64,
    rotates: Box<[u8]>,
}

impl Configuration {
    /// Builds a configuration from explicit per-segment orientations.
    /// Values are reduced into `0..4`.
    pub fn new(step: u64, rotates: impl Into<Box<[u8]>>) -> Self {
        let mut rotates = rotates.into();
        for r in rotates.iter_mut() {
            *r %= ROTATE_STATES;
        }
        Self { step, rotates }
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn rotates(&self) -> &[u8] {
        &self.rotates
    }

    /// Orientation for segment `index`, or 0 past the end of the assignment.
    #[inline]
    pub fn rotate(&self, index: usize) -> u8 {
        self.rotates.get(index).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rotates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotates.is_empty()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [", self.step)?;
        for r in self.rotates.iter() {
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}
