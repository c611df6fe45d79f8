use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of distinct bend orientations a corner can take.
pub const ROTATE_STATES: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Endpoint,
    Corner,
    Straight,
}

impl SegmentKind {
    /// Corners are the only segments that turn the chain.
    pub fn bends(self) -> bool {
        self == SegmentKind::Corner
    }
}

#[derive(Debug, Error)]
#[error("Invalid segment kind string: '{0}'")]
pub struct ParseSegmentKindError(pub String);

impl FromStr for SegmentKind {
    type Err = ParseSegmentKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "e" | "end" | "endpoint" => Ok(Self::Endpoint),
            "c" | "corner" => Ok(Self::Corner),
            "s" | "straight" => Ok(Self::Straight),
            _ => Err(ParseSegmentKindError(s.to_string())),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Endpoint => "Endpoint",
                Self::Corner => "Corner",
                Self::Straight => "Straight",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub index: usize,      // Position along the chain
    pub kind: SegmentKind, // Topological role of this link
    pub blue: bool,        // Color flag, alternates along the chain
    pub rotate: u8,        // Bend orientation in 0..4, only read for corners
    pub prior_rotate: u8,  // Orientation to animate from; never read by the search
}

impl Segment {
    pub(crate) fn new(index: usize, kind: SegmentKind, blue: bool) -> Self {
        Self {
            index,
            kind,
            blue,
            rotate: 0,
            prior_rotate: 0,
        }
    }
}

/// Wraps an orientation offset into `0..ROTATE_STATES`.
pub fn wrap_rotate(value: i32) -> u8 {
    value.rem_euclid(ROTATE_STATES as i32) as u8
}
