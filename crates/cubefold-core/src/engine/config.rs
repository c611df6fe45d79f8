use super::enumerator::DecodingStrategy;
use crate::core::utils::geometry::Extents;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CHUNK_SIZE: u64 = 1 << 20;
pub const DEFAULT_COMPACT_TARGET: Extents = Extents::cube(3);

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid step range {start}..{end}: {reason}")]
    InvalidRange {
        start: u64,
        end: u64,
        reason: &'static str,
    },

    #[error("Chunk size must be at least 1")]
    ZeroChunkSize,

    #[error("Compact target {0} has a negative extent")]
    NegativeTarget(Extents),
}

/// Which of several equally good candidates is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the earliest step; later candidates must be strictly better.
    FirstWins,
    /// Let every equally good later step replace the current one.
    LastWins,
}

#[derive(Debug, Error)]
#[error("Unknown tie-break '{0}'. Expected 'first-wins' or 'last-wins'.")]
pub struct ParseTieBreakError(pub String);

impl FromStr for TieBreak {
    type Err = ParseTieBreakError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-wins" | "first" => Ok(Self::FirstWins),
            "last-wins" | "last" => Ok(Self::LastWins),
            _ => Err(ParseTieBreakError(s.to_string())),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::FirstWins => "first-wins",
                Self::LastWins => "last-wins",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub decoding: DecodingStrategy,
    /// Sub-range of steps to search; the whole space when `None`.
    pub step_range: Option<Range<u64>>,
    pub compact_target: Extents,
    pub widest_tie_break: TieBreak,
    pub compact_tie_break: TieBreak,
    /// Stop at the first configuration matching the compact target.
    pub stop_on_compact: bool,
    /// Steps handed to each parallel worker at a time.
    pub chunk_size: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            decoding: DecodingStrategy::default(),
            step_range: None,
            compact_target: DEFAULT_COMPACT_TARGET,
            widest_tie_break: TieBreak::FirstWins,
            compact_tie_break: TieBreak::LastWins,
            stop_on_compact: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SearchConfig {
    /// The concrete step range this search covers for a space of `max_step` steps.
    pub fn resolve_range(&self, max_step: u64) -> Result<Range<u64>, ConfigError> {
        let Some(range) = self.step_range.clone() else {
            return Ok(0..max_step);
        };
        if range.start >= range.end {
            return Err(ConfigError::InvalidRange {
                start: range.start,
                end: range.end,
                reason: "range is empty",
            });
        }
        if range.end > max_step {
            return Err(ConfigError::InvalidRange {
                start: range.start,
                end: range.end,
                reason: "range extends past the configuration space",
            });
        }
        Ok(range)
    }
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    decoding: Option<DecodingStrategy>,
    step_range: Option<Range<u64>>,
    compact_target: Option<Extents>,
    widest_tie_break: Option<TieBreak>,
    compact_tie_break: Option<TieBreak>,
    stop_on_compact: Option<bool>,
    chunk_size: Option<u64>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decoding(mut self, strategy: DecodingStrategy) -> Self {
        self.decoding = Some(strategy);
        self
    }
    pub fn step_range(mut self, range: Range<u64>) -> Self {
        self.step_range = Some(range);
        self
    }
    pub fn compact_target(mut self, target: Extents) -> Self {
        self.compact_target = Some(target);
        self
    }
    pub fn widest_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.widest_tie_break = Some(tie_break);
        self
    }
    pub fn compact_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.compact_tie_break = Some(tie_break);
        self
    }
    pub fn stop_on_compact(mut self, stop: bool) -> Self {
        self.stop_on_compact = Some(stop);
        self
    }
    pub fn chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = Some(size);
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        let defaults = SearchConfig::default();

        if let Some(range) = &self.step_range {
            if range.start >= range.end {
                return Err(ConfigError::InvalidRange {
                    start: range.start,
                    end: range.end,
                    reason: "range is empty",
                });
            }
        }

        let chunk_size = self.chunk_size.unwrap_or(defaults.chunk_size);
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        let compact_target = self.compact_target.unwrap_or(defaults.compact_target);
        if compact_target.x < 0 || compact_target.y < 0 || compact_target.z < 0 {
            return Err(ConfigError::NegativeTarget(compact_target));
        }

        Ok(SearchConfig {
            decoding: self.decoding.unwrap_or(defaults.decoding),
            step_range: self.step_range,
            compact_target,
            widest_tie_break: self.widest_tie_break.unwrap_or(defaults.widest_tie_break),
            compact_tie_break: self
                .compact_tie_break
                .unwrap_or(defaults.compact_tie_break),
            stop_on_compact: self.stop_on_compact.unwrap_or(defaults.stop_on_compact),
            chunk_size,
        })
    }
}
