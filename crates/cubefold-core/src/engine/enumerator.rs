use crate::core::models::chain::Chain;
use crate::core::models::configuration::Configuration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

const ROTATE_BITS: u32 = 2;
const ROTATE_MASK: u64 = 0b11;

/// How a step integer is unpacked into per-segment orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodingStrategy {
    /// Two bits per chain index, in chain order. Corners past the significant
    /// bits of the step never leave orientation 0.
    #[default]
    PerChainIndex,
    /// Two bits per corner, packed in corner order; covers every corner.
    PerCorner,
}

impl DecodingStrategy {
    /// Writes the orientation of every segment of `chain` for `step` into `out`.
    ///
    /// `out` must have one slot per segment.
    #[inline]
    pub fn decode_into(self, chain: &Chain, step: u64, out: &mut [u8]) {
        debug_assert_eq!(out.len(), chain.len());
        let mut working = step;
        match self {
            DecodingStrategy::PerChainIndex => {
                for rotate in out.iter_mut() {
                    *rotate = (working & ROTATE_MASK) as u8;
                    working >>= ROTATE_BITS;
                }
            }
            DecodingStrategy::PerCorner => {
                for (segment, rotate) in chain.segments().iter().zip(out.iter_mut()) {
                    if segment.kind.bends() {
                        *rotate = (working & ROTATE_MASK) as u8;
                        working >>= ROTATE_BITS;
                    } else {
                        *rotate = 0;
                    }
                }
            }
        }
    }

    pub fn decode(self, chain: &Chain, step: u64) -> Configuration {
        let mut rotates = vec![0; chain.len()];
        self.decode_into(chain, step, &mut rotates);
        Configuration::new(step, rotates)
    }

    /// Inverse of [`decode`](Self::decode) for the orientations this strategy
    /// reads. Returns `None` when `rotates` has no step in `0..chain.max_step()`.
    pub fn encode(self, chain: &Chain, rotates: &[u8]) -> Option<u64> {
        let mut step = 0u64;
        let mut shift = 0u32;
        for (segment, &rotate) in chain.segments().iter().zip(rotates) {
            let consumes = match self {
                DecodingStrategy::PerChainIndex => true,
                DecodingStrategy::PerCorner => segment.kind.bends(),
            };
            if !consumes {
                continue;
            }
            let value = u64::from(rotate) & ROTATE_MASK;
            if value != 0 {
                if shift >= u64::BITS {
                    return None;
                }
                step |= value << shift;
            }
            shift += ROTATE_BITS;
        }
        (step < chain.max_step()).then_some(step)
    }
}

#[derive(Debug, Error)]
#[error("Unknown decoding strategy '{0}'. Expected 'per-chain-index' or 'per-corner'.")]
pub struct ParseDecodingStrategyError(pub String);

impl FromStr for DecodingStrategy {
    type Err = ParseDecodingStrategyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-chain-index" | "per-index" | "index" => Ok(Self::PerChainIndex),
            "per-corner" | "corner" | "packed" => Ok(Self::PerCorner),
            _ => Err(ParseDecodingStrategyError(s.to_string())),
        }
    }
}

impl fmt::Display for DecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::PerChainIndex => "per-chain-index",
                Self::PerCorner => "per-corner",
            }
        )
    }
}

/// Walks steps in increasing order, decoding each into a configuration.
#[derive(Debug, Clone)]
pub struct Enumerator<'a> {
    chain: &'a Chain,
    strategy: DecodingStrategy,
    step: u64,
    end: u64,
}

impl<'a> Enumerator<'a> {
    /// Enumerates the full space `0..4^corner_count`.
    pub fn new(chain: &'a Chain, strategy: DecodingStrategy) -> Self {
        Self::with_range(chain, strategy, 0..chain.max_step())
    }

    /// Enumerates `range`, clamped to the chain's configuration space.
    pub fn with_range(chain: &'a Chain, strategy: DecodingStrategy, range: Range<u64>) -> Self {
        let end = range.end.min(chain.max_step());
        Self {
            chain,
            strategy,
            step: range.start.min(end),
            end,
        }
    }

    /// The next step to be decoded.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn max_step(&self) -> u64 {
        self.chain.max_step()
    }

    pub fn remaining(&self) -> u64 {
        self.end - self.step
    }

    pub fn is_exhausted(&self) -> bool {
        self.step >= self.end
    }

    /// Decodes the current step into `out` and advances, returning the
    /// decoded step. Avoids allocating a [`Configuration`] per step.
    #[inline]
    pub fn next_into(&mut self, out: &mut [u8]) -> Option<u64> {
        if self.is_exhausted() {
            return None;
        }
        let step = self.step;
        self.strategy.decode_into(self.chain, step, out);
        self.step += 1;
        Some(step)
    }
}

impl Iterator for Enumerator<'_> {
    type Item = Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let config = self.strategy.decode(self.chain, self.step);
        self.step += 1;
        Some(config)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
