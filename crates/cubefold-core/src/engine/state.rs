use super::config::{SearchConfig, TieBreak};
use crate::core::models::configuration::Configuration;
use crate::core::utils::geometry::Extents;

/// An accepted configuration together with its bounding extents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub configuration: Configuration,
    pub extents: Extents,
}

impl Candidate {
    pub fn spread(&self) -> i32 {
        self.extents.spread()
    }
}

/// Running best candidates and counters over a contiguous run of steps.
#[derive(Debug, Clone)]
pub struct ExtremalTracker {
    compact_target: Extents,
    widest_tie_break: TieBreak,
    compact_tie_break: TieBreak,
    widest: Option<Candidate>,
    compact: Option<Candidate>,
    evaluated: u64,
    accepted: u64,
    compact_matches: u64,
}

impl ExtremalTracker {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            compact_target: config.compact_target,
            widest_tie_break: config.widest_tie_break,
            compact_tie_break: config.compact_tie_break,
            widest: None,
            compact: None,
            evaluated: 0,
            accepted: 0,
            compact_matches: 0,
        }
    }

    pub fn record_rejection(&mut self) {
        self.evaluated += 1;
    }

    /// Scores an accepted configuration. Returns `true` when it matches the
    /// compact target.
    ///
    /// `rotates` is only copied when the candidate is retained.
    pub fn offer(&mut self, step: u64, rotates: &[u8], extents: Extents) -> bool {
        self.evaluated += 1;
        self.accepted += 1;

        let spread = extents.spread();
        let replace_widest = match &self.widest {
            None => true,
            Some(best) => beats(spread, best.spread(), self.widest_tie_break),
        };
        if replace_widest {
            self.widest = Some(candidate(step, rotates, extents));
        }

        if extents != self.compact_target {
            return false;
        }
        self.compact_matches += 1;
        if self.compact.is_none() || self.compact_tie_break == TieBreak::LastWins {
            self.compact = Some(candidate(step, rotates, extents));
        }
        true
    }

    /// Folds in the tracker of a run of steps that directly follows this one.
    pub fn merge(&mut self, later: ExtremalTracker) {
        self.evaluated += later.evaluated;
        self.accepted += later.accepted;
        self.compact_matches += later.compact_matches;

        if let Some(theirs) = later.widest {
            let replace = match &self.widest {
                None => true,
                Some(ours) => beats(theirs.spread(), ours.spread(), self.widest_tie_break),
            };
            if replace {
                self.widest = Some(theirs);
            }
        }

        if let Some(theirs) = later.compact {
            if self.compact.is_none() || self.compact_tie_break == TieBreak::LastWins {
                self.compact = Some(theirs);
            }
        }
    }

    pub fn widest(&self) -> Option<&Candidate> {
        self.widest.as_ref()
    }

    pub fn compact(&self) -> Option<&Candidate> {
        self.compact.as_ref()
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn compact_matches(&self) -> u64 {
        self.compact_matches
    }

    pub fn into_candidates(self) -> (Option<Candidate>, Option<Candidate>) {
        (self.widest, self.compact)
    }
}

#[inline]
fn beats(spread: i32, best: i32, tie_break: TieBreak) -> bool {
    match tie_break {
        TieBreak::FirstWins => spread > best,
        TieBreak::LastWins => spread >= best,
    }
}

fn candidate(step: u64, rotates: &[u8], extents: Extents) -> Candidate {
    Candidate {
        configuration: Configuration::new(step, rotates),
        extents,
    }
}
