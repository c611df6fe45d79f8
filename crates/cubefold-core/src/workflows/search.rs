use crate::core::models::chain::{Chain, ChainError};
use crate::core::models::placement::Placement;
use crate::engine::config::SearchConfig;
use crate::engine::enumerator::{DecodingStrategy, Enumerator};
use crate::engine::error::{EngineError, SearchError};
use crate::engine::grid::{Rejection, Validator};
use crate::engine::placement::Placer;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{Candidate, ExtremalTracker};
use std::ops::Range;
use tracing::{debug, info, instrument, warn};

/// Evaluated steps between two `TaskAdvance` events from one worker.
const PROGRESS_INTERVAL: u64 = 1 << 16;

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Accepted configuration with the largest spread.
    pub widest: Candidate,
    /// Accepted configuration whose extents match the compact target.
    pub compact: Candidate,
    pub evaluated: u64,
    pub accepted: u64,
    pub compact_matches: u64,
    pub range: Range<u64>,
    pub decoding: DecodingStrategy,
    /// Whether the search ended at the first compact match.
    pub stopped_early: bool,
}

impl SearchResult {
    /// The chain posed as the compact solution, remembering the widest pose
    /// as its prior orientation.
    pub fn transition_chain(&self, chain: &Chain) -> Result<Chain, ChainError> {
        chain.transition(&self.widest.configuration, &self.compact.configuration)
    }
}

#[instrument(skip_all, name = "search_workflow")]
pub fn run(
    chain: &Chain,
    config: &SearchConfig,
    reporter: &ProgressReporter,
) -> Result<SearchResult, SearchError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let range = config
        .resolve_range(chain.max_step())
        .map_err(EngineError::from)?;
    info!(
        segments = chain.len(),
        corners = chain.corner_count(),
        decoding = %config.decoding,
        start = range.start,
        end = range.end,
        "Prepared folding search."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Search" });
    reporter.report(Progress::TaskStart {
        total_steps: range.end - range.start,
    });
    let (tracker, stopped_early) = if config.stop_on_compact {
        let outcome = scan(chain, config, range.clone(), reporter, true)?;
        (outcome.tracker, outcome.stopped_early)
    } else {
        (search_range(chain, config, range.clone(), reporter)?, false)
    };
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(
        evaluated = tracker.evaluated(),
        accepted = tracker.accepted(),
        compact_matches = tracker.compact_matches(),
        "Search finished."
    );
    finish(tracker, range, config.decoding, stopped_early)
}

fn finish(
    tracker: ExtremalTracker,
    range: Range<u64>,
    decoding: DecodingStrategy,
    stopped_early: bool,
) -> Result<SearchResult, SearchError> {
    let evaluated = tracker.evaluated();
    let accepted = tracker.accepted();
    let compact_matches = tracker.compact_matches();
    let (widest, compact) = tracker.into_candidates();

    let Some(widest) = widest else {
        warn!(evaluated, "Every configuration self-intersects.");
        return Err(SearchError::NoValidConfiguration { evaluated });
    };
    let Some(compact) = compact else {
        warn!(
            evaluated,
            accepted, "No accepted configuration matched the compact target."
        );
        return Err(SearchError::NoCompactSolution {
            widest,
            evaluated,
            accepted,
        });
    };

    Ok(SearchResult {
        widest,
        compact,
        evaluated,
        accepted,
        compact_matches,
        range,
        decoding,
        stopped_early,
    })
}

#[cfg(feature = "parallel")]
fn search_range(
    chain: &Chain,
    config: &SearchConfig,
    range: Range<u64>,
    reporter: &ProgressReporter,
) -> Result<ExtremalTracker, EngineError> {
    use rayon::prelude::*;

    let chunk_size = config.chunk_size.max(1);
    let chunk_count = (range.end - range.start).div_ceil(chunk_size);
    debug!(chunk_count, chunk_size, "Partitioned step range.");

    (0..chunk_count)
        .into_par_iter()
        .map(|chunk| -> Result<ExtremalTracker, EngineError> {
            let start = range.start + chunk * chunk_size;
            let end = start.saturating_add(chunk_size).min(range.end);
            let outcome = scan(chain, config, start..end, reporter, false)?;
            debug!(
                start,
                end,
                accepted = outcome.tracker.accepted(),
                "Chunk scanned."
            );
            Ok(outcome.tracker)
        })
        .try_reduce(
            || ExtremalTracker::new(config),
            |mut earlier, later| {
                earlier.merge(later);
                Ok(earlier)
            },
        )
}

#[cfg(not(feature = "parallel"))]
fn search_range(
    chain: &Chain,
    config: &SearchConfig,
    range: Range<u64>,
    reporter: &ProgressReporter,
) -> Result<ExtremalTracker, EngineError> {
    scan(chain, config, range, reporter, false).map(|outcome| outcome.tracker)
}

struct ScanOutcome {
    tracker: ExtremalTracker,
    stopped_early: bool,
}

/// Evaluates every step of `range` in order on the calling thread.
fn scan(
    chain: &Chain,
    config: &SearchConfig,
    range: Range<u64>,
    reporter: &ProgressReporter,
    stop_on_compact: bool,
) -> Result<ScanOutcome, EngineError> {
    let placer = Placer::new();
    let mut validator = Validator::for_chain(chain);
    let mut tracker = ExtremalTracker::new(config);
    let mut placement = Placement::with_capacity(chain.len());
    let mut rotates = vec![0u8; chain.len()];
    let mut enumerator = Enumerator::with_range(chain, config.decoding, range);
    let mut pending = 0u64;
    let mut stopped_early = false;

    while let Some(step) = enumerator.next_into(&mut rotates) {
        placer.place_into(chain, &rotates, &mut placement);
        let compact_hit = match validator.validate(&placement) {
            Ok(extents) => tracker.offer(step, &rotates, extents),
            Err(Rejection::SelfIntersection { .. }) => {
                tracker.record_rejection();
                false
            }
            Err(rejection) => return Err(EngineError::Lattice(rejection)),
        };

        pending += 1;
        if pending == PROGRESS_INTERVAL {
            reporter.report(Progress::TaskAdvance { steps: pending });
            pending = 0;
        }

        if compact_hit && stop_on_compact {
            info!(step, "Stopping at the first compact match.");
            stopped_early = true;
            break;
        }
    }
    if pending > 0 {
        reporter.report(Progress::TaskAdvance { steps: pending });
    }

    Ok(ScanOutcome {
        tracker,
        stopped_early,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::Extents;
    use crate::engine::config::{ConfigError, SearchConfigBuilder, TieBreak};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// A window of the per-corner space holding 400 accepted foldings, 16 of
    /// which fit the default compact target.
    const WINDOW: Range<u64> = 272_658_032..272_660_032;

    fn window_config() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
            .decoding(DecodingStrategy::PerCorner)
            .step_range(WINDOW)
    }

    fn search(config: &SearchConfig) -> Result<SearchResult, SearchError> {
        run(&Chain::canonical(), config, &ProgressReporter::new())
    }

    #[test]
    fn window_search_finds_both_extremes() {
        let result = search(&window_config().build().unwrap()).unwrap();
        assert_eq!(result.evaluated, 2_000);
        assert_eq!(result.accepted, 400);
        assert_eq!(result.compact_matches, 16);
        assert_eq!(result.widest.configuration.step(), 272_659_988);
        assert_eq!(result.widest.extents, Extents::new(2, 7, 3));
        assert_eq!(result.compact.configuration.step(), 272_659_575);
        assert_eq!(result.compact.extents, Extents::cube(3));
        assert_eq!(result.range, WINDOW);
        assert!(!result.stopped_early);
    }

    #[test]
    fn tie_breaks_pick_the_other_end_of_each_tie() {
        let config = window_config()
            .widest_tie_break(TieBreak::LastWins)
            .compact_tie_break(TieBreak::FirstWins)
            .build()
            .unwrap();
        let result = search(&config).unwrap();
        assert_eq!(result.widest.configuration.step(), 272_660_031);
        assert_eq!(result.widest.extents, Extents::new(3, 7, 3));
        assert_eq!(result.compact.configuration.step(), 272_659_532);
    }

    #[test]
    fn stop_on_compact_ends_at_the_first_match() {
        let config = window_config().stop_on_compact(true).build().unwrap();
        let result = search(&config).unwrap();
        assert!(result.stopped_early);
        assert_eq!(result.compact.configuration.step(), 272_659_532);
        assert_eq!(result.evaluated, 272_659_532 - WINDOW.start + 1);
    }

    #[test]
    fn retained_configurations_carry_every_rotate() {
        let chain = Chain::canonical();
        let result = search(&window_config().build().unwrap()).unwrap();
        let compact = &result.compact.configuration;
        assert_eq!(compact.len(), chain.len());
        assert_eq!(
            DecodingStrategy::PerCorner.decode(&chain, compact.step()),
            *compact
        );
    }

    #[test]
    fn a_window_without_foldings_reports_no_valid_configuration() {
        let config = SearchConfigBuilder::new()
            .decoding(DecodingStrategy::PerCorner)
            .step_range(0..4_096)
            .build()
            .unwrap();
        assert!(matches!(
            search(&config),
            Err(SearchError::NoValidConfiguration { evaluated: 4_096 })
        ));
    }

    #[test]
    fn unmatched_target_reports_the_widest_found() {
        let config = window_config()
            .compact_target(Extents::cube(2))
            .build()
            .unwrap();
        match search(&config) {
            Err(SearchError::NoCompactSolution {
                widest,
                evaluated,
                accepted,
            }) => {
                assert_eq!(widest.configuration.step(), 272_659_988);
                assert_eq!(evaluated, 2_000);
                assert_eq!(accepted, 400);
            }
            other => panic!("expected NoCompactSolution, got {other:?}"),
        }
    }

    #[test]
    fn a_true_cube_fold_is_found_in_its_window() {
        let config = SearchConfigBuilder::new()
            .decoding(DecodingStrategy::PerCorner)
            .step_range(278_088_700..278_088_800)
            .compact_target(Extents::cube(2))
            .compact_tie_break(TieBreak::FirstWins)
            .build()
            .unwrap();
        let result = search(&config).unwrap();
        assert_eq!(result.compact.configuration.step(), 278_088_784);
        assert_eq!(result.compact_matches, 4);
    }

    #[test]
    fn out_of_space_range_is_a_config_error() {
        let chain = Chain::with_corners(6, &[1, 2]).unwrap();
        let config = SearchConfigBuilder::new().step_range(0..17).build().unwrap();
        let err = run(&chain, &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Engine(EngineError::Config(ConfigError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn per_chain_index_never_frees_the_closing_square() {
        // Corners 16, 17 and 18 sit past the decoded bits, so segments 15..=19
        // always close a unit square.
        let chain = Chain::canonical();
        let placer = Placer::new();
        let mut validator = Validator::for_chain(&chain);
        for step in [0, 1, 12_345_678, 0xDEAD_BEEF, chain.max_step() - 1] {
            let config = DecodingStrategy::PerChainIndex.decode(&chain, step);
            for index in [16, 17, 18] {
                assert_eq!(config.rotate(index), 0);
            }
            let rejection = validator
                .validate(&placer.place(&chain, &config))
                .unwrap_err();
            assert!(rejection.is_self_intersection());
            assert!(rejection.segment() <= 19, "step {step}: {rejection}");
        }
    }

    #[test]
    fn progress_events_account_for_every_step() {
        let advanced = AtomicU64::new(0);
        let started = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| match event {
            Progress::TaskStart { total_steps } => {
                started.store(total_steps, Ordering::SeqCst);
            }
            Progress::TaskAdvance { steps } => {
                advanced.fetch_add(steps, Ordering::SeqCst);
            }
            _ => {}
        }));
        let config = window_config().chunk_size(300).build().unwrap();
        run(&Chain::canonical(), &config, &reporter).unwrap();
        drop(reporter);
        assert_eq!(started.load(Ordering::SeqCst), 2_000);
        assert_eq!(advanced.load(Ordering::SeqCst), 2_000);
    }

    #[test]
    fn transition_chain_poses_compact_over_widest() {
        let chain = Chain::canonical();
        let result = search(&window_config().build().unwrap()).unwrap();
        let posed = result.transition_chain(&chain).unwrap();
        for (index, segment) in posed.segments().iter().enumerate() {
            assert_eq!(segment.rotate, result.compact.configuration.rotate(index));
            assert_eq!(
                segment.prior_rotate,
                result.widest.configuration.rotate(index)
            );
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn chunked_search_matches_a_single_pass() {
        for (widest, compact) in [
            (TieBreak::FirstWins, TieBreak::LastWins),
            (TieBreak::LastWins, TieBreak::FirstWins),
        ] {
            let config = window_config()
                .widest_tie_break(widest)
                .compact_tie_break(compact)
                .chunk_size(256)
                .build()
                .unwrap();
            let chain = Chain::canonical();
            let reporter = ProgressReporter::new();
            let sequential = scan(&chain, &config, WINDOW, &reporter, false)
                .unwrap()
                .tracker;
            let chunked = search_range(&chain, &config, WINDOW, &reporter).unwrap();
            assert_eq!(chunked.widest(), sequential.widest());
            assert_eq!(chunked.compact(), sequential.compact());
            assert_eq!(chunked.evaluated(), sequential.evaluated());
            assert_eq!(chunked.accepted(), sequential.accepted());
            assert_eq!(chunked.compact_matches(), sequential.compact_matches());
        }
    }

    #[test]
    #[ignore = "walks all 4^16 configurations"]
    fn per_chain_index_full_space_has_no_valid_folding() {
        let err = search(&SearchConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SearchError::NoValidConfiguration {
                evaluated: 4_294_967_296
            }
        ));
    }

    #[test]
    #[ignore = "walks all 4^16 configurations"]
    fn per_corner_full_space_goldens() {
        let config = SearchConfigBuilder::new()
            .decoding(DecodingStrategy::PerCorner)
            .build()
            .unwrap();
        let result = search(&config).unwrap();
        assert_eq!(result.evaluated, 4_294_967_296);
        assert_eq!(result.accepted, 2_091_106_928);
        assert_eq!(result.compact_matches, 869_608);
        assert_eq!(result.widest.configuration.step(), 572_662_292);
        assert_eq!(result.widest.extents, Extents::new(1, 14, 2));
        assert_eq!(result.compact.configuration.step(), 3_757_548_023);
    }
}
