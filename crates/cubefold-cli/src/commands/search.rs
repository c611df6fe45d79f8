use crate::cli::SearchArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cubefold::core::io::placement_csv::write_placement_to_path;
use cubefold::core::models::chain::Chain;
use cubefold::core::utils::geometry::Extents;
use cubefold::engine::config::SearchConfig;
use cubefold::engine::error::{EngineError, SearchError};
use cubefold::engine::placement::Placer;
use cubefold::engine::progress::ProgressReporter;
use cubefold::engine::state::Candidate;
use cubefold::workflows::search::{self, SearchResult};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

const WIDEST_FILE: &str = "widest.csv";
const COMPACT_FILE: &str = "compact.csv";
const SUMMARY_FILE: &str = "summary.toml";

pub fn run(args: SearchArgs) -> Result<()> {
    let app = build_config(&args)?;
    let chain = super::load_chain(&app.chain)?;
    info!(
        "Chain has {} segments and {} corners ({} configurations).",
        chain.len(),
        chain.corner_count(),
        chain.max_step()
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("{}", search_banner(&chain, &app.search)?);
    let outcome = search::run(&chain, &app.search, &reporter);

    match outcome {
        Ok(result) => {
            print_result(&result);
            if let Some(dir) = &app.export_dir {
                export_result(&chain, &result, dir)?;
                println!("Results written to: {}", dir.display());
            }
            Ok(())
        }
        Err(SearchError::NoCompactSolution {
            widest,
            evaluated,
            accepted,
        }) => {
            warn!("No folding matched the compact target.");
            print_candidate("Widest", &widest);
            if let Some(dir) = &app.export_dir {
                std::fs::create_dir_all(dir)?;
                write_candidate(&chain, &widest, &dir.join(WIDEST_FILE))?;
                println!("Widest folding written to: {}", dir.display());
            }
            Err(SearchError::NoCompactSolution {
                widest,
                evaluated,
                accepted,
            }
            .into())
        }
        Err(e) => Err(e.into()),
    }
}

fn search_banner(chain: &Chain, config: &SearchConfig) -> Result<String> {
    let range = config
        .resolve_range(chain.max_step())
        .map_err(EngineError::from)?;
    Ok(format!(
        "Searching {} configurations (steps {}..{}) with {} decoding...",
        range.end - range.start,
        range.start,
        range.end,
        config.decoding
    ))
}

fn print_result(result: &SearchResult) {
    println!(
        "Evaluated {} configurations: {} valid, {} matching the compact target.",
        result.evaluated, result.accepted, result.compact_matches
    );
    if result.stopped_early {
        println!("Stopped at the first compact folding.");
    }
    print_candidate("Widest", &result.widest);
    print_candidate("Compact", &result.compact);
}

fn print_candidate(label: &str, candidate: &Candidate) {
    println!(
        "✓ {:<8} step {:>12}  extents {}  rotates {}",
        label,
        candidate.configuration.step(),
        candidate.extents,
        candidate
            .configuration
            .rotates()
            .iter()
            .map(u8::to_string)
            .collect::<String>()
    );
}

fn write_candidate(chain: &Chain, candidate: &Candidate, path: &Path) -> Result<()> {
    let posed = chain
        .posed(&candidate.configuration)
        .map_err(EngineError::from)?;
    let placement = Placer::new().place(chain, &candidate.configuration);
    write_placement_to_path(&posed, &placement, path)?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct CandidateSummary<'a> {
    step: u64,
    spread: i32,
    rotates: &'a [u8],
    extents: Extents,
}

impl<'a> From<&'a Candidate> for CandidateSummary<'a> {
    fn from(candidate: &'a Candidate) -> Self {
        Self {
            step: candidate.configuration.step(),
            spread: candidate.spread(),
            rotates: candidate.configuration.rotates(),
            extents: candidate.extents,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct SearchSummary<'a> {
    decoding: String,
    range_start: u64,
    range_end: u64,
    evaluated: u64,
    accepted: u64,
    compact_matches: u64,
    stopped_early: bool,
    widest: CandidateSummary<'a>,
    compact: CandidateSummary<'a>,
}

fn export_result(chain: &Chain, result: &SearchResult, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    write_candidate(chain, &result.widest, &dir.join(WIDEST_FILE))?;

    // The compact folding keeps the widest pose as its prior orientation.
    let transition = result
        .transition_chain(chain)
        .map_err(EngineError::from)?;
    let placement = Placer::new().place(chain, &result.compact.configuration);
    write_placement_to_path(&transition, &placement, &dir.join(COMPACT_FILE))?;

    let summary = SearchSummary {
        decoding: result.decoding.to_string(),
        range_start: result.range.start,
        range_end: result.range.end,
        evaluated: result.evaluated,
        accepted: result.accepted,
        compact_matches: result.compact_matches,
        stopped_early: result.stopped_early,
        widest: (&result.widest).into(),
        compact: (&result.compact).into(),
    };
    let content = toml::to_string(&summary).map_err(anyhow::Error::from)?;
    std::fs::write(dir.join(SUMMARY_FILE), content)?;
    info!("Exported search results to {:?}", dir);
    Ok(())
}
