use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::parse_chain_source;
use cubefold::core::io::placement_csv::write_placement_to_path;
use cubefold::core::models::chain::Chain;
use cubefold::engine::enumerator::DecodingStrategy;
use cubefold::engine::error::EngineError;
use cubefold::workflows::inspect::{self, InspectTarget, Inspection};
use std::fmt::Write as _;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let source = parse_chain_source(&args.chain).map_err(|e| CliError::Argument(e.to_string()))?;
    let chain = super::load_chain(&source)?;

    let target = match args.step {
        Some(step) => InspectTarget::Step {
            step,
            decoding: args
                .decoding
                .parse::<DecodingStrategy>()
                .map_err(|e| CliError::Argument(e.to_string()))?,
        },
        None => InspectTarget::RestingPose,
    };
    let inspection = inspect::run(&chain, target)?;
    print!("{}", render(&chain, &inspection));

    if let Some(path) = &args.csv {
        let posed = chain
            .posed(&inspection.configuration)
            .map_err(EngineError::from)?;
        write_placement_to_path(&posed, &inspection.placement, path)?;
        info!("Wrote placement to {:?}", path);
        println!("Placement written to: {}", path.display());
    }
    Ok(())
}

fn render(chain: &Chain, inspection: &Inspection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Configuration {} ({} decoding)",
        inspection.configuration, inspection.decoding
    );
    let _ = writeln!(
        out,
        "{:>5}  {:<8}  {:<5}  {:>6}  {:>12}",
        "index", "kind", "color", "rotate", "cell"
    );
    for (segment, cell) in chain.segments().iter().zip(inspection.placement.cells()) {
        let _ = writeln!(
            out,
            "{:>5}  {:<8}  {:<5}  {:>6}  {:>12}",
            segment.index,
            segment.kind.to_string(),
            if segment.blue { "blue" } else { "white" },
            inspection.configuration.rotate(segment.index),
            format!("({}, {}, {})", cell[0], cell[1], cell[2]),
        );
    }
    let _ = match &inspection.verdict {
        Ok(extents) => writeln!(
            out,
            "✓ Valid folding with extents {} (spread {})",
            extents,
            extents.spread()
        ),
        Err(rejection) => writeln!(out, "✗ Rejected: {}", rejection),
    };
    out
}
