use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use cubefold::core::utils::geometry::Extents;
use cubefold::engine::config::{SearchConfigBuilder, TieBreak};
use cubefold::engine::enumerator::DecodingStrategy;
use std::str::FromStr;

/// Resolves `search` settings: CLI flags over `--set` values over the config
/// file over built-in defaults.
pub fn build_config(args: &SearchArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    let search_file = file_config.search.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let chain_name = args
        .chain
        .as_deref()
        .or(file_config.chain.as_deref())
        .unwrap_or(&defaults.chain);
    let chain = parser::parse_chain_source(chain_name)
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let decoding = match &args.decoding {
        Some(s) => parse_flag::<DecodingStrategy>(s)?,
        None => search_file.decoding.unwrap_or(defaults.decoding),
    };
    let widest_tie_break = match &args.widest_tie_break {
        Some(s) => parse_flag::<TieBreak>(s)?,
        None => search_file
            .widest_tie_break
            .unwrap_or(defaults.widest_tie_break),
    };
    let compact_tie_break = match &args.compact_tie_break {
        Some(s) => parse_flag::<TieBreak>(s)?,
        None => search_file
            .compact_tie_break
            .unwrap_or(defaults.compact_tie_break),
    };
    let compact_extents = match &args.compact_extents {
        Some(s) => parser::parse_extents(s).map_err(|e| CliError::Argument(e.to_string()))?,
        None => search_file
            .compact_extents
            .map(|[x, y, z]| Extents::new(x, y, z))
            .unwrap_or(defaults.compact_extents),
    };
    let range = args
        .range
        .as_deref()
        .or(search_file.range.as_deref())
        .map(parser::parse_step_range)
        .transpose()
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let stop_on_compact = args.stop_on_compact
        || search_file
            .stop_on_compact
            .unwrap_or(defaults.stop_on_compact);
    let chunk_size = args
        .chunk_size
        .or(search_file.chunk_size)
        .unwrap_or(defaults.chunk_size);

    let mut builder = SearchConfigBuilder::new()
        .decoding(decoding)
        .compact_target(compact_extents)
        .widest_tie_break(widest_tie_break)
        .compact_tie_break(compact_tie_break)
        .stop_on_compact(stop_on_compact)
        .chunk_size(chunk_size);
    if let Some(range) = range {
        builder = builder.step_range(range);
    }
    let search = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        chain,
        search,
        export_dir: args.export_dir.clone().or(output_file.export_dir),
    })
}

fn parse_flag<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| CliError::Argument(e.to_string()))
}

fn parse_set_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
{
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value = value.trim();

        if key == "chain" {
            config.chain = Some(value.to_string());
            continue;
        }
        if key == "output.export-dir" {
            config.output.get_or_insert_with(Default::default).export_dir = Some(value.into());
            continue;
        }

        let search = config.search.get_or_insert_with(Default::default);
        match key {
            "search.decoding" => search.decoding = Some(parse_set_value(key, value)?),
            "search.range" => search.range = Some(value.to_string()),
            "search.compact-extents" => {
                let extents = parser::parse_extents(value)
                    .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?;
                search.compact_extents = Some([extents.x, extents.y, extents.z]);
            }
            "search.widest-tie-break" => {
                search.widest_tie_break = Some(parse_set_value(key, value)?)
            }
            "search.compact-tie-break" => {
                search.compact_tie_break = Some(parse_set_value(key, value)?)
            }
            "search.stop-on-compact" => {
                search.stop_on_compact = Some(parse_set_value(key, value)?)
            }
            "search.chunk-size" => search.chunk_size = Some(parse_set_value(key, value)?),
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
