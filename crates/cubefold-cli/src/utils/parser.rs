use cubefold::core::models::presets::{find_preset, preset_names};
use cubefold::core::utils::geometry::Extents;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid step range '{0}'. Expected 'START..END' (e.g., '0..4096').")]
    InvalidRangeFormat(String),

    #[error("Step range '{0}' is empty.")]
    EmptyRange(String),

    #[error(
        "Invalid extents '{0}'. Expected 'X,Y,Z' or a single value for a cube (e.g., '3,3,3' or '3')."
    )]
    InvalidExtentsFormat(String),

    #[error("Unknown chain '{name}'. Expected a chain file path or one of: {known}.")]
    UnknownChain { name: String, known: String },
}

/// Where a chain comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainSource {
    Preset(String),
    File(PathBuf),
}

/// Resolves a chain argument: anything that looks like a path is a chain
/// file, anything else must name a preset.
pub fn parse_chain_source(name_or_path: &str) -> Result<ChainSource, ParseError> {
    let path = Path::new(name_or_path);
    let looks_like_path = path.is_absolute()
        || name_or_path.contains(['/', '\\'])
        || path.extension().is_some_and(|ext| ext == "toml");
    if looks_like_path {
        return Ok(ChainSource::File(path.to_path_buf()));
    }
    if find_preset(name_or_path).is_some() {
        return Ok(ChainSource::Preset(name_or_path.to_lowercase()));
    }
    if path.is_file() {
        return Ok(ChainSource::File(path.to_path_buf()));
    }
    Err(ParseError::UnknownChain {
        name: name_or_path.to_string(),
        known: preset_names().collect::<Vec<_>>().join(", "),
    })
}

/// Parses `START..END` (also accepting `START:END`) into a half-open range.
pub fn parse_step_range(s: &str) -> Result<Range<u64>, ParseError> {
    let (start, end) = s
        .split_once("..")
        .or_else(|| s.split_once(':'))
        .ok_or_else(|| ParseError::InvalidRangeFormat(s.to_string()))?;
    let parse = |part: &str| {
        part.trim()
            .replace('_', "")
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidRangeFormat(s.to_string()))
    };
    let range = parse(start)?..parse(end)?;
    if range.is_empty() {
        return Err(ParseError::EmptyRange(s.to_string()));
    }
    Ok(range)
}

/// Parses `X,Y,Z`, or a single value meaning a cube of that extent.
pub fn parse_extents(s: &str) -> Result<Extents, ParseError> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::InvalidExtentsFormat(s.to_string()))?;
    match values.as_slice() {
        [side] => Ok(Extents::cube(*side)),
        [x, y, z] => Ok(Extents::new(*x, *y, *z)),
        _ => Err(ParseError::InvalidExtentsFormat(s.to_string())),
    }
}
