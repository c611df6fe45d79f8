use crate::core::models::chain::Chain;
use crate::core::models::placement::Placement;
use crate::core::models::segment::SegmentKind;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Placement has {placed} segments but the chain has {expected}")]
    LengthMismatch { expected: usize, placed: usize },
}

#[derive(Debug, Serialize)]
struct PlacementRow {
    index: usize,
    kind: SegmentKind,
    blue: bool,
    rotate: u8,
    prior_rotate: u8,
    x: i32,
    y: i32,
    z: i32,
}

/// Writes one CSV row per segment: topology, orientation and lattice cell.
///
/// `chain` should already be posed (see [`Chain::posed`] and
/// [`Chain::transition`]) so the orientation columns match the placement.
pub fn write_placement<W: Write>(
    chain: &Chain,
    placement: &Placement,
    writer: W,
) -> Result<(), ExportError> {
    if chain.len() != placement.len() {
        return Err(ExportError::LengthMismatch {
            expected: chain.len(),
            placed: placement.len(),
        });
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (segment, cell) in chain.segments().iter().zip(placement.cells()) {
        csv_writer.serialize(PlacementRow {
            index: segment.index,
            kind: segment.kind,
            blue: segment.blue,
            rotate: segment.rotate,
            prior_rotate: segment.prior_rotate,
            x: cell[0],
            y: cell[1],
            z: cell[2],
        })?;
    }
    csv_writer.flush().map_err(|e| ExportError::Csv(e.into()))?;
    Ok(())
}

pub fn write_placement_to_path(
    chain: &Chain,
    placement: &Placement,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_placement(chain, placement, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::placement::PlacedSegment;
    use nalgebra::{Point3, Rotation3};

    fn straight_placement(n: usize) -> Placement {
        (0..n)
            .map(|i| PlacedSegment {
                position: Point3::new(0.0, i as f64, 0.0),
                orientation: Rotation3::identity(),
            })
            .collect()
    }

    #[test]
    fn writes_header_and_one_row_per_segment() {
        let chain = Chain::with_corners(3, &[]).unwrap();
        let mut buffer = Vec::new();
        write_placement(&chain, &straight_placement(3), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "index,kind,blue,rotate,prior_rotate,x,y,z");
        assert_eq!(lines[1], "0,endpoint,true,0,0,0,0,0");
        assert_eq!(lines[2], "1,straight,false,0,0,0,1,0");
        assert_eq!(lines[3], "2,endpoint,true,0,0,0,2,0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn rejects_placement_of_wrong_length() {
        let chain = Chain::with_corners(4, &[]).unwrap();
        let result = write_placement(&chain, &straight_placement(3), Vec::<u8>::new());
        assert!(matches!(
            result,
            Err(ExportError::LengthMismatch {
                expected: 4,
                placed: 3
            })
        ));
    }

    #[test]
    fn writes_to_a_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("placement.csv");
        let chain = Chain::with_corners(2, &[]).unwrap();
        write_placement_to_path(&chain, &straight_placement(2), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
